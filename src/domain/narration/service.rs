use crate::infrastructure::repositories::TtsRepository;
use crate::infrastructure::storage::{MediaDir, MediaStorage};
use std::path::Path;
use std::sync::Arc;

/// Generates narration audio and places it in media storage.
///
/// The synthesis call is a plain awaited async call on the request task:
/// there is no background queue, no caller-imposed timeout, and no task
/// that survives the save. Every failure path is logged and swallowed;
/// the record save has already committed when this runs.
pub struct NarrationService {
    tts_repo: Arc<dyn TtsRepository>,
    storage: Arc<MediaStorage>,
    voice_id: String,
}

impl NarrationService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, storage: Arc<MediaStorage>, voice_id: String) -> Self {
        Self {
            tts_repo,
            storage,
            voice_id,
        }
    }

    /// Synthesize `text` and store the result as `filename` under `dir`.
    ///
    /// The audio is first written to the scoped temp directory; only if the
    /// temp file exists afterwards is it attached to media storage, and the
    /// temp file is deleted before returning. Returns the media-relative
    /// path on success, `None` on any failure (already logged).
    pub async fn generate(&self, text: &str, filename: &str, dir: MediaDir) -> Option<String> {
        let temp_path = match self.storage.temp_path(filename).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, filename, "Failed to prepare temp audio directory");
                return None;
            }
        };

        if let Err(e) = self.synthesize_to_file(text, &temp_path).await {
            tracing::warn!(error = %e, filename, "Speech synthesis failed");
        }

        // Missing temp file after the call is treated the same as a failure
        if !temp_path.exists() {
            return None;
        }

        let result = self.attach(&temp_path, filename, dir).await;

        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            tracing::warn!(error = %e, filename, "Failed to remove temp audio file");
        }

        result
    }

    async fn synthesize_to_file(&self, text: &str, path: &Path) -> Result<(), String> {
        let audio = self.tts_repo.synthesize(text, &self.voice_id).await?;
        tokio::fs::write(path, &audio)
            .await
            .map_err(|e| format!("Failed to write temp audio file: {}", e))
    }

    async fn attach(&self, temp_path: &Path, filename: &str, dir: MediaDir) -> Option<String> {
        let bytes = match tokio::fs::read(temp_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, filename, "Failed to read temp audio file");
                return None;
            }
        };

        match self.storage.store(dir, filename, &bytes).await {
            Ok(relative) => {
                tracing::info!(path = %relative, "Narration audio generated");
                Some(relative)
            }
            Err(e) => {
                tracing::warn!(error = %e, filename, "Failed to store narration audio");
                None
            }
        }
    }
}

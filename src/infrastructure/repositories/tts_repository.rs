use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying engine (AWS Polly in production, a stub in tests).
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize UTF-8 text with the given voice.
    ///
    /// Returns merged audio data ready for playback (MP3 format).
    ///
    /// # Errors
    /// Returns error if synthesis fails or the provider is unavailable.
    /// Callers in the narration pipeline catch and log these; they never
    /// abort a record save.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, String>;
}

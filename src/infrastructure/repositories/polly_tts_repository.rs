use super::tts_repository::TtsRepository;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// AWS Polly implementation of the TTS repository.
/// The voice is fixed per deployment (an Arabic standard-engine voice by
/// default); callers pass it through from configuration.
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Split text into batches that respect sentence boundaries.
    /// Each batch is at most MAX_BATCH_SIZE characters.
    fn split_into_batches(text: &str) -> Vec<String> {
        if text.len() <= MAX_BATCH_SIZE {
            return vec![text.to_string()];
        }

        let mut batches = Vec::new();
        let mut current_batch = String::new();

        // Split on sentence-ending punctuation
        let sentence_pattern = regex::Regex::new(r"([.!?؟]+\s+)").unwrap();
        let mut last_end = 0;

        for mat in sentence_pattern.find_iter(text) {
            let sentence = &text[last_end..mat.end()];

            if !current_batch.is_empty() && current_batch.len() + sentence.len() > MAX_BATCH_SIZE {
                batches.push(current_batch.trim().to_string());
                current_batch = String::new();
            }

            current_batch.push_str(sentence);
            last_end = mat.end();
        }

        if last_end < text.len() {
            let remaining = &text[last_end..];

            if !current_batch.is_empty() && current_batch.len() + remaining.len() > MAX_BATCH_SIZE {
                batches.push(current_batch.trim().to_string());
                current_batch = String::new();
            }

            // Remaining text without sentence boundaries is split by characters
            if remaining.len() > MAX_BATCH_SIZE {
                let chars: Vec<char> = remaining.chars().collect();
                for chunk in chars.chunks(MAX_BATCH_SIZE) {
                    batches.push(chunk.iter().collect());
                }
            } else {
                current_batch.push_str(remaining);
            }
        }

        if !current_batch.is_empty() {
            batches.push(current_batch.trim().to_string());
        }

        batches
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, String> {
        let voice = VoiceId::from(voice_id);

        tracing::debug!(
            voice = voice_id,
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice)
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Standard)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice = voice_id,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result
            .audio_stream
            .collect()
            .await
            .map_err(|e| format!("Failed to read audio stream: {}", e))?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = Self::split_into_batches(text);
        let mut merged_audio = Vec::new();

        for (index, batch) in batches.iter().enumerate() {
            tracing::debug!(batch_index = index, batch_size = batch.len(), "Synthesizing batch");
            let audio_data = self.call_polly(batch, voice_id).await?;
            merged_audio.extend(audio_data);
        }

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}

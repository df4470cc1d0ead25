use async_trait::async_trait;
use examvoice_backend::infrastructure::repositories::TtsRepository;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory synthesis stub. Records every text it is asked to narrate and
/// returns deterministic bytes, so tests can assert both on call counts and
/// on stored file content.
pub struct StubTts {
    texts: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl StubTts {
    pub fn new() -> Self {
        Self {
            texts: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.texts.lock().len()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TtsRepository for StubTts {
    async fn synthesize(&self, text: &str, _voice_id: &str) -> Result<Vec<u8>, String> {
        self.texts.lock().push(text.to_string());
        if self.fail.load(Ordering::SeqCst) {
            Err("synthesis unavailable".to_string())
        } else {
            Ok(format!("MP3:{}", text).into_bytes())
        }
    }
}

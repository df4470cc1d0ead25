pub mod change;
pub mod service;
pub mod templates;

pub use change::should_regenerate;
pub use service::NarrationService;

use serde::{Deserialize, Serialize};

/// Outcome of the last synthesis pass over a record's (text, audio) pairs.
///
/// `Pending` until a pass has been attempted, `Ready` when every attempted
/// pair succeeded, `Failed` when any pair failed. A failed pass leaves the
/// record saved with stale or absent audio; this field is what makes that
/// observable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NarrationStatus {
    Pending,
    Ready,
    Failed,
}

impl std::fmt::Display for NarrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NarrationStatus::Pending => write!(f, "pending"),
            NarrationStatus::Ready => write!(f, "ready"),
            NarrationStatus::Failed => write!(f, "failed"),
        }
    }
}

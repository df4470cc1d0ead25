use crate::domain::narration::NarrationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Welcome/instructions narration played inside the exam
    pub audio_file: Option<String>,
    /// Short narration for the exam listing
    pub short_audio: Option<String>,
    pub narration_status: NarrationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub exam_id: i64,
    pub text: String,
    /// Ascending, non-unique ordering within the exam
    pub position: i32,
    pub audio_file: Option<String>,
    pub narration_status: NarrationStatus,
}

/// A student's recorded answer. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentResponse {
    pub id: i64,
    pub student_id: i64,
    pub question_id: i64,
    pub audio_answer: String,
    pub submitted_at: DateTime<Utc>,
}

use crate::domain::narration::NarrationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Intro narration for the course listing
    pub audio_file: Option<String>,
    pub narration_status: NarrationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub position: i32,
    pub audio_file: Option<String>,
    pub narration_status: NarrationStatus,
}

/// One interactive step within a lesson.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonSegment {
    pub id: i64,
    pub lesson_id: i64,
    pub position: i32,
    pub kind: SegmentKind,
    pub text: String,
    pub error_text: Option<String>,
    /// Label of the key the player waits for (key-wait segments)
    pub key_label: Option<String>,
    pub audio_file: Option<String>,
    pub error_audio_file: Option<String>,
    pub narration_status: NarrationStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Narration-only step
    Narration,
    /// Wait for a specific keypress before advancing
    KeyWait,
    /// Voice-recorded question
    VoiceQuestion,
    /// Placeholder for future file uploads
    FileUpload,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentKind::Narration => write!(f, "narration"),
            SegmentKind::KeyWait => write!(f, "key_wait"),
            SegmentKind::VoiceQuestion => write!(f, "voice_question"),
            SegmentKind::FileUpload => write!(f, "file_upload"),
        }
    }
}

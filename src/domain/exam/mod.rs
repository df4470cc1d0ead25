pub mod error;
pub mod model;
pub mod service;

pub use error::ExamServiceError;
pub use model::{Exam, Question, StudentResponse};
pub use service::{ExamService, ExamServiceApi};

use crate::domain::narration::NarrationStatus;
use crate::infrastructure::storage::media_url;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_position() -> i32 {
    1
}

/// Request to create a new exam
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExamRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request to update an exam's text fields
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateExamRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Response for exam endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ExamResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_audio_url: Option<String>,
    pub narration_status: NarrationStatus,
}

impl From<Exam> for ExamResponse {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id,
            title: exam.title,
            description: exam.description,
            created_at: exam.created_at,
            audio_url: exam.audio_file.as_deref().map(media_url),
            short_audio_url: exam.short_audio.as_deref().map(media_url),
            narration_status: exam.narration_status,
        }
    }
}

/// Request to create a question within an exam
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
    #[serde(default = "default_position")]
    pub position: i32,
}

/// Request to update a question
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateQuestionRequest {
    pub text: String,
    #[serde(default = "default_position")]
    pub position: i32,
}

/// Response for question endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub exam_id: i64,
    pub text: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub narration_status: NarrationStatus,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            exam_id: question.exam_id,
            text: question.text,
            position: question.position,
            audio_url: question.audio_file.as_deref().map(media_url),
            narration_status: question.narration_status,
        }
    }
}

/// Response for submitted student answers
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentResponseResponse {
    pub id: i64,
    pub student_id: i64,
    pub question_id: i64,
    pub audio_url: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<StudentResponse> for StudentResponseResponse {
    fn from(response: StudentResponse) -> Self {
        Self {
            id: response.id,
            student_id: response.student_id,
            question_id: response.question_id,
            audio_url: media_url(&response.audio_answer),
            submitted_at: response.submitted_at,
        }
    }
}

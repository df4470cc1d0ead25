pub mod error;
pub mod model;
pub mod service;

pub use error::CourseServiceError;
pub use model::{Course, Lesson, LessonSegment, SegmentKind};
pub use service::{CourseService, CourseServiceApi};

use crate::domain::narration::NarrationStatus;
use crate::infrastructure::storage::media_url;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_position() -> i32 {
    1
}

fn default_kind() -> SegmentKind {
    SegmentKind::Narration
}

/// Request to create a new course
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request to update a course's text fields
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Response for course endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub narration_status: NarrationStatus,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            icon_url: course.icon.as_deref().map(media_url),
            created_at: course.created_at,
            audio_url: course.audio_file.as_deref().map(media_url),
            narration_status: course.narration_status,
        }
    }
}

/// Request to create a lesson within a course
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLessonRequest {
    pub title: String,
    #[serde(default = "default_position")]
    pub position: i32,
}

/// Request to update a lesson
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLessonRequest {
    pub title: String,
    #[serde(default = "default_position")]
    pub position: i32,
}

/// Response for lesson endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct LessonResponse {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub narration_status: NarrationStatus,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            course_id: lesson.course_id,
            title: lesson.title,
            position: lesson.position,
            audio_url: lesson.audio_file.as_deref().map(media_url),
            narration_status: lesson.narration_status,
        }
    }
}

/// Request to create a lesson segment
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSegmentRequest {
    #[serde(default = "default_position")]
    pub position: i32,
    #[serde(default = "default_kind")]
    pub kind: SegmentKind,
    pub text: String,
    #[serde(default)]
    pub error_text: Option<String>,
    #[serde(default)]
    pub key_label: Option<String>,
}

/// Request to update a lesson segment
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSegmentRequest {
    #[serde(default = "default_position")]
    pub position: i32,
    #[serde(default = "default_kind")]
    pub kind: SegmentKind,
    pub text: String,
    #[serde(default)]
    pub error_text: Option<String>,
    #[serde(default)]
    pub key_label: Option<String>,
}

/// Response for segment endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentResponse {
    pub id: i64,
    pub lesson_id: i64,
    pub position: i32,
    pub kind: SegmentKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_audio_url: Option<String>,
    pub narration_status: NarrationStatus,
}

impl From<LessonSegment> for SegmentResponse {
    fn from(segment: LessonSegment) -> Self {
        Self {
            id: segment.id,
            lesson_id: segment.lesson_id,
            position: segment.position,
            kind: segment.kind,
            text: segment.text,
            error_text: segment.error_text,
            key_label: segment.key_label,
            audio_url: segment.audio_file.as_deref().map(media_url),
            error_audio_url: segment.error_audio_file.as_deref().map(media_url),
            narration_status: segment.narration_status,
        }
    }
}

/// Per-lesson playback document: the lesson's segments in order, consumed
/// by the client-side step-by-step player.
#[derive(Debug, Serialize, Deserialize)]
pub struct LessonPlayerResponse {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub segments: Vec<PlayerSegment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerSegment {
    pub id: i64,
    pub kind: SegmentKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_audio_url: Option<String>,
}

impl From<LessonSegment> for PlayerSegment {
    fn from(segment: LessonSegment) -> Self {
        Self {
            id: segment.id,
            kind: segment.kind,
            text: segment.text,
            audio_url: segment.audio_file.as_deref().map(media_url),
            key_label: segment.key_label,
            error_text: segment.error_text,
            error_audio_url: segment.error_audio_file.as_deref().map(media_url),
        }
    }
}

use super::error::CourseServiceError;
use super::model::{Course, Lesson, LessonSegment};
use super::{
    CourseResponse, CreateCourseRequest, CreateLessonRequest, CreateSegmentRequest,
    LessonPlayerResponse, LessonResponse, PlayerSegment, SegmentResponse, UpdateCourseRequest,
    UpdateLessonRequest, UpdateSegmentRequest,
};
use crate::domain::narration::{should_regenerate, templates, NarrationService, NarrationStatus};
use crate::infrastructure::repositories::{CourseRepository, LessonRepository, SegmentRepository};
use crate::infrastructure::storage::{MediaDir, MediaStorage};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct CourseService {
    course_repo: Arc<CourseRepository>,
    lesson_repo: Arc<LessonRepository>,
    segment_repo: Arc<SegmentRepository>,
    storage: Arc<MediaStorage>,
    narration: Arc<NarrationService>,
}

impl CourseService {
    pub fn new(
        course_repo: Arc<CourseRepository>,
        lesson_repo: Arc<LessonRepository>,
        segment_repo: Arc<SegmentRepository>,
        storage: Arc<MediaStorage>,
        narration: Arc<NarrationService>,
    ) -> Self {
        Self {
            course_repo,
            lesson_repo,
            segment_repo,
            storage,
            narration,
        }
    }
}

#[async_trait]
pub trait CourseServiceApi: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<CourseResponse>, CourseServiceError>;

    async fn get_course(&self, course_id: i64) -> Result<CourseResponse, CourseServiceError>;

    async fn create_course(
        &self,
        request: CreateCourseRequest,
    ) -> Result<CourseResponse, CourseServiceError>;

    async fn update_course(
        &self,
        course_id: i64,
        request: UpdateCourseRequest,
    ) -> Result<CourseResponse, CourseServiceError>;

    async fn delete_course(&self, course_id: i64) -> Result<(), CourseServiceError>;

    /// Store an uploaded course icon and attach it with a targeted update.
    async fn set_course_icon(
        &self,
        course_id: i64,
        original_filename: Option<String>,
        data: Vec<u8>,
    ) -> Result<CourseResponse, CourseServiceError>;

    async fn list_lessons(&self, course_id: i64) -> Result<Vec<LessonResponse>, CourseServiceError>;

    async fn create_lesson(
        &self,
        course_id: i64,
        request: CreateLessonRequest,
    ) -> Result<LessonResponse, CourseServiceError>;

    async fn update_lesson(
        &self,
        lesson_id: i64,
        request: UpdateLessonRequest,
    ) -> Result<LessonResponse, CourseServiceError>;

    async fn delete_lesson(&self, lesson_id: i64) -> Result<(), CourseServiceError>;

    async fn list_segments(
        &self,
        lesson_id: i64,
    ) -> Result<Vec<SegmentResponse>, CourseServiceError>;

    async fn create_segment(
        &self,
        lesson_id: i64,
        request: CreateSegmentRequest,
    ) -> Result<SegmentResponse, CourseServiceError>;

    async fn update_segment(
        &self,
        segment_id: i64,
        request: UpdateSegmentRequest,
    ) -> Result<SegmentResponse, CourseServiceError>;

    async fn delete_segment(&self, segment_id: i64) -> Result<(), CourseServiceError>;

    /// The per-lesson playback document consumed by the client-side player.
    async fn lesson_player(
        &self,
        lesson_id: i64,
    ) -> Result<LessonPlayerResponse, CourseServiceError>;
}

#[async_trait]
impl CourseServiceApi for CourseService {
    async fn list_courses(&self) -> Result<Vec<CourseResponse>, CourseServiceError> {
        let courses = self
            .course_repo
            .find_all()
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    async fn get_course(&self, course_id: i64) -> Result<CourseResponse, CourseServiceError> {
        let course = self
            .course_repo
            .find_by_id(course_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("course"))?;
        Ok(course.into())
    }

    async fn create_course(
        &self,
        request: CreateCourseRequest,
    ) -> Result<CourseResponse, CourseServiceError> {
        if request.title.trim().is_empty() {
            return Err(CourseServiceError::Invalid("title must not be empty".to_string()));
        }

        let course = self
            .course_repo
            .create(&request.title, &request.description)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;

        self.sync_course_narration(None, &course).await;

        Ok(self.refreshed_course(course).await.into())
    }

    async fn update_course(
        &self,
        course_id: i64,
        request: UpdateCourseRequest,
    ) -> Result<CourseResponse, CourseServiceError> {
        if request.title.trim().is_empty() {
            return Err(CourseServiceError::Invalid("title must not be empty".to_string()));
        }

        let previous = self.previous_course(course_id).await;

        let updated = self
            .course_repo
            .update(course_id, &request.title, &request.description)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        if !updated {
            return Err(CourseServiceError::NotFound("course"));
        }

        let current = self
            .course_repo
            .find_by_id(course_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("course"))?;

        self.sync_course_narration(previous.as_ref(), &current).await;

        Ok(self.refreshed_course(current).await.into())
    }

    async fn delete_course(&self, course_id: i64) -> Result<(), CourseServiceError> {
        let deleted = self
            .course_repo
            .delete(course_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(CourseServiceError::NotFound("course"));
        }
        Ok(())
    }

    async fn set_course_icon(
        &self,
        course_id: i64,
        original_filename: Option<String>,
        data: Vec<u8>,
    ) -> Result<CourseResponse, CourseServiceError> {
        if data.is_empty() {
            return Err(CourseServiceError::Invalid("empty icon upload".to_string()));
        }

        let course = self
            .course_repo
            .find_by_id(course_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("course"))?;

        let extension = original_filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
            .filter(|ext| !ext.is_empty() && ext.chars().all(char::is_alphanumeric))
            .unwrap_or_else(|| "png".to_string());
        let filename = format!("course_{}_{}.{}", course.id, Uuid::new_v4().simple(), extension);

        let relative = self
            .storage
            .store(MediaDir::CourseIcons, &filename, &data)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;

        self.course_repo
            .set_icon(course.id, &relative)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;

        Ok(self.refreshed_course(course).await.into())
    }

    async fn list_lessons(
        &self,
        course_id: i64,
    ) -> Result<Vec<LessonResponse>, CourseServiceError> {
        self.verify_course_exists(course_id).await?;
        let lessons = self
            .lesson_repo
            .find_by_course(course_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        Ok(lessons.into_iter().map(LessonResponse::from).collect())
    }

    async fn create_lesson(
        &self,
        course_id: i64,
        request: CreateLessonRequest,
    ) -> Result<LessonResponse, CourseServiceError> {
        if request.title.trim().is_empty() {
            return Err(CourseServiceError::Invalid("title must not be empty".to_string()));
        }
        self.verify_course_exists(course_id).await?;

        let lesson = self
            .lesson_repo
            .create(course_id, &request.title, request.position)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;

        self.sync_lesson_narration(None, &lesson).await;

        Ok(self.refreshed_lesson(lesson).await.into())
    }

    async fn update_lesson(
        &self,
        lesson_id: i64,
        request: UpdateLessonRequest,
    ) -> Result<LessonResponse, CourseServiceError> {
        if request.title.trim().is_empty() {
            return Err(CourseServiceError::Invalid("title must not be empty".to_string()));
        }

        let previous = self.previous_lesson(lesson_id).await;

        let updated = self
            .lesson_repo
            .update(lesson_id, &request.title, request.position)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        if !updated {
            return Err(CourseServiceError::NotFound("lesson"));
        }

        let current = self
            .lesson_repo
            .find_by_id(lesson_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("lesson"))?;

        self.sync_lesson_narration(previous.as_ref(), &current).await;

        Ok(self.refreshed_lesson(current).await.into())
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<(), CourseServiceError> {
        let deleted = self
            .lesson_repo
            .delete(lesson_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(CourseServiceError::NotFound("lesson"));
        }
        Ok(())
    }

    async fn list_segments(
        &self,
        lesson_id: i64,
    ) -> Result<Vec<SegmentResponse>, CourseServiceError> {
        self.verify_lesson_exists(lesson_id).await?;
        let segments = self
            .segment_repo
            .find_by_lesson(lesson_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        Ok(segments.into_iter().map(SegmentResponse::from).collect())
    }

    async fn create_segment(
        &self,
        lesson_id: i64,
        request: CreateSegmentRequest,
    ) -> Result<SegmentResponse, CourseServiceError> {
        if request.text.trim().is_empty() {
            return Err(CourseServiceError::Invalid("text must not be empty".to_string()));
        }
        self.verify_lesson_exists(lesson_id).await?;

        let segment = self
            .segment_repo
            .create(
                lesson_id,
                request.position,
                request.kind,
                &request.text,
                request.error_text.as_deref(),
                request.key_label.as_deref(),
            )
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;

        self.sync_segment_narration(None, &segment).await;

        Ok(self.refreshed_segment(segment).await.into())
    }

    async fn update_segment(
        &self,
        segment_id: i64,
        request: UpdateSegmentRequest,
    ) -> Result<SegmentResponse, CourseServiceError> {
        if request.text.trim().is_empty() {
            return Err(CourseServiceError::Invalid("text must not be empty".to_string()));
        }

        let previous = self.previous_segment(segment_id).await;

        let updated = self
            .segment_repo
            .update(
                segment_id,
                request.position,
                request.kind,
                &request.text,
                request.error_text.as_deref(),
                request.key_label.as_deref(),
            )
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        if !updated {
            return Err(CourseServiceError::NotFound("segment"));
        }

        let current = self
            .segment_repo
            .find_by_id(segment_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("segment"))?;

        self.sync_segment_narration(previous.as_ref(), &current).await;

        Ok(self.refreshed_segment(current).await.into())
    }

    async fn delete_segment(&self, segment_id: i64) -> Result<(), CourseServiceError> {
        let deleted = self
            .segment_repo
            .delete(segment_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(CourseServiceError::NotFound("segment"));
        }
        Ok(())
    }

    async fn lesson_player(
        &self,
        lesson_id: i64,
    ) -> Result<LessonPlayerResponse, CourseServiceError> {
        let lesson = self
            .lesson_repo
            .find_by_id(lesson_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("lesson"))?;

        let segments = self
            .segment_repo
            .find_by_lesson(lesson_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?;

        Ok(LessonPlayerResponse {
            id: lesson.id,
            title: lesson.title,
            audio_url: lesson
                .audio_file
                .as_deref()
                .map(crate::infrastructure::storage::media_url),
            segments: segments.into_iter().map(PlayerSegment::from).collect(),
        })
    }
}

impl CourseService {
    async fn verify_course_exists(&self, course_id: i64) -> Result<(), CourseServiceError> {
        self.course_repo
            .find_by_id(course_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("course"))?;
        Ok(())
    }

    async fn verify_lesson_exists(&self, lesson_id: i64) -> Result<(), CourseServiceError> {
        self.lesson_repo
            .find_by_id(lesson_id)
            .await
            .map_err(|e| CourseServiceError::Dependency(e.to_string()))?
            .ok_or(CourseServiceError::NotFound("lesson"))?;
        Ok(())
    }

    /// Pre-save snapshots. Lookup failures are logged and treated as "no
    /// previous value", forcing regeneration downstream.
    async fn previous_course(&self, course_id: i64) -> Option<Course> {
        match self.course_repo.find_by_id(course_id).await {
            Ok(course) => course,
            Err(e) => {
                tracing::warn!(error = %e, course_id, "Pre-save course lookup failed");
                None
            }
        }
    }

    async fn previous_lesson(&self, lesson_id: i64) -> Option<Lesson> {
        match self.lesson_repo.find_by_id(lesson_id).await {
            Ok(lesson) => lesson,
            Err(e) => {
                tracing::warn!(error = %e, lesson_id, "Pre-save lesson lookup failed");
                None
            }
        }
    }

    async fn previous_segment(&self, segment_id: i64) -> Option<LessonSegment> {
        match self.segment_repo.find_by_id(segment_id).await {
            Ok(segment) => segment,
            Err(e) => {
                tracing::warn!(error = %e, segment_id, "Pre-save segment lookup failed");
                None
            }
        }
    }

    async fn refreshed_course(&self, fallback: Course) -> Course {
        match self.course_repo.find_by_id(fallback.id).await {
            Ok(Some(course)) => course,
            _ => fallback,
        }
    }

    async fn refreshed_lesson(&self, fallback: Lesson) -> Lesson {
        match self.lesson_repo.find_by_id(fallback.id).await {
            Ok(Some(lesson)) => lesson,
            _ => fallback,
        }
    }

    async fn refreshed_segment(&self, fallback: LessonSegment) -> LessonSegment {
        match self.segment_repo.find_by_id(fallback.id).await {
            Ok(Some(segment)) => segment,
            _ => fallback,
        }
    }

    async fn sync_course_narration(&self, previous: Option<&Course>, course: &Course) {
        let intro = templates::course_intro(&course.title, &course.description);
        let previous_intro =
            previous.map(|p| templates::course_intro(&p.title, &p.description));
        if !should_regenerate(previous_intro.as_deref(), &intro, course.audio_file.is_some()) {
            return;
        }

        let generated = self
            .narration
            .generate(&intro, &format!("course_{}.mp3", course.id), MediaDir::CourseAudio)
            .await;

        let mut failed = generated.is_none();
        if let Some(path) = generated {
            if let Err(e) = self.course_repo.set_audio_file(course.id, &path).await {
                tracing::warn!(error = %e, course_id = course.id, "Failed to attach course audio");
                failed = true;
            }
        }

        let status = if failed {
            NarrationStatus::Failed
        } else {
            NarrationStatus::Ready
        };
        if let Err(e) = self.course_repo.set_narration_status(course.id, status).await {
            tracing::warn!(error = %e, course_id = course.id, "Failed to record narration status");
        }
    }

    async fn sync_lesson_narration(&self, previous: Option<&Lesson>, lesson: &Lesson) {
        let intro = templates::lesson_intro(&lesson.title);
        let previous_intro = previous.map(|p| templates::lesson_intro(&p.title));
        if !should_regenerate(previous_intro.as_deref(), &intro, lesson.audio_file.is_some()) {
            return;
        }

        let generated = self
            .narration
            .generate(&intro, &format!("lesson_{}.mp3", lesson.id), MediaDir::LessonAudio)
            .await;

        let mut failed = generated.is_none();
        if let Some(path) = generated {
            if let Err(e) = self.lesson_repo.set_audio_file(lesson.id, &path).await {
                tracing::warn!(error = %e, lesson_id = lesson.id, "Failed to attach lesson audio");
                failed = true;
            }
        }

        let status = if failed {
            NarrationStatus::Failed
        } else {
            NarrationStatus::Ready
        };
        if let Err(e) = self.lesson_repo.set_narration_status(lesson.id, status).await {
            tracing::warn!(error = %e, lesson_id = lesson.id, "Failed to record narration status");
        }
    }

    /// Segments carry two independent (text, audio) pairs: the primary text
    /// and the optional error text. Each is evaluated and attempted on its
    /// own; one pair's failure does not prevent the other.
    async fn sync_segment_narration(&self, previous: Option<&LessonSegment>, segment: &LessonSegment) {
        let mut attempted = 0usize;
        let mut failed = 0usize;

        let previous_text = previous.map(|p| p.text.as_str());
        if should_regenerate(previous_text, &segment.text, segment.audio_file.is_some()) {
            attempted += 1;
            let generated = self
                .narration
                .generate(
                    &segment.text,
                    &format!("seg_{}.mp3", segment.id),
                    MediaDir::SegmentAudio,
                )
                .await;
            match generated {
                Some(path) => {
                    if let Err(e) = self.segment_repo.set_audio_file(segment.id, &path).await {
                        tracing::warn!(error = %e, segment_id = segment.id, "Failed to attach segment audio");
                        failed += 1;
                    }
                }
                None => failed += 1,
            }
        }

        let error_text = segment.error_text.as_deref().unwrap_or("");
        let previous_error = previous.and_then(|p| p.error_text.as_deref());
        if should_regenerate(previous_error, error_text, segment.error_audio_file.is_some()) {
            attempted += 1;
            let generated = self
                .narration
                .generate(
                    error_text,
                    &format!("seg_err_{}.mp3", segment.id),
                    MediaDir::SegmentErrorAudio,
                )
                .await;
            match generated {
                Some(path) => {
                    if let Err(e) = self
                        .segment_repo
                        .set_error_audio_file(segment.id, &path)
                        .await
                    {
                        tracing::warn!(error = %e, segment_id = segment.id, "Failed to attach segment error audio");
                        failed += 1;
                    }
                }
                None => failed += 1,
            }
        }

        if attempted > 0 {
            let status = if failed > 0 {
                NarrationStatus::Failed
            } else {
                NarrationStatus::Ready
            };
            if let Err(e) = self.segment_repo.set_narration_status(segment.id, status).await {
                tracing::warn!(error = %e, segment_id = segment.id, "Failed to record narration status");
            }
        }
    }
}

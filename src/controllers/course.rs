use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::domain::course::{
    CourseResponse, CreateCourseRequest, CreateLessonRequest, CreateSegmentRequest,
    LessonPlayerResponse, LessonResponse, SegmentResponse, UpdateCourseRequest,
    UpdateLessonRequest, UpdateSegmentRequest,
};
use crate::{
    domain::course::{CourseService, CourseServiceApi},
    error::{AppError, AppResult},
};

pub struct CourseController {
    course_service: Arc<CourseService>,
}

impl CourseController {
    pub fn new(course_service: Arc<CourseService>) -> Self {
        Self { course_service }
    }

    /// GET /api/courses - List courses
    pub async fn list_courses(
        State(controller): State<Arc<CourseController>>,
    ) -> AppResult<Json<Vec<CourseResponse>>> {
        let courses = controller.course_service.list_courses().await?;
        Ok(Json(courses))
    }

    /// POST /api/courses - Create course and narrate its intro
    pub async fn create_course(
        State(controller): State<Arc<CourseController>>,
        Json(request): Json<CreateCourseRequest>,
    ) -> AppResult<(StatusCode, Json<CourseResponse>)> {
        let course = controller.course_service.create_course(request).await?;
        Ok((StatusCode::CREATED, Json(course)))
    }

    /// GET /api/courses/{courseId} - Fetch one course
    pub async fn get_course(
        State(controller): State<Arc<CourseController>>,
        Path(course_id): Path<i64>,
    ) -> AppResult<Json<CourseResponse>> {
        let course = controller.course_service.get_course(course_id).await?;
        Ok(Json(course))
    }

    /// PUT /api/courses/{courseId} - Update course
    pub async fn update_course(
        State(controller): State<Arc<CourseController>>,
        Path(course_id): Path<i64>,
        Json(request): Json<UpdateCourseRequest>,
    ) -> AppResult<Json<CourseResponse>> {
        let course = controller
            .course_service
            .update_course(course_id, request)
            .await?;
        Ok(Json(course))
    }

    /// DELETE /api/courses/{courseId} - Delete course and everything under it
    pub async fn delete_course(
        State(controller): State<Arc<CourseController>>,
        Path(course_id): Path<i64>,
    ) -> AppResult<StatusCode> {
        controller.course_service.delete_course(course_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// PUT /api/courses/{courseId}/icon - Upload a course icon.
    /// Multipart field: `icon` (file, required).
    pub async fn upload_icon(
        State(controller): State<Arc<CourseController>>,
        Path(course_id): Path<i64>,
        mut multipart: Multipart,
    ) -> AppResult<Json<CourseResponse>> {
        let mut original_filename: Option<String> = None;
        let mut data: Option<Vec<u8>> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
        {
            let name = field.name().map(str::to_string);
            if name.as_deref() == Some("icon") {
                original_filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid icon upload: {e}")))?;
                data = Some(bytes.to_vec());
            }
        }

        let data = data.ok_or_else(|| AppError::BadRequest("missing icon field".to_string()))?;

        let course = controller
            .course_service
            .set_course_icon(course_id, original_filename, data)
            .await?;
        Ok(Json(course))
    }

    /// GET /api/courses/{courseId}/lessons - Lessons in playback order
    pub async fn list_lessons(
        State(controller): State<Arc<CourseController>>,
        Path(course_id): Path<i64>,
    ) -> AppResult<Json<Vec<LessonResponse>>> {
        let lessons = controller.course_service.list_lessons(course_id).await?;
        Ok(Json(lessons))
    }

    /// POST /api/courses/{courseId}/lessons - Create lesson and narrate its intro
    pub async fn create_lesson(
        State(controller): State<Arc<CourseController>>,
        Path(course_id): Path<i64>,
        Json(request): Json<CreateLessonRequest>,
    ) -> AppResult<(StatusCode, Json<LessonResponse>)> {
        let lesson = controller
            .course_service
            .create_lesson(course_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(lesson)))
    }

    /// PUT /api/lessons/{lessonId} - Update lesson
    pub async fn update_lesson(
        State(controller): State<Arc<CourseController>>,
        Path(lesson_id): Path<i64>,
        Json(request): Json<UpdateLessonRequest>,
    ) -> AppResult<Json<LessonResponse>> {
        let lesson = controller
            .course_service
            .update_lesson(lesson_id, request)
            .await?;
        Ok(Json(lesson))
    }

    /// DELETE /api/lessons/{lessonId} - Delete lesson
    pub async fn delete_lesson(
        State(controller): State<Arc<CourseController>>,
        Path(lesson_id): Path<i64>,
    ) -> AppResult<StatusCode> {
        controller.course_service.delete_lesson(lesson_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/lessons/{lessonId}/segments - Segments in playback order
    pub async fn list_segments(
        State(controller): State<Arc<CourseController>>,
        Path(lesson_id): Path<i64>,
    ) -> AppResult<Json<Vec<SegmentResponse>>> {
        let segments = controller.course_service.list_segments(lesson_id).await?;
        Ok(Json(segments))
    }

    /// POST /api/lessons/{lessonId}/segments - Create segment and narrate it
    pub async fn create_segment(
        State(controller): State<Arc<CourseController>>,
        Path(lesson_id): Path<i64>,
        Json(request): Json<CreateSegmentRequest>,
    ) -> AppResult<(StatusCode, Json<SegmentResponse>)> {
        let segment = controller
            .course_service
            .create_segment(lesson_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(segment)))
    }

    /// PUT /api/segments/{segmentId} - Update segment
    pub async fn update_segment(
        State(controller): State<Arc<CourseController>>,
        Path(segment_id): Path<i64>,
        Json(request): Json<UpdateSegmentRequest>,
    ) -> AppResult<Json<SegmentResponse>> {
        let segment = controller
            .course_service
            .update_segment(segment_id, request)
            .await?;
        Ok(Json(segment))
    }

    /// DELETE /api/segments/{segmentId} - Delete segment
    pub async fn delete_segment(
        State(controller): State<Arc<CourseController>>,
        Path(segment_id): Path<i64>,
    ) -> AppResult<StatusCode> {
        controller.course_service.delete_segment(segment_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/lessons/{lessonId}/player - Playback document for the lesson
    pub async fn lesson_player(
        State(controller): State<Arc<CourseController>>,
        Path(lesson_id): Path<i64>,
    ) -> AppResult<Json<LessonPlayerResponse>> {
        let player = controller.course_service.lesson_player(lesson_id).await?;
        Ok(Json(player))
    }
}

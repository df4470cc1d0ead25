use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::controllers::{course::CourseController, exam::ExamController, health};
use crate::infrastructure::db::DbPool;

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId};

/// Build the full application router. Kept separate from the listener so
/// tests can serve it on an ephemeral port.
pub fn build_router(
    pool: Arc<DbPool>,
    media_root: &Path,
    exam_controller: Arc<ExamController>,
    course_controller: Arc<CourseController>,
) -> Router {
    let exam_routes = Router::new()
        .route(
            "/api/exams",
            get(ExamController::list_exams).post(ExamController::create_exam),
        )
        .route(
            "/api/exams/:examId",
            get(ExamController::get_exam)
                .put(ExamController::update_exam)
                .delete(ExamController::delete_exam),
        )
        .route(
            "/api/exams/:examId/questions",
            get(ExamController::list_questions).post(ExamController::create_question),
        )
        .route(
            "/api/questions/:questionId",
            put(ExamController::update_question).delete(ExamController::delete_question),
        )
        .route(
            "/api/questions/:questionId/responses",
            get(ExamController::list_responses).post(ExamController::submit_response),
        )
        .with_state(exam_controller);

    let course_routes = Router::new()
        .route(
            "/api/courses",
            get(CourseController::list_courses).post(CourseController::create_course),
        )
        .route(
            "/api/courses/:courseId",
            get(CourseController::get_course)
                .put(CourseController::update_course)
                .delete(CourseController::delete_course),
        )
        .route(
            "/api/courses/:courseId/icon",
            put(CourseController::upload_icon),
        )
        .route(
            "/api/courses/:courseId/lessons",
            get(CourseController::list_lessons).post(CourseController::create_lesson),
        )
        .route(
            "/api/lessons/:lessonId",
            put(CourseController::update_lesson).delete(CourseController::delete_lesson),
        )
        .route(
            "/api/lessons/:lessonId/segments",
            get(CourseController::list_segments).post(CourseController::create_segment),
        )
        .route(
            "/api/lessons/:lessonId/player",
            get(CourseController::lesson_player),
        )
        .route(
            "/api/segments/:segmentId",
            put(CourseController::update_segment).delete(CourseController::delete_segment),
        )
        .with_state(course_controller);

    // Generated narration and uploaded answers are served straight from disk
    let media_routes = Router::new().nest_service("/media", ServeDir::new(media_root));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(exam_routes)
        .merge(course_routes)
        .merge(media_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    host: &str,
    port: u16,
    media_root: &Path,
    exam_controller: Arc<ExamController>,
    course_controller: Arc<CourseController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, media_root, exam_controller, course_controller);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

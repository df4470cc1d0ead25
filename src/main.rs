use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use examvoice_backend::infrastructure::config::{Config, LogFormat};
use examvoice_backend::infrastructure::db::{check_connection, create_pool};
use examvoice_backend::infrastructure::http::start_http_server;
use examvoice_backend::infrastructure::storage::MediaStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting ExamVoice Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    // Apply pending migrations
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations applied");

    // Create AWS Polly client
    tracing::info!(
        "Initializing AWS Polly client with region: {}",
        config.aws_region
    );

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;
    let polly_client = aws_sdk_polly::Client::new(&aws_config);
    tracing::info!("AWS Polly client initialized");

    let pool = Arc::new(pool);
    let config = Arc::new(config);
    let polly_client = Arc::new(polly_client);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    let exam_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::ExamRepository::new(pool.clone()),
    );
    let question_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::QuestionRepository::new(pool.clone()),
    );
    let response_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::ResponseRepository::new(pool.clone()),
    );
    let user_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::UserRepository::new(pool.clone()),
    );
    let course_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::CourseRepository::new(pool.clone()),
    );
    let lesson_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::LessonRepository::new(pool.clone()),
    );
    let segment_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::SegmentRepository::new(pool.clone()),
    );
    let tts_repo = Arc::new(
        examvoice_backend::infrastructure::repositories::PollyTtsRepository::new(polly_client),
    );

    // 2. Instantiate storage and the narration pipeline
    let storage = Arc::new(MediaStorage::new(config.media_root.clone()));
    let narration = Arc::new(examvoice_backend::domain::narration::NarrationService::new(
        tts_repo,
        storage.clone(),
        config.tts_voice_id.clone(),
    ));

    // 3. Instantiate services (inject repositories, storage and narration)
    let exam_service = Arc::new(examvoice_backend::domain::exam::ExamService::new(
        exam_repo,
        question_repo,
        response_repo,
        user_repo,
        storage.clone(),
        narration.clone(),
    ));
    let course_service = Arc::new(examvoice_backend::domain::course::CourseService::new(
        course_repo,
        lesson_repo,
        segment_repo,
        storage.clone(),
        narration,
    ));

    // 4. Instantiate controllers (inject services)
    let exam_controller = Arc::new(examvoice_backend::controllers::exam::ExamController::new(
        exam_service,
    ));
    let course_controller = Arc::new(
        examvoice_backend::controllers::course::CourseController::new(course_service),
    );

    // Start HTTP server with all routes
    start_http_server(
        pool,
        &config.host,
        config.port,
        Path::new(&config.media_root),
        exam_controller,
        course_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    // Verbose defaults in development, quiet in production; RUST_LOG
    // overrides both.
    let default_filter = if config.is_development() {
        "examvoice_backend=debug,tower_http=debug"
    } else {
        "examvoice_backend=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

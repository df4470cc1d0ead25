pub mod course_repository;
pub mod exam_repository;
pub mod lesson_repository;
pub mod polly_tts_repository;
pub mod question_repository;
pub mod response_repository;
pub mod segment_repository;
pub mod tts_repository;
pub mod user_repository;

pub use course_repository::CourseRepository;
pub use exam_repository::ExamRepository;
pub use lesson_repository::LessonRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use question_repository::QuestionRepository;
pub use response_repository::ResponseRepository;
pub use segment_repository::SegmentRepository;
pub use tts_repository::TtsRepository;
pub use user_repository::UserRepository;

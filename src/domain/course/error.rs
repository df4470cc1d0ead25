use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum CourseServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<CourseServiceError> for AppError {
    fn from(err: CourseServiceError) -> Self {
        match err {
            CourseServiceError::Invalid(msg) => AppError::BadRequest(msg),
            CourseServiceError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            CourseServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}

use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ExamServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<ExamServiceError> for AppError {
    fn from(err: ExamServiceError) -> Self {
        match err {
            ExamServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ExamServiceError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            ExamServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}

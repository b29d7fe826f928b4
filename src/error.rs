use thiserror::Error;

use crate::disclosure::ConsentError;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConsentError> for AppError {
    fn from(err: ConsentError) -> Self {
        match err {
            ConsentError::NoDocumentSelected => AppError::Validation(err.to_string()),
            ConsentError::UnknownRequest(_) => AppError::NotFound(err.to_string()),
            ConsentError::UnknownDocument(_) | ConsentError::InvalidDuration(_) => {
                AppError::BadRequest(err.to_string())
            }
            ConsentError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
        }
    }
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

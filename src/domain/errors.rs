use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

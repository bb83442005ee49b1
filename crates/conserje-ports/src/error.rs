use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("not found")]
    NotFound,
    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Errors surfaced to the presentation layer through the inbound traits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeskError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("operation not permitted for this account")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Rejected(String),
    #[error("internal error: {0}")]
    Internal(String),
}

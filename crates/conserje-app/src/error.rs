use conserje_core::calendar::DateError;
use conserje_core::error::DomainError;
use conserje_ports::error::{DeskError, PortError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("date error: {0}")]
    Date(#[from] DateError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("operation not permitted for this account")]
    Forbidden,
    #[error("invalid time: {0}")]
    InvalidTime(String),
}

impl From<AppError> for DeskError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => DeskError::Rejected(e.to_string()),
            AppError::Date(e) => DeskError::Rejected(e.to_string()),
            AppError::Port(PortError::NotFound) => DeskError::NotFound,
            AppError::Port(e) => DeskError::Internal(e.to_string()),
            AppError::InvalidCredentials => DeskError::InvalidCredentials,
            AppError::Forbidden => DeskError::Forbidden,
            AppError::InvalidTime(t) => DeskError::Rejected(format!("invalid time: {t}")),
        }
    }
}

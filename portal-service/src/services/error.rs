use crate::store::StoreError;
use portal_core::error::AppError;
use thiserror::Error;

/// Error taxonomy for the portal's auth and data services.
///
/// Unknown phone and wrong password deliberately collapse into the same
/// `InvalidCredentials` message to avoid account enumeration.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Phone and password are required")]
    MissingCredentials,

    #[error("Invalid phone number or password")]
    InvalidCredentials,

    #[error("Your account has been deactivated. Contact Super Admin.")]
    AccountDisabled,

    #[error("Password not set. Contact Super Admin.")]
    NotProvisioned,

    #[error("Admin token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Admin account not found or inactive")]
    AccountNotFound,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid action")]
    InvalidAction,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingCredentials
            | ServiceError::InvalidAction => AppError::BadRequest(anyhow::anyhow!("{}", err)),
            ServiceError::Validation(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ServiceError::InvalidCredentials
            | ServiceError::AccountDisabled
            | ServiceError::NotProvisioned
            | ServiceError::MissingToken
            | ServiceError::InvalidToken
            | ServiceError::TokenExpired
            | ServiceError::AccountNotFound => AppError::AuthError(anyhow::anyhow!("{}", err)),
            ServiceError::Forbidden(msg) => AppError::Forbidden(anyhow::anyhow!(msg)),
            ServiceError::NotFound(msg) => AppError::NotFound(anyhow::anyhow!(msg)),
            ServiceError::Conflict(msg) => AppError::Conflict(anyhow::anyhow!(msg)),
            ServiceError::Database(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}

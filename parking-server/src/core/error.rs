use thiserror::Error;

use crate::auth::CredentialError;

/// Errors that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid admin credentials: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server startup
pub type Result<T> = std::result::Result<T, ServerError>;

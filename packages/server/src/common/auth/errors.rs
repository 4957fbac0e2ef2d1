use thiserror::Error;

/// Authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Admin access required for {0}")]
    AdminRequired(String),

    #[error("Invalid or expired token")]
    InvalidToken,
}

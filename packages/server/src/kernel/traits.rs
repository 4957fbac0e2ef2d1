// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseEmailSender)

use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Email Trait (Infrastructure - outgoing notifications)
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait BaseEmailSender: Send + Sync {
    /// Send a plain-text email
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

//! Pass-level errors.

use haven_turn::ProviderError;
use thiserror::Error;

/// Errors that abort a routing pass.
///
/// Recoverable capability failures never surface here; they become tool
/// events instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PassError {
    /// The reasoning service failed or returned something unusable.
    #[error("reasoning service error: {0}")]
    ReasoningService(#[from] ProviderError),

    /// A capability hit a defect outside its contract.
    #[error("capability {capability} failed unexpectedly: {message}")]
    Execution {
        /// Name of the capability that failed.
        capability: String,
        /// Description of the defect.
        message: String,
    },
}

impl PassError {
    /// Whether a caller could reasonably retry the whole pass.
    pub fn is_retryable(&self) -> bool {
        match self {
            PassError::ReasoningService(e) => e.is_retryable(),
            PassError::Execution { .. } => false,
        }
    }
}

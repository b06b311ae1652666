//! Error types for capabilities and the registry.

use thiserror::Error;

/// Errors raised by a capability.
///
/// Everything except [`ToolError::Defect`] is part of a capability's
/// contract and is recovered into a tool result; a defect aborts the pass.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ToolError {
    /// No capability with this name is registered.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// Arguments did not satisfy the parameter contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A lookup found nothing to work with (e.g. geocoding had no match).
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// An external dependency of the capability failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// Unexpected defect not anticipated by the capability's contract.
    #[error("defect: {0}")]
    Defect(String),
}

impl ToolError {
    /// Whether this error must abort the whole pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ToolError::Defect(_))
    }
}

/// Errors raised while building a registry.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two capabilities share a name.
    #[error("duplicate capability name: {0}")]
    Duplicate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_defects_are_fatal() {
        assert!(!ToolError::NotFound("x".into()).is_fatal());
        assert!(!ToolError::InvalidInput("x".into()).is_fatal());
        assert!(!ToolError::Lookup("x".into()).is_fatal());
        assert!(!ToolError::ExecutionFailed("x".into()).is_fatal());
        assert!(ToolError::Defect("x".into()).is_fatal());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(
            ToolError::Lookup("no match for 'Atlantis'".into()).to_string(),
            "lookup failed: no match for 'Atlantis'"
        );
        assert_eq!(
            RegistryError::Duplicate("echo".into()).to_string(),
            "duplicate capability name: echo"
        );
    }
}

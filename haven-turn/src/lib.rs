#![deny(missing_docs)]
//! Reasoning-service boundary for haven.
//!
//! Provides the [`Provider`] trait used to ask a language model for the
//! next step of a routing pass, and the message types that flow across it.
//! Concrete backends (OpenAI-compatible, test stubs) implement [`Provider`].

pub mod convert;
pub mod provider;
pub mod types;

// Re-exports
pub use convert::{assistant_message, parts_to_text, system_message, tool_uses, user_message};
pub use provider::{Provider, ProviderError};
pub use types::*;

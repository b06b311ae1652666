#![deny(missing_docs)]
//! OpenAI-compatible Chat Completions provider for haven.
//!
//! Implements [`haven_turn::Provider`] against any endpoint speaking the
//! Chat Completions wire format: OpenAI itself, Groq
//! ([`GROQ_BASE_URL`]), or a local gateway.
//!
//! ```no_run
//! use haven_provider_openai::OpenAi;
//!
//! let provider = OpenAi::new("your-api-key").model("gpt-4o-mini");
//! ```

pub mod client;
pub(crate) mod error;
pub mod mapping;

pub use client::{GROQ_BASE_URL, OpenAi};
pub use haven_turn::ProviderError;

#![deny(missing_docs)]
//! Capability registry for haven.
//!
//! A capability is a named handler with a natural-language description of
//! when it applies, an ordered parameter contract, and an async `call`.
//! The [`ToolRegistry`] holds the fixed set of capabilities for a process;
//! it is built once at startup and shared read-only afterwards.

pub mod error;
pub mod registry;
pub mod schema;

use std::future::Future;
use std::pin::Pin;

pub use error::{RegistryError, ToolError};
pub use registry::ToolRegistry;
pub use schema::{ParamKind, Parameter, required_str};

/// Boxed future returned by [`ToolDyn::call`].
pub type ToolFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, ToolError>> + Send + 'a>>;

/// Object-safe capability interface.
///
/// Implementors describe themselves (name, selection criterion, parameters)
/// and execute against a JSON argument object.
pub trait ToolDyn: Send + Sync {
    /// Unique capability name, as presented to the reasoning service.
    fn name(&self) -> &str;

    /// When this capability should be selected.
    fn description(&self) -> &str;

    /// Ordered input contract. Empty for argument-less capabilities.
    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// JSON Schema for the input, derived from [`ToolDyn::parameters`].
    fn input_schema(&self) -> serde_json::Value {
        schema::object_schema(&self.parameters())
    }

    /// Execute the capability.
    fn call(&self, input: serde_json::Value) -> ToolFuture<'_>;
}

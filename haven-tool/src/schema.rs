//! Parameter contracts and their JSON Schema rendering.

use crate::error::ToolError;
use serde::{Deserialize, Serialize};

/// JSON type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A string.
    String,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            ParamKind::String => "string",
        }
    }
}

/// One typed input parameter of a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Argument name.
    pub name: String,
    /// JSON type.
    pub kind: ParamKind,
    /// What the argument means, shown to the reasoning service.
    pub description: String,
    /// Whether the argument must be present.
    pub required: bool,
}

impl Parameter {
    /// A required string parameter.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::String,
            description: description.into(),
            required: true,
        }
    }

    /// Mark the parameter optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Render an ordered parameter list as a JSON Schema object.
pub fn object_schema(params: &[Parameter]) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    for p in params {
        properties.insert(
            p.name.clone(),
            serde_json::json!({
                "type": p.kind.json_type(),
                "description": p.description,
            }),
        );
    }
    let required: Vec<&str> = params
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.as_str())
        .collect();

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Extract a required, non-blank string argument.
pub fn required_str<'a>(input: &'a serde_json::Value, name: &str) -> Result<&'a str, ToolError> {
    match input.get(name) {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
        Some(serde_json::Value::String(_)) => {
            Err(ToolError::InvalidInput(format!("'{name}' must not be empty")))
        }
        Some(other) => Err(ToolError::InvalidInput(format!(
            "'{name}' must be a string, got {other}"
        ))),
        None => Err(ToolError::InvalidInput(format!("missing '{name}'"))),
    }
}

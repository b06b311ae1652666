//! Helpers for building and reading provider messages.

use crate::types::{ContentPart, ProviderMessage, Role};

/// Build a system message carrying a single text part.
pub fn system_message(text: impl Into<String>) -> ProviderMessage {
    ProviderMessage {
        role: Role::System,
        content: vec![ContentPart::Text { text: text.into() }],
    }
}

/// Build a user message carrying a single text part.
pub fn user_message(text: impl Into<String>) -> ProviderMessage {
    ProviderMessage {
        role: Role::User,
        content: vec![ContentPart::Text { text: text.into() }],
    }
}

/// Wrap model output parts as an assistant message.
pub fn assistant_message(parts: Vec<ContentPart>) -> ProviderMessage {
    ProviderMessage {
        role: Role::Assistant,
        content: parts,
    }
}

/// Concatenate the text parts of a response, ignoring tool traffic.
///
/// Returns an empty string when there is no text.
pub fn parts_to_text(parts: &[ContentPart]) -> String {
    parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Extract `(id, name, input)` for every tool-use part, in order.
pub fn tool_uses(parts: &[ContentPart]) -> Vec<(String, String, serde_json::Value)> {
    parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::ToolUse { id, name, input } => {
                Some((id.clone(), name.clone(), input.clone()))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builders_set_roles() {
        assert_eq!(system_message("be kind").role, Role::System);
        assert_eq!(user_message("hello").role, Role::User);
        assert_eq!(assistant_message(vec![]).role, Role::Assistant);
    }

    #[test]
    fn parts_to_text_skips_tool_parts() {
        let parts = vec![
            ContentPart::Text {
                text: "Let me look ".into(),
            },
            ContentPart::ToolUse {
                id: "1".into(),
                name: "x".into(),
                input: json!({}),
            },
            ContentPart::Text {
                text: "that up.".into(),
            },
        ];
        assert_eq!(parts_to_text(&parts), "Let me look that up.");
        assert_eq!(parts_to_text(&[]), "");
    }

    #[test]
    fn tool_uses_preserve_order() {
        let parts = vec![
            ContentPart::ToolUse {
                id: "a".into(),
                name: "first".into(),
                input: json!({}),
            },
            ContentPart::Text { text: "x".into() },
            ContentPart::ToolUse {
                id: "b".into(),
                name: "second".into(),
                input: json!({"k": 1}),
            },
        ];
        let uses = tool_uses(&parts);
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].1, "first");
        assert_eq!(uses[1].0, "b");
        assert_eq!(uses[1].2["k"], 1);
    }
}

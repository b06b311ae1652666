//! Request/response mapping between haven-turn types and the Chat Completions format.
//!
//! Reference: <https://platform.openai.com/docs/api-reference/chat>

use haven_turn::{
    ContentPart, ProviderError, ProviderMessage, ProviderRequest, ProviderResponse, Role,
    StopReason, TokenUsage, ToolSchema,
};

// ─── Request mapping ─────────────────────────────────────────────────────────

/// Convert a [`ProviderRequest`] into the Chat Completions JSON body.
#[must_use]
pub fn to_api_request(req: &ProviderRequest, default_model: &str) -> serde_json::Value {
    let model = req.model.as_deref().unwrap_or(default_model);

    let mut body = serde_json::json!({
        "model": model,
        "messages": map_messages(&req.messages),
    });

    if let Some(max_tokens) = req.max_tokens {
        body["max_tokens"] = serde_json::Value::from(max_tokens);
    }

    if let Some(temp) = req.temperature {
        body["temperature"] = serde_json::Value::from(temp);
    }

    if !req.tools.is_empty() {
        body["tools"] = serde_json::Value::Array(req.tools.iter().map(map_tool_schema).collect());
    }

    body
}

/// Map messages to the Chat Completions array.
///
/// Tool calls ride on the assistant message; each tool result becomes its
/// own `role: "tool"` message.
fn map_messages(messages: &[ProviderMessage]) -> Vec<serde_json::Value> {
    let mut result = Vec::new();

    for msg in messages {
        match msg.role {
            Role::System => {
                result.push(serde_json::json!({
                    "role": "system",
                    "content": joined_text(&msg.content),
                }));
            }
            Role::Assistant => {
                let mut tool_calls = Vec::new();
                for part in &msg.content {
                    if let ContentPart::ToolUse { id, name, input } = part {
                        let arguments = match input {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        tool_calls.push(serde_json::json!({
                            "id": id,
                            "type": "function",
                            "function": {
                                "name": name,
                                "arguments": arguments,
                            },
                        }));
                    }
                }

                let text = joined_text(&msg.content);
                let mut msg_obj = serde_json::json!({ "role": "assistant" });
                msg_obj["content"] = if text.is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::Value::String(text)
                };
                if !tool_calls.is_empty() {
                    msg_obj["tool_calls"] = serde_json::Value::Array(tool_calls);
                }
                result.push(msg_obj);
            }
            Role::User => {
                let text = joined_text(&msg.content);
                if !text.is_empty() {
                    result.push(serde_json::json!({
                        "role": "user",
                        "content": text,
                    }));
                }

                for part in &msg.content {
                    if let ContentPart::ToolResult {
                        tool_use_id,
                        content,
                        ..
                    } = part
                    {
                        result.push(serde_json::json!({
                            "role": "tool",
                            "tool_call_id": tool_use_id,
                            "content": content,
                        }));
                    }
                }
            }
        }
    }

    result
}

fn joined_text(parts: &[ContentPart]) -> String {
    parts
        .iter()
        .filter_map(|p| match p {
            ContentPart::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

fn map_tool_schema(tool: &ToolSchema) -> serde_json::Value {
    serde_json::json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.input_schema,
        },
    })
}

// ─── Response mapping ─────────────────────────────────────────────────────────

/// Parse a Chat Completions response into a [`ProviderResponse`].
///
/// # Errors
///
/// Returns [`ProviderError::InvalidResponse`] if `choices` is missing or empty,
/// or if a tool call carries arguments that are not valid JSON.
pub fn from_api_response(body: &serde_json::Value) -> Result<ProviderResponse, ProviderError> {
    let model = body["model"].as_str().unwrap_or_default().to_string();

    let choice = body["choices"]
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing 'choices' array in response".into())
        })?;

    let message = &choice["message"];
    let mut content = Vec::new();

    if let Some(text) = message["content"].as_str()
        && !text.is_empty()
    {
        content.push(ContentPart::Text {
            text: text.to_string(),
        });
    }

    if let Some(tool_calls) = message["tool_calls"].as_array() {
        for tc in tool_calls {
            let id = tc["id"].as_str().unwrap_or_default().to_string();
            let name = tc["function"]["name"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            // Arguments arrive as a JSON-encoded string; some gateways send an object.
            let input = match &tc["function"]["arguments"] {
                serde_json::Value::String(raw) if raw.trim().is_empty() => {
                    serde_json::Value::Object(serde_json::Map::new())
                }
                serde_json::Value::String(raw) => serde_json::from_str(raw).map_err(|e| {
                    ProviderError::InvalidResponse(format!(
                        "tool call {name} has malformed arguments: {e}"
                    ))
                })?,
                serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
                other => other.clone(),
            };
            content.push(ContentPart::ToolUse { id, name, input });
        }
    }

    let stop_reason = choice["finish_reason"]
        .as_str()
        .map(parse_finish_reason)
        .unwrap_or(StopReason::EndTurn);

    Ok(ProviderResponse {
        content,
        stop_reason,
        usage: parse_usage(&body["usage"]),
        model,
    })
}

fn parse_usage(usage: &serde_json::Value) -> TokenUsage {
    TokenUsage {
        input_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0),
        output_tokens: usage["completion_tokens"].as_u64().unwrap_or(0),
    }
}

fn parse_finish_reason(reason: &str) -> StopReason {
    match reason {
        "stop" => StopReason::EndTurn,
        "tool_calls" | "function_call" => StopReason::ToolUse,
        "length" => StopReason::MaxTokens,
        "content_filter" => StopReason::ContentFilter,
        _ => StopReason::EndTurn,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

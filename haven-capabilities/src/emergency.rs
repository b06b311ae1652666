//! `emergency_call_tool`: dial the safety helpline.

use crate::telephony::Telephony;
use haven_tool::{ToolDyn, ToolError, ToolFuture};
use std::sync::Arc;

/// Capability name.
pub const NAME: &str = "emergency_call_tool";

const DESCRIPTION: &str = "Place an emergency call to the safety helpline's phone number. \
Use this only if the user expresses suicidal ideation, intent to self-harm, \
or describes a mental health emergency requiring immediate help.";

/// Triggers a real phone call. Non-idempotent; takes no arguments and
/// returns nothing.
pub struct EmergencyCallTool {
    telephony: Arc<dyn Telephony>,
}

impl EmergencyCallTool {
    /// Wrap a telephony backend.
    pub fn new(telephony: Arc<dyn Telephony>) -> Self {
        Self { telephony }
    }
}

impl ToolDyn for EmergencyCallTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn call(&self, _input: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let receipt = self
                .telephony
                .place_call()
                .await
                .map_err(|e| ToolError::ExecutionFailed(format!("emergency call failed: {e}")))?;
            tracing::info!(sid = %receipt.sid, "emergency call placed");
            Ok(serde_json::Value::Null)
        })
    }
}

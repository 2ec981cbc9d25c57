use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of executing one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub function: String,
    /// Decoded arguments, regardless of the wire form they arrived in
    pub arguments: Value,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResult {
    pub fn ok(function: impl Into<String>, arguments: Value, payload: Value) -> Self {
        Self {
            function: function.into(),
            arguments,
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failed(function: impl Into<String>, arguments: Value, error: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            arguments,
            success: false,
            payload: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregate outcome of one full command-loop attempt (or of the whole
/// bounded retry, once the controller stamps `attempts`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,
    /// Per-call results in invocation order, possibly empty
    pub results: Vec<CommandResult>,
    /// Gateway attempts consumed; stamped by the controller
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandOutcome {
    /// Failed outcome with no tool invocations, e.g. for a gateway error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: Vec::new(),
            attempts: 0,
            error: Some(error.into()),
        }
    }

    /// Aggregate per-call results: success iff every extracted invocation
    /// was valid and dispatched successfully.
    pub fn from_results(results: Vec<CommandResult>) -> Self {
        let success = !results.is_empty() && results.iter().all(|r| r.success);
        Self {
            success,
            results,
            attempts: 0,
            error: None,
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tool_catalog::ToolSchema;

/// Outgoing chat request. `stream` is always false: a single complete reply
/// is required before interpretation proceeds.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<OutgoingMessage<'a>>,
    pub tools: &'a [ToolSchema],
    pub tool_choice: &'a str,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct OutgoingMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Decoded chat reply. Only the message and its tool invocations matter to
/// the pipeline; everything else in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallWire>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallWire {
    pub function: FunctionCallWire,
}

/// One model invocation as it appears on the wire. `arguments` may arrive as
/// a JSON-encoded string or as an already-structured object; both forms are
/// kept verbatim here and decoded by the interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCallWire {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

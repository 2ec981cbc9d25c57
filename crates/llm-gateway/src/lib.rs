//! llm-gateway: chat-completion client with function calling for motor intent
//!
//! One request carries the fixed system instruction, the user's text and the
//! full tool catalog; the reply carries the model's structured invocations.
//! Every transport, status and decode failure surfaces as a [`GatewayError`]
//! so callers can treat them uniformly as "no usable reply this attempt".

mod error;
pub use error::GatewayError;

mod types;
pub use types::{ChatMessage, ChatReply, FunctionCallWire, ToolCallWire};

mod client;
pub use client::{GatewayConfig, ModelGateway, SYSTEM_PROMPT};

/// Seam for driving the command loop: the production gateway implements it
/// over HTTP, tests implement it with scripted replies.
pub trait RequestIntent {
    fn request_intent(&self, user_text: &str) -> Result<ChatReply, GatewayError>;
}

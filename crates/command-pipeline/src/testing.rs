//! Scripted collaborators shared by the pipeline tests.

use llm_gateway::{ChatMessage, ChatReply, FunctionCallWire, GatewayError, RequestIntent, ToolCallWire};
use motor_registry::{MotorRegistry, DEFAULT_MOTOR_IDS};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub fn simulated_registry() -> MotorRegistry<actuator_link::SimulatedLink> {
    MotorRegistry::simulated(&DEFAULT_MOTOR_IDS)
}

/// A reply whose message carries the given (function, arguments) invocations.
pub fn reply_with_calls(calls: Vec<(&str, Value)>) -> ChatReply {
    let tool_calls = calls
        .into_iter()
        .map(|(name, arguments)| ToolCallWire {
            function: FunctionCallWire {
                name: name.to_string(),
                arguments,
            },
        })
        .collect();
    ChatReply {
        message: ChatMessage {
            content: String::new(),
            tool_calls: Some(tool_calls),
        },
    }
}

/// A reply with free text only, as a model produces when it declines to
/// invoke a tool.
pub fn reply_without_calls(content: &str) -> ChatReply {
    ChatReply {
        message: ChatMessage {
            content: content.to_string(),
            tool_calls: None,
        },
    }
}

/// Gateway that replays a fixed script and counts how often it was asked.
pub struct ScriptedGateway {
    script: RefCell<VecDeque<Result<ChatReply, GatewayError>>>,
    calls: Cell<u32>,
}

impl ScriptedGateway {
    pub fn new(script: Vec<Result<ChatReply, GatewayError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl RequestIntent for ScriptedGateway {
    fn request_intent(&self, _user_text: &str) -> Result<ChatReply, GatewayError> {
        self.calls.set(self.calls.get() + 1);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Decode("script exhausted".to_string())))
    }
}

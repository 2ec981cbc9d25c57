use crate::types::{ChatRequest, OutgoingMessage};
use crate::{ChatReply, GatewayError, RequestIntent};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tool_catalog::ToolSchema;

/// Fixed system instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a motor control assistant. Interpret the \
user's motor-control instruction and invoke the appropriate tool. Always respond \
with a function call, never with free text.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub model: String,
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ping_timeout_secs() -> u64 {
    5
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: "qwen2.5:7b-instruct".to_string(),
            base_url: "http://localhost:11434".to_string(),
            timeout_secs: default_timeout_secs(),
            ping_timeout_secs: default_ping_timeout_secs(),
        }
    }
}

/// Blocking client for an Ollama-compatible chat endpoint.
pub struct ModelGateway {
    config: GatewayConfig,
    tools: Vec<ToolSchema>,
    http: reqwest::blocking::Client,
}

impl ModelGateway {
    pub fn new(config: GatewayConfig, tools: Vec<ToolSchema>) -> Result<Self, GatewayError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        tracing::info!(model = %config.model, url = %config.base_url, "model gateway ready");
        Ok(Self {
            config,
            tools,
            http,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Lightweight reachability check against the service tags endpoint.
    /// Never participates in the command path.
    pub fn ping(&self) -> bool {
        let url = self.endpoint("/api/tags");
        match self
            .http
            .get(url)
            .timeout(Duration::from_secs(self.config.ping_timeout_secs))
            .send()
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::warn!("model service unreachable: {e}");
                false
            }
        }
    }
}

impl RequestIntent for ModelGateway {
    /// One blocking round-trip: system prompt + user text + tool catalog in,
    /// a single complete decoded reply out. The model decides autonomously
    /// whether to invoke a tool; no partial output is accepted.
    fn request_intent(&self, user_text: &str) -> Result<ChatReply, GatewayError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                OutgoingMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                OutgoingMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            tools: &self.tools,
            tool_choice: "auto",
            stream: false,
        };

        let response = self
            .http
            .post(self.endpoint("/api/chat"))
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }

        response
            .json::<ChatReply>()
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

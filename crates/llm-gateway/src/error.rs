use thiserror::Error;

/// Anything that prevents obtaining one complete decoded reply.
///
/// All variants are retryable at the whole-request level; none of them is
/// allowed to escape the gateway boundary as a panic.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed reply body: {0}")]
    Decode(String),
}

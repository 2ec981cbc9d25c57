use thiserror::Error;

pub type Result<T, E = LinkError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),
    #[error("operation not supported on this backend: {0}")]
    Unsupported(&'static str),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("timeout waiting for actuator reply")]
    Timeout,
    #[error("invalid reply frame: {0}")]
    InvalidFrame(&'static str),
}

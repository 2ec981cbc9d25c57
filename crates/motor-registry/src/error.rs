use actuator_link::LinkError;
use thiserror::Error;

pub type Result<T, E = MotorError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MotorError {
    #[error("invalid motor id: {0}")]
    InvalidId(String),
    #[error("link failure on {id}: {source}")]
    Link {
        id: String,
        #[source]
        source: LinkError,
    },
}

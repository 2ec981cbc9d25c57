//! actuator-link: capability interface for controllable rotational actuators
//!
//! This crate provides the trait and types for commanding a single actuator,
//! with feature-gated backends. The default build enables a `mock` backend so
//! that binaries can compile and run on any host without native drivers.

mod types;
pub use types::ActuatorTelemetry;

mod error;
pub use error::{LinkError, Result};

mod traits;
pub use traits::ActuatorLink;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::SimulatedLink;

#[cfg(feature = "rmd-can")]
mod rmd;

#[cfg(feature = "rmd-can")]
pub use rmd::RmdCanLink;

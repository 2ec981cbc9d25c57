//! motor-registry: owned registry of named motors and their actuator links
//!
//! The registry is the only holder of motor state. Every mutation goes
//! through a dispatched action; nothing outside this crate touches a Motor
//! record mutably.

mod types;
pub use types::{Motor, MotorStatus};

mod error;
pub use error::{MotorError, Result};

mod registry;
pub use registry::MotorRegistry;

/// Default motor id set, matching the shipped three-axis rig.
pub const DEFAULT_MOTOR_IDS: [&str; 3] = ["motor_1", "motor_2", "motor_3"];

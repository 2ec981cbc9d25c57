use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One telemetry read-back from an actuator.
///
/// Field meanings follow the RMD status frames: commanded and measured values
/// are as reported by the drive, not re-derived locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActuatorTelemetry {
    /// Winding temperature in degrees Celsius
    pub temperature_c: f64,
    /// Bus voltage in volts
    pub voltage_v: f64,
    /// Torque current in amperes
    pub current_a: f64,
    /// Shaft angle in degrees
    pub shaft_angle_deg: f64,
    /// Shaft speed in degrees per second
    pub shaft_speed_dps: f64,
    /// Whether the holding brake is released
    pub brake_released: bool,
    /// Drive fault code, zero when healthy
    pub error_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<OffsetDateTime>,
}

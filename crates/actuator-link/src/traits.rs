use crate::{ActuatorTelemetry, Result};

/// Capability set of one controllable rotational actuator.
///
/// Implementations are interchangeable behind this trait: a simulated
/// in-memory variant for tests and dry runs, and hardware-backed variants
/// talking to a physical drive. All three operations are synchronous;
/// `move_to` is fire-and-forget with respect to physical settling.
pub trait ActuatorLink {
    /// Command the actuator to a signed absolute target angle (degrees)
    /// at the given speed (degrees per second). Returns as soon as the
    /// drive has accepted the setpoint.
    fn move_to(&mut self, angle_deg: f64, speed_dps: f64) -> Result<()>;

    /// Issue an immediate halt.
    fn stop(&mut self) -> Result<()>;

    /// Read live telemetry from the drive.
    fn read_status(&mut self) -> Result<ActuatorTelemetry>;
}

// Backends are picked at runtime by configuration, so boxed links must be
// usable wherever a concrete link is.
impl<T: ActuatorLink + ?Sized> ActuatorLink for Box<T> {
    fn move_to(&mut self, angle_deg: f64, speed_dps: f64) -> Result<()> {
        (**self).move_to(angle_deg, speed_dps)
    }

    fn stop(&mut self) -> Result<()> {
        (**self).stop()
    }

    fn read_status(&mut self) -> Result<ActuatorTelemetry> {
        (**self).read_status()
    }
}

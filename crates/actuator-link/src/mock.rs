use crate::{ActuatorLink, ActuatorTelemetry, Result};
use time::OffsetDateTime;

/// A simple in-process simulated actuator. Each link instance is independent.
///
/// The simulation does not model settling time: a commanded setpoint is
/// reflected in the next telemetry read immediately.
#[derive(Debug, Default)]
pub struct SimulatedLink {
    angle_deg: f64,
    speed_dps: f64,
    moving: bool,
}

impl SimulatedLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActuatorLink for SimulatedLink {
    fn move_to(&mut self, angle_deg: f64, speed_dps: f64) -> Result<()> {
        self.angle_deg = angle_deg;
        self.speed_dps = speed_dps;
        self.moving = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.moving = false;
        self.speed_dps = 0.0;
        Ok(())
    }

    fn read_status(&mut self) -> Result<ActuatorTelemetry> {
        Ok(ActuatorTelemetry {
            temperature_c: 32.0,
            voltage_v: 24.1,
            current_a: if self.moving { 0.8 } else { 0.05 },
            shaft_angle_deg: self.angle_deg,
            shaft_speed_dps: if self.moving { self.speed_dps } else { 0.0 },
            brake_released: true,
            error_code: 0,
            ts: Some(OffsetDateTime::now_utc()),
        })
    }
}

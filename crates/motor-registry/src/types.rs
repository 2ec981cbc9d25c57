use serde::{Deserialize, Serialize};

/// Commanded state of one motor. `angle` and `speed` are the last applied
/// targets, not measured values; telemetry reads go to the link directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motor {
    pub id: String,
    /// Last commanded target angle in signed degrees
    pub angle: f64,
    /// Last commanded speed in degrees per second
    pub speed: f64,
    pub status: MotorStatus,
}

impl Motor {
    pub fn idle(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            angle: 0.0,
            speed: 0.0,
            status: MotorStatus::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorStatus {
    Idle,
    Moving,
    Stopped,
    Error,
}

impl std::fmt::Display for MotorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MotorStatus::Idle => "idle",
            MotorStatus::Moving => "moving",
            MotorStatus::Stopped => "stopped",
            MotorStatus::Error => "error",
        };
        f.write_str(s)
    }
}

use crate::{Motor, MotorError, MotorStatus, Result};
use actuator_link::ActuatorLink;
use serde_json::{json, Value};
use std::collections::BTreeMap;

struct Slot<L> {
    record: Motor,
    link: L,
}

/// Registry of named motors, polymorphic over the actuator capability set.
///
/// Constructed once at process start from a fixed id list; motors are never
/// added or removed afterwards. All operations are total over the known id
/// set and return a tagged failure for unknown ids.
pub struct MotorRegistry<L: ActuatorLink> {
    motors: BTreeMap<String, Slot<L>>,
}

impl<L: ActuatorLink> MotorRegistry<L> {
    pub fn new(links: impl IntoIterator<Item = (String, L)>) -> Self {
        let motors = links
            .into_iter()
            .map(|(id, link)| {
                let record = Motor::idle(id.clone());
                (id, Slot { record, link })
            })
            .collect();
        Self { motors }
    }

    pub fn ids(&self) -> Vec<String> {
        self.motors.keys().cloned().collect()
    }

    /// Commanded record for one motor, if known.
    pub fn motor(&self, id: &str) -> Option<&Motor> {
        self.motors.get(id).map(|s| &s.record)
    }

    /// Clone of every motor record, for logging and health reporting.
    pub fn snapshot(&self) -> BTreeMap<String, Motor> {
        self.motors
            .iter()
            .map(|(id, s)| (id.clone(), s.record.clone()))
            .collect()
    }

    fn slot_mut(&mut self, id: &str) -> Result<&mut Slot<L>> {
        self.motors
            .get_mut(id)
            .ok_or_else(|| MotorError::InvalidId(id.to_string()))
    }

    /// Command a motor to a signed target angle at the given speed.
    ///
    /// Fire-and-forget with respect to physical settling: the call returns
    /// once the link has accepted the setpoint, with an echo of the applied
    /// target as payload.
    pub fn move_to(&mut self, id: &str, angle: f64, speed: f64) -> Result<Value> {
        let slot = self.slot_mut(id)?;
        tracing::info!(motor = id, angle, speed, "moving motor");
        if let Err(source) = slot.link.move_to(angle, speed) {
            slot.record.status = MotorStatus::Error;
            return Err(MotorError::Link {
                id: id.to_string(),
                source,
            });
        }
        slot.record.angle = angle;
        slot.record.speed = speed;
        slot.record.status = MotorStatus::Moving;
        Ok(json!({
            "motor_id": id,
            "target_angle": angle,
            "speed": speed,
            "message": format!("motor {id} moving to {angle} degrees"),
        }))
    }

    /// Read live telemetry through the link and return it verbatim.
    /// Never mutates the record's commanded fields.
    pub fn status(&mut self, id: &str) -> Result<Value> {
        let slot = self.slot_mut(id)?;
        let telemetry = slot.link.read_status().map_err(|source| MotorError::Link {
            id: id.to_string(),
            source,
        })?;
        Ok(json!({
            "motor_id": id,
            "status": telemetry,
        }))
    }

    /// Issue an immediate halt.
    pub fn stop(&mut self, id: &str) -> Result<Value> {
        let slot = self.slot_mut(id)?;
        tracing::info!(motor = id, "stopping motor");
        if let Err(source) = slot.link.stop() {
            slot.record.status = MotorStatus::Error;
            return Err(MotorError::Link {
                id: id.to_string(),
                source,
            });
        }
        slot.record.status = MotorStatus::Stopped;
        Ok(json!({
            "motor_id": id,
            "message": format!("motor {id} stopped"),
        }))
    }
}

#[cfg(feature = "mock")]
impl MotorRegistry<actuator_link::SimulatedLink> {
    /// Registry backed by simulated links, one per id.
    pub fn simulated(ids: &[&str]) -> Self {
        Self::new(
            ids.iter()
                .map(|id| (id.to_string(), actuator_link::SimulatedLink::new())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MOTOR_IDS;

    #[test]
    fn test_move_updates_record() {
        let mut reg = MotorRegistry::simulated(&DEFAULT_MOTOR_IDS);
        let payload = reg.move_to("motor_2", 45.0, 30.0).unwrap();
        assert_eq!(payload["target_angle"], 45.0);

        let motor = reg.motor("motor_2").unwrap();
        assert_eq!(motor.angle, 45.0);
        assert_eq!(motor.speed, 30.0);
        assert_eq!(motor.status, MotorStatus::Moving);
    }

    #[test]
    fn test_unknown_id_is_tagged_failure() {
        let mut reg = MotorRegistry::simulated(&DEFAULT_MOTOR_IDS);
        for result in [
            reg.move_to("motor_9", 10.0, 10.0),
            reg.status("motor_9"),
            reg.stop("motor_9"),
        ] {
            match result {
                Err(MotorError::InvalidId(id)) => assert_eq!(id, "motor_9"),
                other => panic!("expected InvalidId, got {other:?}"),
            }
        }
        // Known records untouched
        for id in DEFAULT_MOTOR_IDS {
            assert_eq!(reg.motor(id).unwrap().status, MotorStatus::Idle);
        }
    }

    #[test]
    fn test_stop_after_move() {
        let mut reg = MotorRegistry::simulated(&DEFAULT_MOTOR_IDS);
        reg.move_to("motor_1", 90.0, 50.0).unwrap();
        reg.stop("motor_1").unwrap();
        let motor = reg.motor("motor_1").unwrap();
        assert_eq!(motor.status, MotorStatus::Stopped);
        assert_eq!(motor.angle, 90.0);
    }

    #[test]
    fn test_status_does_not_mutate_commanded_fields() {
        let mut reg = MotorRegistry::simulated(&DEFAULT_MOTOR_IDS);
        reg.move_to("motor_3", -45.0, 20.0).unwrap();
        let payload = reg.status("motor_3").unwrap();
        assert_eq!(payload["status"]["shaft_angle_deg"], -45.0);
        let motor = reg.motor("motor_3").unwrap();
        assert_eq!(motor.angle, -45.0);
        assert_eq!(motor.status, MotorStatus::Moving);
    }

    #[test]
    fn test_snapshot_covers_all_ids() {
        let reg = MotorRegistry::simulated(&DEFAULT_MOTOR_IDS);
        let snap = reg.snapshot();
        assert_eq!(snap.len(), 3);
        assert!(snap.values().all(|m| m.status == MotorStatus::Idle));
    }
}

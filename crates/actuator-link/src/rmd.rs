//! SocketCAN backend for MyActuator RMD series drives.
//!
//! Single-motor commands are sent on arbitration id `0x140 + node` and the
//! drive answers on `0x240 + node`, echoing the command byte in `data[0]`.

use crate::{ActuatorLink, ActuatorTelemetry, LinkError, Result};
use socketcan::{CanFrame, CanSocket, EmbeddedFrame, Frame, Socket, StandardId};
use std::time::Duration;
use time::OffsetDateTime;

const CMD_POSITION_ABS: u8 = 0xA4;
const CMD_STOP: u8 = 0x81;
const CMD_STATUS_1: u8 = 0x9A;
const CMD_STATUS_2: u8 = 0x9C;

const REPLY_ATTEMPTS: usize = 8;

pub struct RmdCanLink {
    sock: CanSocket,
    node: u8,
}

impl RmdCanLink {
    /// Open `iface` (e.g. "can0") and bind to drive `node` (1..=32).
    pub fn open(iface: &str, node: u8) -> Result<Self> {
        if !(1..=32).contains(&node) {
            return Err(LinkError::InvalidFrame("node id out of range"));
        }
        let sock = CanSocket::open(iface)
            .map_err(|_| LinkError::InterfaceNotFound(iface.to_string()))?;
        sock.set_read_timeout(Duration::from_millis(250))
            .map_err(|e| LinkError::Io(e.to_string()))?;
        Ok(Self { sock, node })
    }

    fn request_id(&self) -> u16 {
        0x140 + u16::from(self.node)
    }

    fn reply_id(&self) -> u32 {
        0x240 + u32::from(self.node)
    }

    /// Send one command frame and wait for the drive's echo reply.
    fn transact(&mut self, data: [u8; 8]) -> Result<[u8; 8]> {
        let id = StandardId::new(self.request_id())
            .ok_or(LinkError::InvalidFrame("arbitration id"))?;
        let frame =
            CanFrame::new(id, &data).ok_or(LinkError::InvalidFrame("payload length"))?;
        self.sock
            .write_frame(&frame)
            .map_err(|e| LinkError::Io(e.to_string()))?;

        // Other nodes share the bus; skip frames that are not our reply.
        for _ in 0..REPLY_ATTEMPTS {
            let reply = match self.sock.read_frame() {
                Ok(f) => f,
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    return Err(LinkError::Timeout)
                }
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    return Err(LinkError::Timeout)
                }
                Err(e) => return Err(LinkError::Io(e.to_string())),
            };
            if reply.raw_id() != self.reply_id() {
                continue;
            }
            let payload = reply.data();
            if payload.len() < 8 || payload[0] != data[0] {
                continue;
            }
            let mut out = [0u8; 8];
            out.copy_from_slice(&payload[..8]);
            return Ok(out);
        }
        Err(LinkError::Timeout)
    }

    fn read_status_1(&mut self) -> Result<[u8; 8]> {
        self.transact([CMD_STATUS_1, 0, 0, 0, 0, 0, 0, 0])
    }

    fn read_status_2(&mut self) -> Result<[u8; 8]> {
        self.transact([CMD_STATUS_2, 0, 0, 0, 0, 0, 0, 0])
    }
}

impl ActuatorLink for RmdCanLink {
    fn move_to(&mut self, angle_deg: f64, speed_dps: f64) -> Result<()> {
        // The drive's positive direction is opposite our convention.
        let frame = pack_position_abs(-angle_deg, speed_dps);
        tracing::debug!(node = self.node, angle_deg, speed_dps, "rmd position setpoint");
        self.transact(frame)?;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        tracing::debug!(node = self.node, "rmd stop");
        self.transact([CMD_STOP, 0, 0, 0, 0, 0, 0, 0])?;
        Ok(())
    }

    fn read_status(&mut self) -> Result<ActuatorTelemetry> {
        let s1 = self.read_status_1()?;
        let s2 = self.read_status_2()?;
        Ok(merge_status(&s1, &s2))
    }
}

/// Absolute position closed-loop command (0xA4): u16 LE speed limit in dps,
/// i32 LE target in 0.01 degree steps.
fn pack_position_abs(angle_deg: f64, speed_dps: f64) -> [u8; 8] {
    let speed = speed_dps.clamp(0.0, f64::from(u16::MAX)) as u16;
    let angle = (angle_deg * 100.0).round().clamp(i32::MIN as f64, i32::MAX as f64) as i32;
    let sp = speed.to_le_bytes();
    let an = angle.to_le_bytes();
    [CMD_POSITION_ABS, 0, sp[0], sp[1], an[0], an[1], an[2], an[3]]
}

/// Merge status-1 (temperature, brake, voltage, fault) and status-2
/// (torque current, shaft speed/angle) reply frames into one record.
fn merge_status(s1: &[u8; 8], s2: &[u8; 8]) -> ActuatorTelemetry {
    let voltage_raw = u16::from_le_bytes([s1[4], s1[5]]);
    let error_code = u16::from_le_bytes([s1[6], s1[7]]);
    let current_raw = i16::from_le_bytes([s2[2], s2[3]]);
    let speed_raw = i16::from_le_bytes([s2[4], s2[5]]);
    let angle_raw = i16::from_le_bytes([s2[6], s2[7]]);
    ActuatorTelemetry {
        temperature_c: f64::from(s1[1] as i8),
        voltage_v: f64::from(voltage_raw) * 0.1,
        current_a: f64::from(current_raw) * 0.01,
        shaft_angle_deg: f64::from(angle_raw),
        shaft_speed_dps: f64::from(speed_raw),
        brake_released: s1[3] == 1,
        error_code,
        ts: Some(OffsetDateTime::now_utc()),
    }
}

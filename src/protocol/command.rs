//! # Command Codec
//!
//! Every command is one frame:
//!
//! ```text
//! ┌────────┬────────┬──────────────┬─────────────┐
//! │ opcode │ handle │ length (LE)  │ payload ... │
//! │   u8   │   u8   │     u16      │ length bytes│
//! └────────┴────────┴──────────────┴─────────────┘
//! ```
//!
//! The handle selects which emulated wireless device the command targets.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::*;
use crate::error::{OracleError, Result};

/// One command sent to the DUT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Connect a device, optionally flagged as BLE
    Connect { ble: bool },
    Disconnect,
    /// Device name as the controller would advertise it
    Name(String),
    HidDescriptor(Vec<u8>),
    /// Raw HID input report, starting with the `0xA1` transaction header
    HidReport(Vec<u8>),
    BridgeReport { report_id: u8, report: Vec<u8> },
    GlobalConfig(Vec<u8>),
    OutputConfig { index: u8, config: Vec<u8> },
    InputConfig { index: u8, config: Vec<u8> },
    SystemId(u8),
    VidPid { vid: u16, pid: u16 },
    CoverageDump,
}

impl Command {
    /// Opcode byte for this command
    #[must_use]
    pub fn opcode(&self) -> u8 {
        match self {
            Self::Connect { .. } => CMD_CONNECT,
            Self::Disconnect => CMD_DISCONNECT,
            Self::Name(_) => CMD_NAME,
            Self::HidDescriptor(_) => CMD_HID_DESCRIPTOR,
            Self::HidReport(_) => CMD_HID_REPORT,
            Self::BridgeReport { .. } => CMD_BRIDGE_REPORT,
            Self::GlobalConfig(_) => CMD_GLOBAL_CONFIG,
            Self::OutputConfig { .. } => CMD_OUTPUT_CONFIG,
            Self::InputConfig { .. } => CMD_INPUT_CONFIG,
            Self::SystemId(_) => CMD_SYSTEM_ID,
            Self::VidPid { .. } => CMD_VID_PID,
            Self::CoverageDump => CMD_COVERAGE_DUMP,
        }
    }

    /// Encode the command payload (without header)
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Protocol` if a name contains an interior NUL.
    pub fn encode_payload(&self) -> Result<BytesMut> {
        let mut payload = BytesMut::new();

        match self {
            Self::Connect { ble } => payload.put_u8(u8::from(*ble)),
            Self::Disconnect | Self::CoverageDump => {}
            Self::Name(name) => {
                if name.contains('\0') {
                    return Err(OracleError::Protocol(format!(
                        "Device name {:?} contains a NUL byte",
                        name
                    )));
                }
                payload.put_slice(name.as_bytes());
                payload.put_u8(0);
            }
            Self::HidDescriptor(data) | Self::GlobalConfig(data) => payload.put_slice(data),
            Self::HidReport(report) => {
                payload.put_bytes(0, HID_REPORT_PREFIX_LEN);
                payload.put_slice(report);
            }
            Self::BridgeReport { report_id, report } => {
                payload.put_u8(*report_id);
                payload.put_slice(report);
            }
            Self::OutputConfig { index, config } | Self::InputConfig { index, config } => {
                payload.put_u8(*index);
                payload.put_slice(config);
            }
            Self::SystemId(id) => payload.put_u8(*id),
            Self::VidPid { vid, pid } => {
                payload.put_u16_le(*vid);
                payload.put_u16_le(*pid);
            }
        }

        Ok(payload)
    }

    /// Encode a complete frame addressed to `handle`
    ///
    /// # Arguments
    ///
    /// * `handle` - Logical device slot on the DUT
    ///
    /// # Returns
    ///
    /// * `Result<Bytes>` - Header followed by payload
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Protocol` if the payload cannot be encoded or
    /// does not fit the 16-bit length field.
    ///
    /// # Examples
    ///
    /// ```
    /// use retropad_oracle::protocol::command::Command;
    ///
    /// let frame = Command::SystemId(18).encode(0).unwrap();
    /// assert_eq!(&frame[..], &[0x0A, 0x00, 0x01, 0x00, 18]);
    /// ```
    pub fn encode(&self, handle: u8) -> Result<Bytes> {
        let payload = self.encode_payload()?;
        let length = u16::try_from(payload.len()).map_err(|_| {
            OracleError::Protocol(format!(
                "Payload of {} bytes exceeds {} byte limit",
                payload.len(),
                MAX_PAYLOAD_LEN
            ))
        })?;

        let mut frame = BytesMut::with_capacity(HEADER_LEN + payload.len());
        frame.put_u8(self.opcode());
        frame.put_u8(handle);
        frame.put_u16_le(length);
        frame.extend_from_slice(&payload);

        Ok(frame.freeze())
    }

    /// Decode a complete frame
    ///
    /// # Returns
    ///
    /// * `Result<(u8, Command)>` - Handle and command
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Frame is shorter than the header
    /// - Length field does not match the bytes that follow
    /// - Opcode is unknown
    /// - Payload is malformed for its opcode
    pub fn decode(frame: &[u8]) -> Result<(u8, Self)> {
        if frame.len() < HEADER_LEN {
            return Err(OracleError::Protocol(format!(
                "Frame too short: {} bytes",
                frame.len()
            )));
        }

        let mut buf = frame;
        let opcode = buf.get_u8();
        let handle = buf.get_u8();
        let length = usize::from(buf.get_u16_le());

        if buf.remaining() != length {
            return Err(OracleError::Protocol(format!(
                "Length field says {} bytes, frame carries {}",
                length,
                buf.remaining()
            )));
        }

        let command = Self::decode_payload(opcode, buf)?;
        Ok((handle, command))
    }

    fn decode_payload(opcode: u8, mut payload: &[u8]) -> Result<Self> {
        let len = payload.len();
        let command = match opcode {
            CMD_CONNECT => match payload {
                [] => Self::Connect { ble: false },
                [flag] => Self::Connect { ble: *flag != 0 },
                _ => return Err(bad_length(opcode, len)),
            },
            CMD_DISCONNECT | CMD_COVERAGE_DUMP => {
                if len != 0 {
                    return Err(bad_length(opcode, len));
                }
                if opcode == CMD_DISCONNECT {
                    Self::Disconnect
                } else {
                    Self::CoverageDump
                }
            }
            CMD_NAME => {
                let Some((&0, name)) = payload.split_last() else {
                    return Err(OracleError::Protocol(
                        "Device name is not NUL-terminated".to_string(),
                    ));
                };
                let name = std::str::from_utf8(name)
                    .map_err(|e| OracleError::Protocol(format!("Device name is not UTF-8: {}", e)))?;
                Self::Name(name.to_string())
            }
            CMD_HID_DESCRIPTOR => Self::HidDescriptor(payload.to_vec()),
            CMD_HID_REPORT => {
                if len < HID_REPORT_PREFIX_LEN {
                    return Err(bad_length(opcode, len));
                }
                Self::HidReport(payload[HID_REPORT_PREFIX_LEN..].to_vec())
            }
            CMD_BRIDGE_REPORT => {
                if len < 1 {
                    return Err(bad_length(opcode, len));
                }
                let report_id = payload.get_u8();
                Self::BridgeReport {
                    report_id,
                    report: payload.to_vec(),
                }
            }
            CMD_GLOBAL_CONFIG => Self::GlobalConfig(payload.to_vec()),
            CMD_OUTPUT_CONFIG | CMD_INPUT_CONFIG => {
                if len < 1 {
                    return Err(bad_length(opcode, len));
                }
                let index = payload.get_u8();
                let config = payload.to_vec();
                if opcode == CMD_OUTPUT_CONFIG {
                    Self::OutputConfig { index, config }
                } else {
                    Self::InputConfig { index, config }
                }
            }
            CMD_SYSTEM_ID => match payload {
                [id] => Self::SystemId(*id),
                _ => return Err(bad_length(opcode, len)),
            },
            CMD_VID_PID => {
                if len != 4 {
                    return Err(bad_length(opcode, len));
                }
                Self::VidPid {
                    vid: payload.get_u16_le(),
                    pid: payload.get_u16_le(),
                }
            }
            _ => {
                return Err(OracleError::Protocol(format!(
                    "Unknown opcode: 0x{:02X}",
                    opcode
                )))
            }
        };

        Ok(command)
    }
}

fn bad_length(opcode: u8, len: usize) -> OracleError {
    OracleError::Protocol(format!(
        "Invalid payload length {} for opcode 0x{:02X}",
        len, opcode
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Encoding Tests ====================

    #[test]
    fn test_encode_header_layout() {
        let frame = Command::Connect { ble: true }.encode(3).unwrap();
        assert_eq!(&frame[..], &[CMD_CONNECT, 3, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn test_encode_empty_payload() {
        let frame = Command::Disconnect.encode(0).unwrap();
        assert_eq!(&frame[..], &[CMD_DISCONNECT, 0, 0, 0]);

        let frame = Command::CoverageDump.encode(0).unwrap();
        assert_eq!(&frame[..], &[CMD_COVERAGE_DUMP, 0, 0, 0]);
    }

    #[test]
    fn test_encode_name_is_nul_terminated() {
        let frame = Command::Name("Pro Controller".to_string()).encode(0).unwrap();
        assert_eq!(frame[2], 15);
        assert_eq!(&frame[4..18], b"Pro Controller");
        assert_eq!(frame[18], 0);
    }

    #[test]
    fn test_encode_name_rejects_interior_nul() {
        let result = Command::Name("bad\0name".to_string()).encode(0);
        assert!(matches!(result, Err(OracleError::Protocol(_))));
    }

    #[test]
    fn test_encode_hid_report_prefix() {
        let frame = Command::HidReport(vec![0xA1, 0x01, 0x80]).encode(0).unwrap();
        assert_eq!(frame.len(), HEADER_LEN + HID_REPORT_PREFIX_LEN + 3);
        assert_eq!(frame[2], 12);
        assert!(frame[4..4 + HID_REPORT_PREFIX_LEN].iter().all(|&b| b == 0));
        assert_eq!(&frame[13..], &[0xA1, 0x01, 0x80]);
    }

    #[test]
    fn test_encode_vid_pid_little_endian() {
        let frame = Command::VidPid { vid: 0x054C, pid: 0x09CC }.encode(1).unwrap();
        assert_eq!(&frame[..], &[CMD_VID_PID, 1, 4, 0, 0x4C, 0x05, 0xCC, 0x09]);
    }

    #[test]
    fn test_encode_indexed_config() {
        let frame = Command::OutputConfig { index: 2, config: vec![0xAA, 0xBB] }
            .encode(0)
            .unwrap();
        assert_eq!(&frame[4..], &[2, 0xAA, 0xBB]);

        let frame = Command::BridgeReport { report_id: 0x30, report: vec![1] }
            .encode(0)
            .unwrap();
        assert_eq!(&frame[4..], &[0x30, 1]);
    }

    #[test]
    fn test_encode_rejects_oversized_payload() {
        let result = Command::HidDescriptor(vec![0; MAX_PAYLOAD_LEN + 1]).encode(0);
        assert!(result.is_err());
    }

    // ==================== Decoding Tests ====================

    #[test]
    fn test_decode_every_command() {
        let commands = vec![
            Command::Connect { ble: false },
            Command::Disconnect,
            Command::Name("Wireless Controller".to_string()),
            Command::HidDescriptor(vec![0x05, 0x01]),
            Command::HidReport(vec![0xA1, 0x01]),
            Command::BridgeReport { report_id: 1, report: vec![2, 3] },
            Command::GlobalConfig(vec![0; 4]),
            Command::OutputConfig { index: 0, config: vec![1] },
            Command::InputConfig { index: 1, config: vec![] },
            Command::SystemId(15),
            Command::VidPid { vid: 1, pid: 2 },
            Command::CoverageDump,
        ];

        for command in commands {
            let frame = command.encode(7).unwrap();
            let (handle, decoded) = Command::decode(&frame).unwrap();
            assert_eq!(handle, 7);
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn test_decode_too_short() {
        assert!(Command::decode(&[0x01, 0x00]).is_err());
    }

    #[test]
    fn test_decode_length_mismatch() {
        assert!(Command::decode(&[CMD_SYSTEM_ID, 0, 2, 0, 18]).is_err());
        assert!(Command::decode(&[CMD_SYSTEM_ID, 0, 1, 0, 18, 19]).is_err());
    }

    #[test]
    fn test_decode_unknown_opcode() {
        let err = Command::decode(&[0x42, 0, 0, 0]).unwrap_err();
        assert!(err.to_string().contains("0x42"));
    }

    #[test]
    fn test_decode_payload_shape_checks() {
        // System id needs exactly one byte
        assert!(Command::decode(&[CMD_SYSTEM_ID, 0, 0, 0]).is_err());
        // VID/PID needs four
        assert!(Command::decode(&[CMD_VID_PID, 0, 2, 0, 1, 2]).is_err());
        // HID report needs the prefix
        assert!(Command::decode(&[CMD_HID_REPORT, 0, 1, 0, 0]).is_err());
        // Name needs the terminator
        assert!(Command::decode(&[CMD_NAME, 0, 2, 0, b'a', b'b']).is_err());
        // Disconnect carries nothing
        assert!(Command::decode(&[CMD_DISCONNECT, 0, 1, 0, 0]).is_err());
    }

    #[test]
    fn test_decode_connect_without_flag() {
        let (_, command) = Command::decode(&[CMD_CONNECT, 0, 0, 0]).unwrap();
        assert_eq!(command, Command::Connect { ble: false });
    }
}

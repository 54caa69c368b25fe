//! # DUT Protocol
//!
//! Wire formats spoken with the adapter under test:
//!
//! - [`command`]: framed binary commands sent to the DUT
//! - [`record`]: newline-delimited JSON records the DUT answers with
//! - [`report`]: raw wireless reports injected through [`command::Command::HidReport`]

pub mod command;
pub mod record;
pub mod report;

/// Connect a device on a handle
pub const CMD_CONNECT: u8 = 0x01;

/// Disconnect the device on a handle
pub const CMD_DISCONNECT: u8 = 0x02;

/// Set the device name (drives type detection)
pub const CMD_NAME: u8 = 0x03;

/// Feed a HID report descriptor
pub const CMD_HID_DESCRIPTOR: u8 = 0x04;

/// Inject a HID input report
pub const CMD_HID_REPORT: u8 = 0x05;

/// Inject a report through the host bridge
pub const CMD_BRIDGE_REPORT: u8 = 0x06;

/// Overwrite the global configuration block
pub const CMD_GLOBAL_CONFIG: u8 = 0x07;

/// Overwrite one output (wired port) configuration block
pub const CMD_OUTPUT_CONFIG: u8 = 0x08;

/// Overwrite one input (wireless device) configuration block
pub const CMD_INPUT_CONFIG: u8 = 0x09;

/// Select the wired system
pub const CMD_SYSTEM_ID: u8 = 0x0A;

/// Set the USB vendor and product id
pub const CMD_VID_PID: u8 = 0x0B;

/// Request a coverage dump
pub const CMD_COVERAGE_DUMP: u8 = 0x0C;

/// Frame header size: opcode(1) + handle(1) + length(2)
pub const HEADER_LEN: usize = 4;

/// Zero bytes preceding the report in a HID report payload
pub const HID_REPORT_PREFIX_LEN: usize = 9;

/// Largest payload the 16-bit length field can describe
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcodes_are_contiguous() {
        let opcodes = [
            CMD_CONNECT,
            CMD_DISCONNECT,
            CMD_NAME,
            CMD_HID_DESCRIPTOR,
            CMD_HID_REPORT,
            CMD_BRIDGE_REPORT,
            CMD_GLOBAL_CONFIG,
            CMD_OUTPUT_CONFIG,
            CMD_INPUT_CONFIG,
            CMD_SYSTEM_ID,
            CMD_VID_PID,
            CMD_COVERAGE_DUMP,
        ];
        for (i, &opcode) in opcodes.iter().enumerate() {
            assert_eq!(opcode as usize, i + 1);
        }
    }
}

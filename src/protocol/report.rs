//! # Wireless Report Encoders
//!
//! Builds the raw HID input reports a controller would send, from the same
//! [`PadInput`] the model consumes. Only a few report formats are needed to
//! drive every mapping path; other sources are model-only.
//!
//! | Source     | Header      | Layout                                          |
//! |------------|-------------|-------------------------------------------------|
//! | `ps4`/`ps5`| `A1 01`     | LX LY RX RY (u8), buttons+hat (u24), LM RM (u8) |
//! | `sw_pro`   | `A1 30 01`  | status+buttons (u32), sticks (2×2×12 bit), pad  |
//! | `hid`      | `A1 01`     | LX LY (u8), hat (u4, 0 released), buttons (u32) |
//!
//! A Pro controller also answers the host's SPI reads of its stick
//! calibration; [`calibration_reports`] builds those replies.

use bytes::{BufMut, BytesMut};

use crate::bits::{swap24, swap32};
use crate::descriptor::registry::SourceKind;
use crate::descriptor::Axis;
use crate::mapping::PadInput;

/// HID transaction header for an input report
pub const HIDP_INPUT_HEADER: u8 = 0xA1;

/// Timer byte of a Switch full report
const SW_TIMER: u8 = 0x01;

/// Battery and connection byte, the low byte of the Switch button word
const SW_CONN_INFO: u32 = 0x80;

/// Zero padding after the sticks of a Switch full report
const SW_FULL_REPORT_PADDING: usize = 37;

/// Switch subcommand reply report id
const SW_SUBCMD_REPLY: u8 = 0x21;

/// Ack byte of a subcommand reply carrying data
const SW_SUBCMD_ACK_DATA: u8 = 0x90;

/// SPI flash read subcommand
const SW_SUBCMD_SPI_READ: u8 = 0x10;

/// Length of a subcommand reply, header included
const SW_SUBCMD_REPLY_LEN: usize = 50;

/// SPI reads a Pro controller answers while the host loads its stick
/// calibration: factory sticks, stick parameters, right stick parameters,
/// then the (unset) user calibration area.
const SW_CALIBRATION_READS: [(u32, &[u8]); 4] = [
    (
        0x603D,
        &[
            0x67, 0x25, 0x58, 0xC9, 0x27, 0x85, 0x45, 0xD5, 0x58, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF,
        ],
    ),
    (
        0x6086,
        &[
            0x0F, 0x70, 0x5D, 0x50, 0x30, 0xF3, 0x38, 0x84, 0x43, 0x38, 0x84, 0x43, 0x33, 0x39, 0x93, 0xCD, 0xD6,
            0x6C,
        ],
    ),
    (0x6098, &[0xFF; 0x12]),
    (0x8010, &[0xFF; 0x16]),
];

/// Descriptor the generic HID pad is announced with: 2 axes, a hat switch
/// (1 to 8, null state 0) padded to a byte, then 32 buttons
pub const HID_PAD_DESCRIPTOR: [u8; 67] = [
    0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, 0x09, 0x01, 0xA1, 0x00, 0x09, 0x30, 0x09, 0x31, 0x15, 0x00,
    0x26, 0xFF, 0x00, 0x66, 0x00, 0x00, 0x95, 0x02, 0x75, 0x08, 0x81, 0x02, 0x09, 0x39, 0x15, 0x01,
    0x25, 0x08, 0x75, 0x04, 0x95, 0x01, 0x81, 0x42, 0x75, 0x04, 0x95, 0x01, 0x81, 0x03, 0x05, 0x09,
    0x19, 0x01, 0x29, 0x20, 0x15, 0x00, 0x25, 0x01, 0x66, 0x00, 0x00, 0x95, 0x20, 0x75, 0x01, 0x81,
    0x02, 0xC0, 0xC0,
];

/// Name a source advertises so the DUT detects it
#[must_use]
pub fn device_name(kind: SourceKind) -> Option<&'static str> {
    match kind {
        SourceKind::Ps4 | SourceKind::Ps5 => Some("Wireless Controller"),
        SourceKind::SwitchPro => Some("Pro Controller"),
        SourceKind::HidGeneric => Some("HID Generic"),
        _ => None,
    }
}

/// Subcommand replies that carry a controller's stick calibration
///
/// Injected in order after the name, the last one makes the DUT print its
/// `calib_data` record. `None` for sources that don't self-report.
#[must_use]
pub fn calibration_reports(kind: SourceKind) -> Option<Vec<Vec<u8>>> {
    if kind != SourceKind::SwitchPro {
        return None;
    }

    let neutral = swap24(pack_stick(0x800, 0x800));
    let reports = SW_CALIBRATION_READS
        .iter()
        .map(|(address, data)| {
            let mut report = BytesMut::with_capacity(SW_SUBCMD_REPLY_LEN);
            report.put_slice(&[HIDP_INPUT_HEADER, SW_SUBCMD_REPLY, SW_TIMER, SW_CONN_INFO as u8]);
            report.put_bytes(0, 3);
            report.put_uint(u64::from(neutral), 3);
            report.put_uint(u64::from(neutral), 3);
            report.put_slice(&[0x08, SW_SUBCMD_ACK_DATA, SW_SUBCMD_SPI_READ]);
            report.put_u32_le(*address);
            report.put_u8(data.len() as u8);
            report.put_slice(data);
            report.put_bytes(0, SW_SUBCMD_REPLY_LEN.saturating_sub(report.len()));
            report.to_vec()
        })
        .collect();

    Some(reports)
}

/// Raw input report for a source, if it has an encoder
///
/// Axis values missing from `input` are sent at the profile's neutral.
/// Returns `None` for sources without an encoder, and for inputs with a
/// displaced axis the report format has no field for.
///
/// # Examples
///
/// ```
/// use retropad_oracle::descriptor::registry::SourceKind;
/// use retropad_oracle::mapping::PadInput;
/// use retropad_oracle::protocol::report::encode;
///
/// let kind = SourceKind::Ps4;
/// let input = PadInput::neutral(&kind.profile().axes).with_hat(8);
/// let report = encode(kind, &input).unwrap();
/// assert_eq!(report, vec![0xA1, 0x01, 0x80, 0x80, 0x80, 0x80, 0x08, 0x00, 0x00, 0x00, 0x00]);
/// ```
#[must_use]
pub fn encode(kind: SourceKind, input: &PadInput) -> Option<Vec<u8>> {
    let neutral = PadInput::neutral(&kind.profile().axes);
    let axis = |axis: Axis| {
        input.axes[axis as usize]
            .or(neutral.axes[axis as usize])
            .unwrap_or(0)
    };

    let mut report = BytesMut::new();
    report.put_u8(HIDP_INPUT_HEADER);

    match kind {
        SourceKind::Ps4 | SourceKind::Ps5 => {
            report.put_u8(0x01);
            for stick in [Axis::LX, Axis::LY, Axis::RX, Axis::RY] {
                report.put_u8(byte(axis(stick)));
            }
            let hat = u32::from(input.hat.unwrap_or(8) & 0xF);
            report.put_uint(u64::from(swap24((input.buttons & !0xF) | hat)), 3);
            report.put_u8(byte(axis(Axis::LM)));
            report.put_u8(byte(axis(Axis::RM)));
        }
        SourceKind::SwitchPro => {
            report.put_slice(&[0x30, SW_TIMER]);
            report.put_u32(swap32(u64::from((input.buttons & !0xFF) | SW_CONN_INFO)));
            report.put_uint(u64::from(swap24(pack_stick(axis(Axis::LX), axis(Axis::LY)))), 3);
            report.put_uint(u64::from(swap24(pack_stick(axis(Axis::RX), axis(Axis::RY)))), 3);
            report.put_bytes(0, SW_FULL_REPORT_PADDING);
        }
        SourceKind::HidGeneric if fits(input, &neutral, &[Axis::LX, Axis::LY]) => {
            report.put_u8(0x01);
            report.put_u8(byte(axis(Axis::LX)));
            report.put_u8(byte(axis(Axis::LY)));
            report.put_u8(input.hat.unwrap_or(0) & 0xF);
            report.put_u32(swap32(u64::from(input.buttons)));
        }
        _ => return None,
    }

    Some(report.to_vec())
}

/// True if every axis outside `fields` is absent or at neutral
fn fits(input: &PadInput, neutral: &PadInput, fields: &[Axis]) -> bool {
    Axis::ALL
        .into_iter()
        .filter(|axis| !fields.contains(axis))
        .all(|axis| {
            let value = input.axes[axis as usize];
            value.is_none() || value == neutral.axes[axis as usize]
        })
}

/// Two 12-bit stick values in one 24-bit field, X in the low bits
fn pack_stick(x: i32, y: i32) -> u32 {
    let x = x.clamp(0, 0xFFF) as u32;
    let y = y.clamp(0, 0xFFF) as u32;
    x | (y << 12)
}

fn byte(value: i32) -> u8 {
    value.clamp(0, 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ps4_buttons_share_field_with_hat() {
        let cross = 1 << 5;
        let input = PadInput::default().with_buttons(cross).with_hat(2);
        let report = encode(SourceKind::Ps4, &input).unwrap();
        // 0x000022 little-endian
        assert_eq!(&report[6..9], &[0x22, 0x00, 0x00]);
    }

    #[test]
    fn test_ps4_axes_positions() {
        let input = PadInput::default()
            .with_axis(Axis::LX, 0xFF)
            .with_axis(Axis::RY, 0x00)
            .with_axis(Axis::RM, 0x40)
            .with_hat(8);
        let report = encode(SourceKind::Ps4, &input).unwrap();
        assert_eq!(report.len(), 11);
        assert_eq!(report[2], 0xFF);
        assert_eq!(report[3], 0x80);
        assert_eq!(report[5], 0x00);
        assert_eq!(report[10], 0x40);
    }

    #[test]
    fn test_switch_pro_stick_packing() {
        let input = PadInput::default()
            .with_axis(Axis::LX, 0x800)
            .with_axis(Axis::LY, 0x800)
            .with_axis(Axis::RX, 0x123)
            .with_axis(Axis::RY, 0x456);
        let report = encode(SourceKind::SwitchPro, &input).unwrap();
        assert_eq!(&report[..4], &[0xA1, 0x30, 0x01, 0x80]);
        assert_eq!(&report[7..10], &[0x00, 0x08, 0x80]);
        assert_eq!(&report[10..13], &[0x23, 0x61, 0x45]);
        assert_eq!(report.len(), 13 + SW_FULL_REPORT_PADDING);
    }

    #[test]
    fn test_switch_pro_buttons_follow_status_byte() {
        let a = 1 << crate::descriptor::wireless::layout::sw_native::A;
        let report = encode(SourceKind::SwitchPro, &PadInput::default().with_buttons(a)).unwrap();
        assert_eq!(&report[3..7], &[0x80, 0x08, 0x00, 0x00]);
    }

    #[test]
    fn test_hid_buttons_little_endian() {
        let input = PadInput::default().with_buttons(0x0000_0102);
        let report = encode(SourceKind::HidGeneric, &input).unwrap();
        assert_eq!(&report[..5], &[0xA1, 0x01, 0x80, 0x80, 0x00]);
        assert_eq!(&report[5..], &[0x02, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_hid_hat_nibble_before_buttons() {
        let input = PadInput::default().with_hat(3).with_buttons(1);
        let report = encode(SourceKind::HidGeneric, &input).unwrap();
        assert_eq!(report.len(), 9);
        assert_eq!(report[4], 0x03);
        assert_eq!(report[5], 0x01);

        // Hat codes above 0xF keep only the field's nibble
        let report = encode(SourceKind::HidGeneric, &PadInput::default().with_hat(0x1F)).unwrap();
        assert_eq!(report[4], 0x0F);
    }

    #[test]
    fn test_hid_descriptor_declares_hat_between_axes_and_buttons() {
        let hat = HID_PAD_DESCRIPTOR
            .windows(2)
            .position(|w| w == [0x09, 0x39])
            .unwrap();
        let buttons = HID_PAD_DESCRIPTOR
            .windows(2)
            .position(|w| w == [0x05, 0x09])
            .unwrap();
        assert!(hat < buttons);
        // Hat and its padding fill one byte
        assert_eq!(&HID_PAD_DESCRIPTOR[hat + 6..hat + 18], &[0x75, 0x04, 0x95, 0x01, 0x81, 0x42, 0x75, 0x04, 0x95, 0x01, 0x81, 0x03]);
        assert_eq!(&HID_PAD_DESCRIPTOR[HID_PAD_DESCRIPTOR.len() - 2..], &[0xC0, 0xC0]);
    }

    #[test]
    fn test_out_of_range_axis_saturates() {
        let input = PadInput::default().with_axis(Axis::LX, 300);
        let report = encode(SourceKind::HidGeneric, &input).unwrap();
        assert_eq!(report[2], 0xFF);
    }

    #[test]
    fn test_model_only_sources() {
        assert!(encode(SourceKind::Xbox, &PadInput::default()).is_none());
        assert!(device_name(SourceKind::Xbox).is_none());
        assert!(encode(SourceKind::Xbox, &PadInput::default().with_hat(1)).is_none());
        assert!(device_name(SourceKind::HidGeneric).is_some());
    }

    // ==================== Calibration Report Tests ====================

    #[test]
    fn test_switch_calibration_reports_layout() {
        let reports = calibration_reports(SourceKind::SwitchPro).unwrap();
        assert_eq!(reports.len(), 4);

        let first = &reports[0];
        assert_eq!(first.len(), 50);
        assert_eq!(&first[..4], &[0xA1, 0x21, 0x01, 0x80]);
        assert_eq!(&first[7..13], &[0x00, 0x08, 0x80, 0x00, 0x08, 0x80]);
        assert_eq!(&first[13..16], &[0x08, 0x90, 0x10]);
        assert_eq!(&first[16..21], &[0x3D, 0x60, 0x00, 0x00, 0x12]);
        assert_eq!(&first[21..30], &[0x67, 0x25, 0x58, 0xC9, 0x27, 0x85, 0x45, 0xD5, 0x58]);
        assert!(first[39..].iter().all(|b| *b == 0));

        let user = &reports[3];
        assert_eq!(user.len(), 50);
        assert_eq!(&user[16..21], &[0x10, 0x80, 0x00, 0x00, 0x16]);
        assert!(user[21..43].iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_calibration_reports_only_for_self_reporting_encoders() {
        assert!(calibration_reports(SourceKind::Ps4).is_none());
        assert!(calibration_reports(SourceKind::HidGeneric).is_none());
        // Self-reports calibration but has no encoder
        assert!(calibration_reports(SourceKind::SwitchN64).is_none());
    }

    #[test]
    fn test_hid_has_no_field_for_right_stick() {
        let neutral = PadInput::neutral(&SourceKind::HidGeneric.profile().axes);
        assert!(encode(SourceKind::HidGeneric, &neutral).is_some());
        assert!(encode(SourceKind::HidGeneric, &neutral.with_axis(Axis::RX, 0xFF)).is_none());
        assert!(encode(SourceKind::HidGeneric, &neutral.with_axis(Axis::LM, 0x00)).is_some());
        assert_eq!(device_name(SourceKind::SwitchPro), Some("Pro Controller"));
    }
}

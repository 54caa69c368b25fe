//! # Mapping Engines
//!
//! Pure, stateless models of what the adapter does to a wireless report:
//!
//! - [`buttons`]: source bitfield to generic to wired bitfield
//! - [`hat`]: 4-bit hat code to generic D-pad bits
//! - [`axis`]: four-stage axis rescale with deadzone and pull-back
//! - [`live_calib`]: self-reported stick calibration overriding defaults
//!
//! [`PadMapper`] ties them together for one (source, destination) pair.
//!
//! ## Usage
//!
//! ```
//! use retropad_oracle::descriptor::registry::{SourceKind, WiredSystem};
//! use retropad_oracle::descriptor::Axis;
//! use retropad_oracle::mapping::{PadInput, PadMapper};
//!
//! let mapper = PadMapper::new(SourceKind::Ps4.profile(), WiredSystem::GameCube.profile());
//! let input = PadInput::neutral(&mapper.source().axes).with_hat(8);
//! let output = mapper.map(&input);
//!
//! assert_eq!(output.generic_buttons, 0);
//! assert_eq!(output.axis(Axis::LX).map(|s| s.wired), Some(0x80));
//! ```

pub mod axis;
pub mod buttons;
pub mod hat;
pub mod live_calib;

use crate::descriptor::{Axis, AxisSet, SourceProfile, WiredProfile, AXIS_COUNT};
use crate::error::Result;
use axis::{AxisSample, DEFAULT_DEADZONE_FRACTION};
use live_calib::StickCalibration;

/// Raw fields of one wireless report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadInput {
    pub buttons: u32,
    pub hat: Option<u8>,
    pub axes: [Option<i32>; AXIS_COUNT],
}

impl PadInput {
    /// Report with no buttons and every present axis at neutral
    #[must_use]
    pub fn neutral(axes: &AxisSet) -> Self {
        let mut input = Self::default();
        for (axis, cal) in axes.iter() {
            input.axes[axis as usize] = Some(cal.neutral);
        }
        input
    }

    /// Same report with a button field
    #[must_use]
    pub fn with_buttons(mut self, buttons: u32) -> Self {
        self.buttons = buttons;
        self
    }

    /// Same report with a hat code
    #[must_use]
    pub fn with_hat(mut self, hat: u8) -> Self {
        self.hat = Some(hat);
        self
    }

    /// Same report with one raw axis value
    #[must_use]
    pub fn with_axis(mut self, axis: Axis, value: i32) -> Self {
        self.axes[axis as usize] = Some(value);
        self
    }
}

/// Model output for one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadOutput {
    pub generic_buttons: u32,
    /// Wire-level button field, with active-low bits already inverted
    pub wired_buttons: u32,
    pub axes: [Option<AxisSample>; AXIS_COUNT],
}

impl PadOutput {
    /// Sample for one axis, if both sides have it
    #[must_use]
    pub fn axis(&self, axis: Axis) -> Option<AxisSample> {
        self.axes[axis as usize]
    }
}

/// Predicts adapter output for one source and destination pair
#[derive(Debug, Clone)]
pub struct PadMapper {
    source: SourceProfile,
    wired: WiredProfile,
    deadzone_fraction: f32,
}

impl PadMapper {
    /// Mapper with the default 1.35% deadzone
    #[must_use]
    pub fn new(source: SourceProfile, wired: WiredProfile) -> Self {
        Self::with_deadzone(source, wired, DEFAULT_DEADZONE_FRACTION)
    }

    /// Mapper with a custom deadzone fraction, clamped to [0.0, 0.5)
    #[must_use]
    pub fn with_deadzone(source: SourceProfile, wired: WiredProfile, deadzone_fraction: f32) -> Self {
        Self {
            source,
            wired,
            deadzone_fraction: deadzone_fraction.clamp(0.0, 0.499),
        }
    }

    /// Active source tables (including any live calibration)
    #[must_use]
    pub fn source(&self) -> &SourceProfile {
        &self.source
    }

    /// Destination tables
    #[must_use]
    pub fn wired(&self) -> &WiredProfile {
        &self.wired
    }

    /// Configured deadzone fraction
    #[must_use]
    pub fn deadzone_fraction(&self) -> f32 {
        self.deadzone_fraction
    }

    /// Replace source axis defaults with self-reported calibration
    ///
    /// Profiles that do not self-calibrate ignore the report.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Calibration` if the report is malformed; the
    /// previous calibration stays in place.
    pub fn apply_calibration(&mut self, report: &StickCalibration) -> Result<()> {
        if let Some(layout) = self.source.calibration {
            self.source.axes = report.apply(&self.source.axes, layout)?;
        }
        Ok(())
    }

    /// Predict every stage for one report
    #[must_use]
    pub fn map(&self, input: &PadInput) -> PadOutput {
        let mut generic_buttons = buttons::to_generic(input.buttons, self.source.buttons);
        if let (Some(code), Some(encoding)) = (input.hat, self.source.hat) {
            generic_buttons = hat::merge(generic_buttons, code, encoding);
        }
        let wired_buttons = buttons::generic_to_wired(generic_buttons, self.wired.buttons) ^ self.wired.idle_buttons;

        let mut axes = [None; AXIS_COUNT];
        for (axis, src) in self.source.axes.iter() {
            let (Some(dst), Some(raw)) = (self.wired.axes.get(axis), input.axes[axis as usize]) else {
                continue;
            };
            axes[axis as usize] = Some(axis::rescale(axis, raw, &src, &dst, self.deadzone_fraction));
        }

        PadOutput {
            generic_buttons,
            wired_buttons,
            axes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::registry::{SourceKind, WiredSystem};
    use crate::descriptor::wired::layout::gc;
    use crate::descriptor::PadButton;

    fn ps4_to_gc() -> PadMapper {
        PadMapper::new(SourceKind::Ps4.profile(), WiredSystem::GameCube.profile())
    }

    #[test]
    fn test_neutral_report() {
        let mapper = ps4_to_gc();
        let output = mapper.map(&PadInput::neutral(&mapper.source().axes).with_hat(8));
        assert_eq!(output.generic_buttons, 0);
        assert_eq!(output.wired_buttons, 0);
        assert_eq!(output.axis(Axis::LM).map(|s| s.wired), Some(0x20));
        assert_eq!(output.axis(Axis::RY).map(|s| s.wired), Some(0x80));
    }

    #[test]
    fn test_hat_and_buttons_merge() {
        let mapper = ps4_to_gc();
        let cross = 1 << 5;
        let output = mapper.map(&PadInput::default().with_buttons(cross).with_hat(0));
        assert_eq!(output.generic_buttons, PadButton::RB_DOWN.mask() | PadButton::LD_UP.mask());
        assert_eq!(output.wired_buttons, (1 << gc::A) | (1 << gc::LD_UP));
    }

    #[test]
    fn test_saturn_buttons_are_active_low() {
        use crate::descriptor::wired::layout::saturn;

        let mapper = PadMapper::new(SourceKind::Ps4.profile(), WiredSystem::Saturn.profile());
        let idle = mapper.map(&PadInput::neutral(&mapper.source().axes));
        assert_eq!(idle.generic_buttons, 0);
        assert_eq!(idle.wired_buttons, 0xFFFF);

        let cross = 1 << 5;
        let pressed = mapper.map(&PadInput::default().with_buttons(cross));
        assert_eq!(pressed.generic_buttons, PadButton::RB_DOWN.mask());
        assert_eq!(pressed.wired_buttons, 0xFFFF & !(1 << saturn::B));
    }

    #[test]
    fn test_hat_ignored_without_encoding() {
        let mapper = PadMapper::new(SourceKind::Ps3.profile(), WiredSystem::GameCube.profile());
        let output = mapper.map(&PadInput::default().with_hat(0));
        assert_eq!(output.generic_buttons, 0);
    }

    #[test]
    fn test_axes_missing_on_destination_are_skipped() {
        let mapper = PadMapper::new(SourceKind::Ps4.profile(), WiredSystem::N64.profile());
        let output = mapper.map(&PadInput::neutral(&mapper.source().axes));
        assert!(output.axis(Axis::LX).is_some());
        assert!(output.axis(Axis::RX).is_none());
        assert!(output.axis(Axis::LM).is_none());
    }

    #[test]
    fn test_axes_missing_in_input_are_skipped() {
        let mapper = ps4_to_gc();
        let output = mapper.map(&PadInput::default().with_axis(Axis::LX, 0xFF));
        assert!(output.axis(Axis::LX).is_some());
        assert!(output.axis(Axis::LY).is_none());
    }

    #[test]
    fn test_deadzone_clamped() {
        let mapper = PadMapper::with_deadzone(SourceKind::Ps4.profile(), WiredSystem::GameCube.profile(), 2.0);
        assert!(mapper.deadzone_fraction() < 0.5);
        assert_eq!(mapper.wired().name, "gc");
    }

    #[test]
    fn test_live_calibration_changes_neutral() {
        let mut mapper = PadMapper::new(SourceKind::SwitchPro.profile(), WiredSystem::GameCube.profile());
        let report = StickCalibration {
            neutral: vec![0x7C0, 0x800, 0x800, 0x800],
            rel_max: vec![0x578; 4],
            rel_min: vec![0x578; 4],
            deadzone: vec![0; 4],
        };
        mapper.apply_calibration(&report).unwrap();

        let output = mapper.map(&PadInput::default().with_axis(Axis::LX, 0x7C0));
        assert_eq!(output.axis(Axis::LX).map(|s| s.wired), Some(0x80));
    }

    #[test]
    fn test_live_calibration_ignored_for_static_profiles() {
        let mut mapper = ps4_to_gc();
        let report = StickCalibration {
            neutral: vec![0; 4],
            rel_max: vec![0; 4],
            rel_min: vec![0; 4],
            deadzone: vec![0; 4],
        };
        assert!(mapper.apply_calibration(&report).is_ok());
        assert_eq!(mapper.source().axes, SourceKind::Ps4.profile().axes);
    }
}

//! # Controller Descriptors
//!
//! Static per-controller data consumed by the mapping engines:
//!
//! - [`ButtonRemapTable`]: 32 entries indexed by generic button position
//! - [`AxisCalibration`]: neutral, extents, deadzone and polarity of one axis
//! - [`AxisSet`]: the calibration records of one controller mode
//!
//! Everything here is `const` data. Selection of the active tables by
//! detected device type happens in [`registry`].

pub mod generic;
pub mod registry;
pub mod wired;
pub mod wireless;

use serde::Serialize;

use crate::error::{OracleError, Result};
pub use generic::{Axis, PadButton, HAT_TO_DPAD};

/// Number of entries in a button remap table
pub const REMAP_TABLE_LEN: usize = 32;

/// Number of logical axes (LX, LY, RX, RY, LM, RM)
pub const AXIS_COUNT: usize = 6;

/// Generic position to bitmask table
///
/// Used in two directions: for a source controller, entry `i` holds the
/// source bits that set generic bit `i`; for a destination system, entry `i`
/// holds the destination bits that generic bit `i` drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRemapTable(pub [u32; REMAP_TABLE_LEN]);

impl ButtonRemapTable {
    /// Wrap a raw table
    #[must_use]
    pub const fn new(entries: [u32; REMAP_TABLE_LEN]) -> Self {
        Self(entries)
    }

    /// Entry for one generic position
    #[must_use]
    pub const fn entry(&self, index: usize) -> u32 {
        self.0[index]
    }

    /// Logical OR of every entry
    #[must_use]
    pub fn union(&self) -> u32 {
        self.0.iter().fold(0, |acc, &mask| acc | mask)
    }

    /// Generic positions with a non-zero entry
    pub fn active_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &mask)| mask != 0)
            .map(|(i, _)| i)
    }

    /// Generic bitfield with one bit per non-zero entry
    #[must_use]
    pub fn generic_coverage(&self) -> u32 {
        self.active_positions().fold(0, |acc, i| acc | (1 << i))
    }
}

/// Signed range a destination value is stored in on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl ValueRange {
    /// Clamp a mapped value into the range
    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Numeric behaviour of one axis for one controller mode
///
/// `abs_max` is the travel above `neutral` and `abs_min` the travel below it,
/// both in raw units. `inverted` flips the intrinsic direction sign for
/// protocols whose physical encoding is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisCalibration {
    pub neutral: i32,
    pub abs_max: i32,
    pub abs_min: i32,
    pub fixed_deadzone: i32,
    pub inverted: bool,
    /// Destination storage range, present on wired descriptors
    pub range: Option<ValueRange>,
}

impl AxisCalibration {
    /// Symmetric axis with the same travel on both sides
    ///
    /// # Examples
    ///
    /// ```
    /// use retropad_oracle::descriptor::AxisCalibration;
    ///
    /// let gc_stick = AxisCalibration::symmetric(0x80, 0x64);
    /// assert_eq!(gc_stick.abs_min, 0x64);
    /// assert!(!gc_stick.inverted);
    /// ```
    #[must_use]
    pub const fn symmetric(neutral: i32, abs: i32) -> Self {
        Self::asymmetric(neutral, abs, abs)
    }

    /// Axis with different travel above and below neutral
    #[must_use]
    pub const fn asymmetric(neutral: i32, abs_max: i32, abs_min: i32) -> Self {
        Self {
            neutral,
            abs_max,
            abs_min,
            fixed_deadzone: 0,
            inverted: false,
            range: None,
        }
    }

    /// Same record with the direction sign flipped
    #[must_use]
    pub const fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    /// Same record with a fixed deadzone in raw units
    #[must_use]
    pub const fn with_deadzone(mut self, deadzone: i32) -> Self {
        self.fixed_deadzone = deadzone;
        self
    }

    /// Same record with a destination storage range
    #[must_use]
    pub const fn with_range(mut self, min: i32, max: i32) -> Self {
        self.range = Some(ValueRange { min, max });
        self
    }

    /// Travel for the sign of a generic value
    ///
    /// Non-negative values use `abs_max`, negative ones `abs_min`.
    #[must_use]
    pub const fn extent_for(&self, generic: i32) -> i32 {
        if generic >= 0 {
            self.abs_max
        } else {
            self.abs_min
        }
    }

    /// Check the record is safe to hand to the axis engine
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Calibration` if an extent is out of range, the
    /// fixed deadzone swallows the whole positive travel, or the extents do
    /// not fit the declared storage range.
    pub fn validate(&self) -> Result<()> {
        if self.abs_max <= 0 {
            return Err(OracleError::Calibration(format!(
                "abs_max must be positive, got {}",
                self.abs_max
            )));
        }

        if self.abs_min < 0 {
            return Err(OracleError::Calibration(format!(
                "abs_min cannot be negative, got {}",
                self.abs_min
            )));
        }

        if self.fixed_deadzone < 0 || self.fixed_deadzone >= self.abs_max {
            return Err(OracleError::Calibration(format!(
                "deadzone {} must be in [0, {})",
                self.fixed_deadzone, self.abs_max
            )));
        }

        if let Some(range) = self.range {
            if self.abs_max > range.max || -self.abs_min < range.min {
                return Err(OracleError::Calibration(format!(
                    "extents -{}..+{} exceed storage range {}..={}",
                    self.abs_min, self.abs_max, range.min, range.max
                )));
            }
        }

        Ok(())
    }

    /// [`validate`](Self::validate) plus a bound on where neutral may sit
    ///
    /// A record describing a physical unit must keep its neutral within
    /// `[center - abs_min, center + abs_max]`, where `center` is the nominal
    /// neutral of the controller mode.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Calibration` for any [`validate`](Self::validate)
    /// failure or a neutral outside the bound
    pub fn validate_centered(&self, center: i32) -> Result<()> {
        self.validate()?;

        let low = center - self.abs_min;
        let high = center + self.abs_max;
        if self.neutral < low || self.neutral > high {
            return Err(OracleError::Calibration(format!(
                "neutral {} outside {}..={} around center {}",
                self.neutral, low, high, center
            )));
        }

        Ok(())
    }
}

/// Calibration records of one controller mode, indexed by [`Axis`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSet(pub [Option<AxisCalibration>; AXIS_COUNT]);

impl AxisSet {
    /// Set without any axis
    pub const EMPTY: Self = Self([None; AXIS_COUNT]);

    /// Calibration for one axis, if the controller has it
    #[must_use]
    pub const fn get(&self, axis: Axis) -> Option<AxisCalibration> {
        self.0[axis as usize]
    }

    /// Copy of the set with one axis replaced
    #[must_use]
    pub const fn with(mut self, axis: Axis, calibration: AxisCalibration) -> Self {
        self.0[axis as usize] = Some(calibration);
        self
    }

    /// Present axes in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, AxisCalibration)> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(move |axis| self.get(axis).map(|cal| (axis, cal)))
    }

    /// Validate every present record
    ///
    /// # Errors
    ///
    /// Returns the first failing record's error, prefixed with its axis.
    pub fn validate(&self) -> Result<()> {
        for (axis, cal) in self.iter() {
            cal.validate().map_err(|e| {
                OracleError::Calibration(format!("{:?}: {}", axis, e))
            })?;
        }
        Ok(())
    }
}

/// How a source protocol encodes its 4-bit hat field
///
/// Decoding looks up `HAT_TO_DPAD[(code - offset) & 0xF]`, so `offset` moves
/// the "up" code and with it the set of codes that mean released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HatEncoding {
    pub offset: u8,
}

impl HatEncoding {
    /// Up is 0, codes 8 to 15 are released (PlayStation, Switch default)
    pub const ZERO_BASED: Self = Self { offset: 0 };

    /// Up is 1, code 0 is released (Xbox, generic HID)
    pub const ONE_BASED: Self = Self { offset: 1 };
}

/// Index order of self-reported stick calibration data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationLayout {
    /// Record index `i` describes axis `i`
    Direct,
    /// Record index `i` describes axis `i ^ 1` (sideways Joy-Con)
    SwappedPairs,
}

/// Everything the engines need about one wireless controller mode
#[derive(Debug, Clone, Copy)]
pub struct SourceProfile {
    pub name: &'static str,
    pub buttons: &'static ButtonRemapTable,
    pub axes: AxisSet,
    pub hat: Option<HatEncoding>,
    /// Present when the controller self-reports stick calibration
    pub calibration: Option<CalibrationLayout>,
}

/// Everything the engines need about one wired destination system
#[derive(Debug, Clone, Copy)]
pub struct WiredProfile {
    pub name: &'static str,
    pub system_id: u8,
    pub buttons: &'static ButtonRemapTable,
    /// Wire bits that read 1 at rest; pressing a button clears its bit
    pub idle_buttons: u32,
    pub axes: AxisSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Remap Table Tests ====================

    #[test]
    fn test_union_and_coverage() {
        let mut entries = [0u32; REMAP_TABLE_LEN];
        entries[16] = 0x1;
        entries[17] = 0x6;
        entries[31] = 0x1;
        let table = ButtonRemapTable::new(entries);

        assert_eq!(table.union(), 0x7);
        assert_eq!(table.generic_coverage(), (1 << 16) | (1 << 17) | (1 << 31));
        assert_eq!(table.active_positions().collect::<Vec<_>>(), vec![16, 17, 31]);
    }

    #[test]
    fn test_empty_table() {
        let table = ButtonRemapTable::new([0; REMAP_TABLE_LEN]);
        assert_eq!(table.union(), 0);
        assert_eq!(table.generic_coverage(), 0);
    }

    // ==================== Calibration Tests ====================

    #[test]
    fn test_extent_for_asymmetric() {
        let cal = AxisCalibration::asymmetric(0x80, 0x7F, 0x80);
        assert_eq!(cal.extent_for(10), 0x7F);
        assert_eq!(cal.extent_for(0), 0x7F);
        assert_eq!(cal.extent_for(-1), 0x80);
    }

    #[test]
    fn test_builder_chain() {
        let cal = AxisCalibration::symmetric(0x800, 0x578)
            .inverted()
            .with_deadzone(12)
            .with_range(-2048, 2047);
        assert!(cal.inverted);
        assert_eq!(cal.fixed_deadzone, 12);
        assert_eq!(cal.range, Some(ValueRange { min: -2048, max: 2047 }));
    }

    #[test]
    fn test_validate_accepts_trigger() {
        let trigger = AxisCalibration::asymmetric(0x00, 0xFF, 0x00);
        assert!(trigger.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_abs_max() {
        let cal = AxisCalibration::symmetric(0x80, 0);
        assert!(matches!(cal.validate(), Err(OracleError::Calibration(_))));
    }

    #[test]
    fn test_validate_rejects_negative_abs_min() {
        let cal = AxisCalibration::asymmetric(0x80, 0x7F, -1);
        assert!(cal.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_deadzone_covering_travel() {
        let cal = AxisCalibration::symmetric(0x80, 0x10).with_deadzone(0x10);
        assert!(cal.validate().is_err());

        let cal = AxisCalibration::symmetric(0x80, 0x10).with_deadzone(-1);
        assert!(cal.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_extents() {
        let cal = AxisCalibration::symmetric(0x80, 0x90).with_range(-128, 127);
        assert!(cal.validate().is_err());

        let cal = AxisCalibration::symmetric(0x80, 0x64).with_range(-128, 127);
        assert!(cal.validate().is_ok());
    }

    #[test]
    fn test_validate_centered_bounds_neutral() {
        let cal = AxisCalibration::asymmetric(0x7C0, 0x578, 0x500);
        assert!(cal.validate_centered(0x800).is_ok());

        // Lowest and highest neutral the extents allow around 0x800
        assert!(AxisCalibration::asymmetric(0x800 - 0x500, 0x578, 0x500).validate_centered(0x800).is_ok());
        assert!(AxisCalibration::asymmetric(0x800 + 0x578, 0x578, 0x500).validate_centered(0x800).is_ok());

        let low = AxisCalibration::asymmetric(0x800 - 0x501, 0x578, 0x500);
        assert!(matches!(low.validate_centered(0x800), Err(OracleError::Calibration(_))));
        let high = AxisCalibration::asymmetric(0x800 + 0x579, 0x578, 0x500);
        let err = high.validate_centered(0x800).unwrap_err();
        assert!(err.to_string().contains("center 2048"));
    }

    #[test]
    fn test_validate_centered_still_checks_extents() {
        let cal = AxisCalibration::symmetric(0x800, 0);
        assert!(cal.validate_centered(0x800).is_err());
    }

    #[test]
    fn test_value_range_clamp() {
        let range = ValueRange { min: -128, max: 127 };
        assert_eq!(range.clamp(200), 127);
        assert_eq!(range.clamp(-200), -128);
        assert_eq!(range.clamp(5), 5);
    }

    // ==================== Axis Set Tests ====================

    #[test]
    fn test_axis_set_iter_order() {
        let set = AxisSet::EMPTY
            .with(Axis::RM, AxisCalibration::symmetric(0, 1))
            .with(Axis::LX, AxisCalibration::symmetric(0, 2));
        let axes: Vec<Axis> = set.iter().map(|(axis, _)| axis).collect();
        assert_eq!(axes, vec![Axis::LX, Axis::RM]);
        assert!(set.get(Axis::LY).is_none());
    }

    #[test]
    fn test_axis_set_validate_names_axis() {
        let set = AxisSet::EMPTY.with(Axis::RY, AxisCalibration::symmetric(0, 0));
        let err = set.validate().unwrap_err();
        assert!(err.to_string().contains("RY"));
    }
}

//! # Live Calibration
//!
//! Controllers with factory-calibrated sticks report per-unit neutral,
//! extents and deadzone. Once the DUT has relayed them, they replace the
//! static defaults for the rest of the session. Polarity stays with the
//! static default since the report does not carry it. An entry with a zero
//! neutral means the unit has no calibration for that axis, and the default
//! stays.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::{Axis, AxisCalibration, AxisSet, CalibrationLayout};
use crate::error::{OracleError, Result};

/// Number of stick axes a calibration report covers
pub const CALIBRATED_AXES: usize = 4;

/// Stick calibration as relayed in a `calib_data` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickCalibration {
    pub neutral: Vec<i32>,
    pub rel_max: Vec<i32>,
    pub rel_min: Vec<i32>,
    pub deadzone: Vec<i32>,
}

impl StickCalibration {
    /// Number of report entries present in every field
    fn entries(&self) -> usize {
        [self.neutral.len(), self.rel_max.len(), self.rel_min.len(), self.deadzone.len()]
            .into_iter()
            .min()
            .unwrap_or(0)
            .min(CALIBRATED_AXES)
    }

    /// Apply the report on top of a profile's static defaults
    ///
    /// Only axes present in `defaults` are replaced, and only by entries with
    /// a non-zero neutral. Report index `i` feeds axis `i` for
    /// [`CalibrationLayout::Direct`] and axis `i ^ 1` for
    /// [`CalibrationLayout::SwappedPairs`].
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Calibration` if the fields have mismatched
    /// lengths or a resulting record fails validation, including a neutral
    /// too far from the default's.
    pub fn apply(&self, defaults: &AxisSet, layout: CalibrationLayout) -> Result<AxisSet> {
        let lengths = [self.neutral.len(), self.rel_max.len(), self.rel_min.len(), self.deadzone.len()];
        if lengths.iter().any(|&len| len != lengths[0]) {
            return Err(OracleError::Calibration(format!(
                "calibration fields have mismatched lengths {:?}",
                lengths
            )));
        }

        let mut calibrated = *defaults;

        for index in 0..self.entries() {
            let target = match layout {
                CalibrationLayout::Direct => index,
                CalibrationLayout::SwappedPairs => index ^ 1,
            };

            let Some(axis) = Axis::from_index(target) else {
                continue;
            };
            let Some(default) = defaults.get(axis) else {
                continue;
            };
            if self.neutral[index] == 0 {
                debug!("Live calibration {:?}: no data, keeping default", axis);
                continue;
            }

            let record = AxisCalibration {
                neutral: self.neutral[index],
                abs_max: self.rel_max[index],
                abs_min: self.rel_min[index],
                fixed_deadzone: self.deadzone[index],
                ..default
            };

            record.validate_centered(default.neutral).map_err(|e| {
                OracleError::Calibration(format!("{:?} from report entry {}: {}", axis, index, e))
            })?;

            debug!(
                "Live calibration {:?}: neutral={} max={} min={} deadzone={}",
                axis, record.neutral, record.abs_max, record.abs_min, record.fixed_deadzone
            );
            calibrated = calibrated.with(axis, record);
        }

        Ok(calibrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::wireless::{SW_LEFT_JOYCON_AXES, SW_NATIVE_AXES};

    fn report() -> StickCalibration {
        StickCalibration {
            neutral: vec![0x7F0, 0x810, 0x800, 0x7FA],
            rel_max: vec![0x5A0, 0x590, 0x600, 0x610],
            rel_min: vec![0x560, 0x570, 0x5F0, 0x5E0],
            deadzone: vec![0xAE, 0xAE, 0xB0, 0xB0],
        }
    }

    #[test]
    fn test_direct_layout_replaces_all_sticks() {
        let set = report().apply(&SW_NATIVE_AXES, CalibrationLayout::Direct).unwrap();
        let lx = set.get(Axis::LX).unwrap();
        assert_eq!(lx.neutral, 0x7F0);
        assert_eq!(lx.abs_max, 0x5A0);
        assert_eq!(lx.abs_min, 0x560);
        assert_eq!(lx.fixed_deadzone, 0xAE);
        assert_eq!(set.get(Axis::RY).unwrap().neutral, 0x7FA);
    }

    #[test]
    fn test_swapped_layout_keeps_default_polarity() {
        let set = report().apply(&SW_LEFT_JOYCON_AXES, CalibrationLayout::SwappedPairs).unwrap();

        // Entry 0 lands on LY, entry 1 on LX
        let lx = set.get(Axis::LX).unwrap();
        let ly = set.get(Axis::LY).unwrap();
        assert_eq!(lx.neutral, 0x810);
        assert_eq!(ly.neutral, 0x7F0);
        assert!(lx.inverted);
        assert!(!ly.inverted);

        // Entries 2 and 3 target axes the Joy-Con does not have
        assert!(set.get(Axis::RX).is_none());
        assert!(set.get(Axis::RY).is_none());
    }

    #[test]
    fn test_short_report_updates_prefix_only() {
        let short = StickCalibration {
            neutral: vec![0x7F0],
            rel_max: vec![0x5A0],
            rel_min: vec![0x560],
            deadzone: vec![0x10],
        };
        let set = short.apply(&SW_NATIVE_AXES, CalibrationLayout::Direct).unwrap();
        assert_eq!(set.get(Axis::LX).unwrap().neutral, 0x7F0);
        assert_eq!(set.get(Axis::LY), SW_NATIVE_AXES.get(Axis::LY));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut bad = report();
        bad.deadzone.pop();
        assert!(matches!(
            bad.apply(&SW_NATIVE_AXES, CalibrationLayout::Direct),
            Err(OracleError::Calibration(_))
        ));
    }

    #[test]
    fn test_invalid_record_rejected() {
        let mut bad = report();
        bad.rel_max[2] = 0;
        let err = bad.apply(&SW_NATIVE_AXES, CalibrationLayout::Direct).unwrap_err();
        assert!(err.to_string().contains("RX"));
    }

    #[test]
    fn test_zero_neutral_keeps_default() {
        let mut partial = report();
        partial.neutral[1] = 0;
        partial.rel_max[1] = 0;
        partial.neutral[3] = 0;

        let set = partial.apply(&SW_NATIVE_AXES, CalibrationLayout::Direct).unwrap();
        assert_eq!(set.get(Axis::LX).unwrap().neutral, 0x7F0);
        assert_eq!(set.get(Axis::LY), SW_NATIVE_AXES.get(Axis::LY));
        assert_eq!(set.get(Axis::RX).unwrap().neutral, 0x800);
        assert_eq!(set.get(Axis::RY), SW_NATIVE_AXES.get(Axis::RY));
    }

    #[test]
    fn test_all_zero_report_changes_nothing() {
        let empty = StickCalibration {
            neutral: vec![0; 4],
            rel_max: vec![0; 4],
            rel_min: vec![0; 4],
            deadzone: vec![0; 4],
        };
        let set = empty.apply(&SW_NATIVE_AXES, CalibrationLayout::Direct).unwrap();
        assert_eq!(set, SW_NATIVE_AXES);
    }

    #[test]
    fn test_off_center_neutral_rejected() {
        let mut bad = report();
        // 0x800 + 0x5A0 is the furthest the reported travel allows
        bad.neutral[0] = 0x800 + 0x5A1;
        let err = bad.apply(&SW_NATIVE_AXES, CalibrationLayout::Direct).unwrap_err();
        assert!(err.to_string().contains("LX"));
    }

    #[test]
    fn test_deserialize_record_body() {
        let json = r#"{"neutral":[2048,2048,2048,2048],"rel_max":[1400,1400,1400,1400],
            "rel_min":[1400,1400,1400,1400],"deadzone":[174,174,174,174]}"#;
        let calib: StickCalibration = serde_json::from_str(json).unwrap();
        assert_eq!(calib.deadzone[3], 174);
    }
}

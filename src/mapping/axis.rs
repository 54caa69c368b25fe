//! # Axis Normalization & Rescale Engine
//!
//! Computes the four-stage value chain of one axis sample:
//!
//! ```text
//! wireless ──de-bias/polarity──▶ generic ──deadzone/scale──▶ mapped ──re-bias──▶ wired
//! ```
//!
//! ## Deadzone
//!
//! `deadzone = trunc(fraction * extent) + fixed_deadzone`, where `extent` is
//! `abs_max` for a non-negative generic value and `abs_min` otherwise.
//! Anything at or inside the deadzone maps to exactly 0.
//!
//! ## Pull-back
//!
//! Between the deadzone and the true extreme the source travel is taken as
//! 95% of the extent, with its own deadzone, so the destination extent is
//! reached before the sensor's rated maximum:
//!
//! ```text
//! pb_extent = extent * 95 / 100
//! mapped    = (|generic| - pb_deadzone) * dst_extent / (pb_extent - pb_deadzone)
//! ```
//!
//! The extreme sample and anything past it use the full scale
//! `dst_extent / (extent - deadzone)`. Nothing clamps the mapped value to the
//! destination extent; only the destination storage range does.
//!
//! Scale arithmetic is `f32` throughout and results truncate toward zero,
//! so boundary samples land on the same integer the adapter firmware does.
//!
//! ## Usage
//!
//! ```
//! use retropad_oracle::descriptor::{Axis, AxisCalibration};
//! use retropad_oracle::mapping::axis::{rescale, DEFAULT_DEADZONE_FRACTION};
//!
//! let hid = AxisCalibration::asymmetric(0x80, 0x7F, 0x80);
//! let gc = AxisCalibration::symmetric(0x80, 0x64);
//!
//! let centered = rescale(Axis::LX, 0x80, &hid, &gc, DEFAULT_DEADZONE_FRACTION);
//! assert_eq!(centered.wired, 0x80);
//!
//! let full_right = rescale(Axis::LX, 0xFF, &hid, &gc, DEFAULT_DEADZONE_FRACTION);
//! assert!((full_right.wired - 0xE4).abs() <= 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::descriptor::{Axis, AxisCalibration};

/// Deadzone fraction the adapter ships with (1.35% of travel)
pub const DEFAULT_DEADZONE_FRACTION: f32 = 0.0135;

/// Pull-back extent as a percentage of the true extent
pub const PULL_BACK_PERCENT: i32 = 95;

/// One axis evaluated through every pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSample {
    pub wireless: i32,
    pub generic: i32,
    pub mapped: i32,
    pub wired: i32,
}

/// Smallest source deltas that do and do not move the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationSteps {
    /// Source delta past the deadzone that yields a mapped value of 1
    pub one_step: i32,
    /// Source delta past the deadzone that still yields 0
    pub half_step: i32,
}

impl QuantizationSteps {
    /// Steps for a source and destination extent
    ///
    /// `one_step = src_extent / dst_extent` and `half_step = one_step / 2`,
    /// both at least 1.
    #[must_use]
    pub fn new(src_extent: i32, dst_extent: i32) -> Self {
        let one_step = if dst_extent > 0 { (src_extent / dst_extent).max(1) } else { 1 };
        Self {
            one_step,
            half_step: (one_step / 2).max(1),
        }
    }

    /// Whether the minimal-step and sub-step samples are distinguishable
    ///
    /// Sources with less than two units of travel per destination unit
    /// collapse both samples onto the same input.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        self.half_step < self.one_step
    }
}

/// Deadzone in raw units for an extent
///
/// # Examples
///
/// ```
/// use retropad_oracle::mapping::axis::deadzone;
///
/// assert_eq!(deadzone(0x7FFF, 0, 0.0135), 442);
/// assert_eq!(deadzone(0x578, 0, 0.0135), 18);
/// assert_eq!(deadzone(0x578, 5, 0.0135), 23);
/// ```
#[must_use]
pub fn deadzone(extent: i32, fixed_deadzone: i32, fraction: f32) -> i32 {
    (fraction * extent as f32) as i32 + fixed_deadzone
}

/// Offset and scale of one rescale regime
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scale {
    deadzone: i32,
    factor: f32,
}

impl Scale {
    fn apply(&self, magnitude: i32) -> i32 {
        (((magnitude - self.deadzone) as f32) * self.factor) as i32
    }
}

/// Regime used strictly between the deadzone and the true extreme
///
/// `None` when the compressed extent leaves no travel past its deadzone.
fn pull_back_scale(extent: i32, dst_extent: i32, fixed_deadzone: i32, fraction: f32) -> Option<Scale> {
    let pb_extent = extent * PULL_BACK_PERCENT / 100;
    let pb_deadzone = deadzone(pb_extent, fixed_deadzone, fraction);

    if pb_extent <= pb_deadzone {
        return None;
    }

    Some(Scale {
        deadzone: pb_deadzone,
        factor: dst_extent as f32 / (pb_extent - pb_deadzone) as f32,
    })
}

/// Regime used at and past the true extreme
fn full_scale(extent: i32, deadzone: i32, dst_extent: i32) -> Scale {
    Scale {
        deadzone,
        factor: dst_extent as f32 / (extent - deadzone) as f32,
    }
}

/// Evaluate one axis sample through every stage
///
/// # Arguments
///
/// * `axis` - Logical axis, which fixes the intrinsic direction sign
/// * `wireless` - Raw value from the source report
/// * `src` - Source calibration (static default or live override)
/// * `dst` - Destination calibration
/// * `deadzone_fraction` - Global deadzone as a fraction of the extent
///
/// # Returns
///
/// The [`AxisSample`] the adapter should report. The function is total:
/// degenerate extents produce a zero output rather than a division by zero,
/// and a destination storage range clamps the result.
#[must_use]
pub fn rescale(
    axis: Axis,
    wireless: i32,
    src: &AxisCalibration,
    dst: &AxisCalibration,
    deadzone_fraction: f32,
) -> AxisSample {
    let displacement = wireless.saturating_sub(src.neutral);
    let generic = axis.net_sign(src.inverted).saturating_mul(displacement);

    let extent = src.extent_for(generic);
    let deadzone = deadzone(extent, src.fixed_deadzone, deadzone_fraction);
    let magnitude = generic.saturating_abs();

    if magnitude <= deadzone || extent <= deadzone {
        return AxisSample {
            wireless,
            generic,
            mapped: 0,
            wired: dst.neutral,
        };
    }

    let dst_direction = axis.net_sign(dst.inverted) * generic.signum();
    let dst_extent = dst.extent_for(dst_direction);

    let scale = if magnitude >= extent {
        full_scale(extent, deadzone, dst_extent)
    } else {
        pull_back_scale(extent, dst_extent, src.fixed_deadzone, deadzone_fraction)
            .unwrap_or_else(|| full_scale(extent, deadzone, dst_extent))
    };

    let mut mapped = dst_direction * scale.apply(magnitude).max(0);

    if let Some(range) = dst.range {
        mapped = range.clamp(mapped);
    }

    AxisSample {
        wireless,
        generic,
        mapped,
        wired: mapped + dst.neutral,
    }
}

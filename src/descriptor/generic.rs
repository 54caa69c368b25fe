//! # Generic Pad Model
//!
//! Canonical button positions and axes every source controller is folded
//! into before retargeting to a wired system.

use serde::Serialize;

use super::{ButtonRemapTable, REMAP_TABLE_LEN};
use crate::bits::bit;

/// Canonical generic button positions
///
/// The discriminant is the bit index in a generic bitfield. The first eight
/// positions are analog stick directions, `LD_*` is the D-pad, `RB_*` the
/// face buttons, `M*` the menu cluster, and `L*`/`R*` the shoulder groups.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PadButton {
    LX_LEFT = 0,
    LX_RIGHT,
    LY_DOWN,
    LY_UP,
    RX_LEFT,
    RX_RIGHT,
    RY_DOWN,
    RY_UP,
    LD_LEFT,
    LD_RIGHT,
    LD_DOWN,
    LD_UP,
    RD_LEFT,
    RD_RIGHT,
    RD_DOWN,
    RD_UP,
    RB_LEFT,
    RB_RIGHT,
    RB_DOWN,
    RB_UP,
    MM,
    MS,
    MT,
    MQ,
    LM,
    LS,
    LT,
    LJ,
    RM,
    RS,
    RT,
    RJ,
}

impl PadButton {
    /// All positions in bit order
    pub const ALL: [PadButton; REMAP_TABLE_LEN] = [
        Self::LX_LEFT, Self::LX_RIGHT, Self::LY_DOWN, Self::LY_UP,
        Self::RX_LEFT, Self::RX_RIGHT, Self::RY_DOWN, Self::RY_UP,
        Self::LD_LEFT, Self::LD_RIGHT, Self::LD_DOWN, Self::LD_UP,
        Self::RD_LEFT, Self::RD_RIGHT, Self::RD_DOWN, Self::RD_UP,
        Self::RB_LEFT, Self::RB_RIGHT, Self::RB_DOWN, Self::RB_UP,
        Self::MM, Self::MS, Self::MT, Self::MQ,
        Self::LM, Self::LS, Self::LT, Self::LJ,
        Self::RM, Self::RS, Self::RT, Self::RJ,
    ];

    /// Bit index in a generic bitfield
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Single-bit generic mask
    #[must_use]
    pub const fn mask(self) -> u32 {
        bit(self as u32)
    }

    /// Position for a bit index, if below 32
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Direction sign of an axis-direction position
    ///
    /// Right, up and the analog triggers count positive; left and down count
    /// negative. `inverted` flips both. Non-axis positions are always `+1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use retropad_oracle::descriptor::PadButton;
    ///
    /// assert_eq!(PadButton::LY_UP.direction_sign(false), 1);
    /// assert_eq!(PadButton::LY_UP.direction_sign(true), -1);
    /// assert_eq!(PadButton::LX_LEFT.direction_sign(false), -1);
    /// assert_eq!(PadButton::RB_DOWN.direction_sign(true), 1);
    /// ```
    #[must_use]
    pub const fn direction_sign(self, inverted: bool) -> i32 {
        match self {
            Self::LX_RIGHT | Self::LY_UP | Self::RX_RIGHT | Self::RY_UP | Self::LM | Self::RM => {
                if inverted { -1 } else { 1 }
            }
            Self::LX_LEFT | Self::LY_DOWN | Self::RX_LEFT | Self::RY_DOWN => {
                if inverted { 1 } else { -1 }
            }
            _ => 1,
        }
    }
}

/// Logical analog axes in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Axis {
    LX = 0,
    LY,
    RX,
    RY,
    LM,
    RM,
}

impl Axis {
    /// All axes in report order
    pub const ALL: [Axis; 6] = [Self::LX, Self::LY, Self::RX, Self::RY, Self::LM, Self::RM];

    /// Axis for a report index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Generic position that moves this axis in its positive direction
    #[must_use]
    pub const fn positive_button(self) -> PadButton {
        match self {
            Self::LX => PadButton::LX_RIGHT,
            Self::LY => PadButton::LY_UP,
            Self::RX => PadButton::RX_RIGHT,
            Self::RY => PadButton::RY_UP,
            Self::LM => PadButton::LM,
            Self::RM => PadButton::RM,
        }
    }

    /// Net sign of the axis for a calibration's polarity flag
    #[must_use]
    pub const fn net_sign(self, inverted: bool) -> i32 {
        self.positive_button().direction_sign(inverted)
    }

    /// Trigger-style axes that only travel one way
    #[must_use]
    pub const fn is_trigger(self) -> bool {
        matches!(self, Self::LM | Self::RM)
    }
}

/// 4-bit hat code to D-pad mask
///
/// Codes 0 to 7 walk clockwise from up; 8 to 15 are released.
pub const HAT_TO_DPAD: [u32; 16] = [
    PadButton::LD_UP.mask(),
    PadButton::LD_UP.mask() | PadButton::LD_RIGHT.mask(),
    PadButton::LD_RIGHT.mask(),
    PadButton::LD_DOWN.mask() | PadButton::LD_RIGHT.mask(),
    PadButton::LD_DOWN.mask(),
    PadButton::LD_DOWN.mask() | PadButton::LD_LEFT.mask(),
    PadButton::LD_LEFT.mask(),
    PadButton::LD_UP.mask() | PadButton::LD_LEFT.mask(),
    0, 0, 0, 0, 0, 0, 0, 0,
];

/// Remap table where every generic position maps to itself
pub const GENERIC_IDENTITY: ButtonRemapTable = {
    let mut entries = [0u32; REMAP_TABLE_LEN];
    let mut i = 0;
    while i < REMAP_TABLE_LEN {
        entries[i] = bit(i as u32);
        i += 1;
    }
    ButtonRemapTable::new(entries)
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_match_bit_order() {
        for (i, button) in PadButton::ALL.iter().enumerate() {
            assert_eq!(button.index() as usize, i);
            assert_eq!(button.mask(), 1 << i);
            assert_eq!(PadButton::from_index(i), Some(*button));
        }
        assert_eq!(PadButton::from_index(32), None);
    }

    #[test]
    fn test_direction_sign_table() {
        for button in [PadButton::LX_RIGHT, PadButton::LY_UP, PadButton::RX_RIGHT, PadButton::RY_UP, PadButton::LM, PadButton::RM] {
            assert_eq!(button.direction_sign(false), 1);
            assert_eq!(button.direction_sign(true), -1);
        }
        for button in [PadButton::LX_LEFT, PadButton::LY_DOWN, PadButton::RX_LEFT, PadButton::RY_DOWN] {
            assert_eq!(button.direction_sign(false), -1);
            assert_eq!(button.direction_sign(true), 1);
        }
        assert_eq!(PadButton::MM.direction_sign(true), 1);
    }

    #[test]
    fn test_axis_net_sign() {
        for axis in Axis::ALL {
            assert_eq!(axis.net_sign(false), 1);
            assert_eq!(axis.net_sign(true), -1);
        }
    }

    #[test]
    fn test_axis_indices() {
        assert_eq!(Axis::from_index(0), Some(Axis::LX));
        assert_eq!(Axis::from_index(5), Some(Axis::RM));
        assert_eq!(Axis::from_index(6), None);
        assert!(Axis::LM.is_trigger());
        assert!(!Axis::RY.is_trigger());
    }

    #[test]
    fn test_hat_diagonals_hold_two_bits() {
        for (code, mask) in HAT_TO_DPAD.iter().enumerate() {
            let expected_bits = match code {
                0 | 2 | 4 | 6 => 1,
                1 | 3 | 5 | 7 => 2,
                _ => 0,
            };
            assert_eq!(mask.count_ones(), expected_bits, "hat code {}", code);
        }
    }

    #[test]
    fn test_generic_identity() {
        assert_eq!(GENERIC_IDENTITY.entry(0), 1);
        assert_eq!(GENERIC_IDENTITY.entry(31), 0x8000_0000);
        assert_eq!(GENERIC_IDENTITY.union(), u32::MAX);
    }
}

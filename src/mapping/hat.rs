//! # Hat-Switch Decoder
//!
//! Turns a 4-bit hat code into generic D-pad bits. The table is fixed; the
//! per-protocol [`HatEncoding`] only shifts which code means "up".

use crate::descriptor::{HatEncoding, HAT_TO_DPAD};

/// Generic D-pad bits for a hat code
///
/// Only the low nibble of `code` is used. Codes that do not land on one of
/// the eight directions decode to 0.
///
/// # Examples
///
/// ```
/// use retropad_oracle::descriptor::{HatEncoding, PadButton};
/// use retropad_oracle::mapping::hat::decode;
///
/// let up_right = PadButton::LD_UP.mask() | PadButton::LD_RIGHT.mask();
/// assert_eq!(decode(1, HatEncoding::ZERO_BASED), up_right);
/// assert_eq!(decode(2, HatEncoding::ONE_BASED), up_right);
/// assert_eq!(decode(0, HatEncoding::ONE_BASED), 0);
/// ```
#[must_use]
pub fn decode(code: u8, encoding: HatEncoding) -> u32 {
    HAT_TO_DPAD[usize::from(code.wrapping_sub(encoding.offset) & 0xF)]
}

/// Generic bits for a report carrying both a button field and a hat field
#[must_use]
pub fn merge(generic_buttons: u32, hat_code: u8, encoding: HatEncoding) -> u32 {
    generic_buttons | decode(hat_code, encoding)
}

/// Codes that decode to no direction for an encoding
pub fn released_codes(encoding: HatEncoding) -> impl Iterator<Item = u8> {
    (0u8..16).filter(move |&code| decode(code, encoding) == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PadButton;

    const UP: u32 = PadButton::LD_UP.mask();
    const RIGHT: u32 = PadButton::LD_RIGHT.mask();
    const DOWN: u32 = PadButton::LD_DOWN.mask();
    const LEFT: u32 = PadButton::LD_LEFT.mask();

    #[test]
    fn test_zero_based_all_codes() {
        let expected = [
            UP, UP | RIGHT, RIGHT, DOWN | RIGHT, DOWN, DOWN | LEFT, LEFT, UP | LEFT,
            0, 0, 0, 0, 0, 0, 0, 0,
        ];
        for code in 0u8..16 {
            assert_eq!(decode(code, HatEncoding::ZERO_BASED), expected[code as usize], "code {}", code);
        }
    }

    #[test]
    fn test_one_based_shifts_table() {
        assert_eq!(decode(0, HatEncoding::ONE_BASED), 0);
        for code in 1u8..=8 {
            assert_eq!(
                decode(code, HatEncoding::ONE_BASED),
                decode(code - 1, HatEncoding::ZERO_BASED)
            );
        }
        for code in 9u8..16 {
            assert_eq!(decode(code, HatEncoding::ONE_BASED), 0);
        }
    }

    #[test]
    fn test_high_nibble_ignored() {
        assert_eq!(decode(0xF2, HatEncoding::ZERO_BASED), RIGHT);
    }

    #[test]
    fn test_released_codes() {
        let zero: Vec<u8> = released_codes(HatEncoding::ZERO_BASED).collect();
        assert_eq!(zero, (8u8..16).collect::<Vec<_>>());

        let one: Vec<u8> = released_codes(HatEncoding::ONE_BASED).collect();
        assert_eq!(one, [0u8].into_iter().chain(9..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_merge_keeps_buttons() {
        let face = PadButton::RB_DOWN.mask();
        assert_eq!(merge(face, 4, HatEncoding::ZERO_BASED), face | DOWN);
        assert_eq!(merge(face, 8, HatEncoding::ZERO_BASED), face);
    }
}

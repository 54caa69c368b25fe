//! # Button Remap Engine
//!
//! Folds a source bitfield into the generic bitfield and retargets it onto a
//! destination system. Both directions use "any bit of the group is set"
//! semantics, and retargeting ORs every matching destination entry so that
//! several generic positions may drive one wire bit.

use crate::descriptor::ButtonRemapTable;

/// Generic bitfield for a source bitfield
///
/// Generic bit `i` is set when any bit of `table[i]` is set in `source_bits`.
///
/// # Examples
///
/// ```
/// use retropad_oracle::descriptor::wireless::PS_BUTTONS;
/// use retropad_oracle::descriptor::PadButton;
/// use retropad_oracle::mapping::buttons::to_generic;
///
/// // Cross on a PlayStation report is bit 5
/// assert_eq!(to_generic(1 << 5, &PS_BUTTONS), PadButton::RB_DOWN.mask());
/// assert_eq!(to_generic(0, &PS_BUTTONS), 0);
/// ```
#[must_use]
pub fn to_generic(source_bits: u32, table: &ButtonRemapTable) -> u32 {
    table
        .0
        .iter()
        .enumerate()
        .filter(|(_, &mask)| mask & source_bits != 0)
        .fold(0, |generic, (i, _)| generic | (1 << i))
}

/// Destination bitfield for a source bitfield
///
/// For every position `i` where `src_table[i]` intersects `source_bits`,
/// `dst_table[i]` is ORed into the result.
///
/// # Examples
///
/// ```
/// use retropad_oracle::descriptor::wired::N64_BUTTONS;
/// use retropad_oracle::descriptor::wireless::HID_BUTTONS;
/// use retropad_oracle::mapping::buttons::retarget;
///
/// // L and R of a HID pad both land on the N64 Z trigger
/// let l_only = retarget(1 << 8, &HID_BUTTONS, &N64_BUTTONS);
/// let r_only = retarget(1 << 9, &HID_BUTTONS, &N64_BUTTONS);
/// assert_eq!(l_only, r_only);
/// ```
#[must_use]
pub fn retarget(source_bits: u32, src_table: &ButtonRemapTable, dst_table: &ButtonRemapTable) -> u32 {
    src_table
        .0
        .iter()
        .zip(dst_table.0.iter())
        .filter(|(&src_mask, _)| src_mask & source_bits != 0)
        .fold(0, |wired, (_, &dst_mask)| wired | dst_mask)
}

/// Destination bitfield for an already generic bitfield
#[must_use]
pub fn generic_to_wired(generic_bits: u32, dst_table: &ButtonRemapTable) -> u32 {
    retarget(generic_bits, &crate::descriptor::generic::GENERIC_IDENTITY, dst_table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::registry::{SourceKind, WiredSystem};
    use crate::descriptor::wired::{layout::gc, layout::n64, GC_BUTTONS, N64_BUTTONS};
    use crate::descriptor::wireless::{HID_BUTTONS, PS_BUTTONS, SW_NATIVE_JOYCON_BUTTONS};
    use crate::descriptor::PadButton;

    // ==================== Completeness Tests ====================

    #[test]
    fn test_zero_source_is_zero_everywhere() {
        for kind in SourceKind::ALL {
            let profile = kind.profile();
            assert_eq!(to_generic(0, profile.buttons), 0);
            for system in WiredSystem::ALL {
                assert_eq!(retarget(0, profile.buttons, system.profile().buttons), 0);
            }
        }
    }

    #[test]
    fn test_all_source_bits_hit_every_used_position() {
        for kind in SourceKind::ALL {
            let table = kind.profile().buttons;
            let all_bits = table.union();
            assert_eq!(to_generic(all_bits, table), table.generic_coverage(), "{}", kind.name());
        }
    }

    #[test]
    fn test_all_source_bits_retarget_to_union_of_used_entries() {
        for kind in SourceKind::ALL {
            let src = kind.profile().buttons;
            for system in WiredSystem::ALL {
                let dst = system.profile().buttons;
                let expected = src.active_positions().fold(0, |acc, i| acc | dst.entry(i));
                assert_eq!(retarget(src.union(), src, dst), expected);
            }
        }
    }

    // ==================== HID Pad Tests ====================

    #[test]
    fn test_hid_full_field() {
        assert_eq!(to_generic(0xFFFF_FFFF, &HID_BUTTONS), 0xFFFF_F000);
        assert_eq!(retarget(0xFFFF_FFFF, &HID_BUTTONS, &N64_BUTTONS), 0x3FF0);
    }

    #[test]
    fn test_hid_b_is_n64_c_down() {
        assert_eq!(retarget(1 << 1, &HID_BUTTONS, &N64_BUTTONS), 1 << n64::C_DOWN);
    }

    #[test]
    fn test_shoulders_or_into_one_wire_bit() {
        let both = retarget((1 << 8) | (1 << 9), &HID_BUTTONS, &N64_BUTTONS);
        assert_eq!(both, 1 << n64::Z);
    }

    // ==================== Aliasing Tests ====================

    #[test]
    fn test_any_bit_of_group_sets_generic() {
        // LS on a sideways Joy-Con is either half's SL
        let entry = SW_NATIVE_JOYCON_BUTTONS.entry(PadButton::LS.index() as usize);
        let low = entry & entry.wrapping_neg();
        let high = entry & !low;
        assert_eq!(to_generic(low, &SW_NATIVE_JOYCON_BUTTONS), PadButton::LS.mask());
        assert_eq!(to_generic(high, &SW_NATIVE_JOYCON_BUTTONS), PadButton::LS.mask());
    }

    #[test]
    fn test_unmapped_source_bits_are_ignored() {
        // Hat nibble and mute bit are not in the PlayStation table
        assert_eq!(to_generic(0xF | (1 << 18), &PS_BUTTONS), 0);
    }

    #[test]
    fn test_generic_to_wired_gc() {
        let generic = PadButton::RB_DOWN.mask() | PadButton::LD_UP.mask() | PadButton::MM.mask();
        assert_eq!(
            generic_to_wired(generic, &GC_BUTTONS),
            (1 << gc::A) | (1 << gc::LD_UP) | (1 << gc::START)
        );
    }

    #[test]
    fn test_retarget_matches_two_step_path() {
        let src = &PS_BUTTONS;
        for bits in [0u32, 1 << 4, (1 << 5) | (1 << 9), 0x0003_FFF0] {
            assert_eq!(
                retarget(bits, src, &GC_BUTTONS),
                generic_to_wired(to_generic(bits, src), &GC_BUTTONS)
            );
        }
    }
}

//! # Scalar Codec Helpers
//!
//! Single-bit masks and fixed-width byte swaps used to build report payloads
//! and descriptor tables.
//!
//! The swaps saturate: a value wider than the target field is clamped to the
//! field maximum before its bytes are reversed.

/// Largest value representable in 16 bits
pub const U16_FIELD_MAX: u32 = 0xFFFF;

/// Largest value representable in 24 bits
pub const U24_FIELD_MAX: u32 = 0x00FF_FFFF;

/// Single-bit mask `1 << i`
///
/// `i` must be below 32; this is a table-building helper, so an out-of-range
/// index is a programming error and fails const evaluation.
///
/// # Examples
///
/// ```
/// use retropad_oracle::bits::bit;
///
/// assert_eq!(bit(0), 0x1);
/// assert_eq!(bit(11), 0x800);
/// ```
#[must_use]
pub const fn bit(i: u32) -> u32 {
    1 << i
}

/// Byte swap a 16-bit field, saturating wider inputs to `0xFFFF`
///
/// # Examples
///
/// ```
/// use retropad_oracle::bits::swap16;
///
/// assert_eq!(swap16(0x054C), 0x4C05);
/// assert_eq!(swap16(0x1_0000), 0xFFFF);
/// ```
#[must_use]
pub const fn swap16(value: u32) -> u16 {
    let clamped = if value > U16_FIELD_MAX { U16_FIELD_MAX } else { value };
    (clamped as u16).swap_bytes()
}

/// Byte swap a 24-bit field held in a 32-bit container
///
/// The value is swapped as 32 bits and then shifted right by 8, which leaves
/// the three meaningful bytes reversed in the low 24 bits.
///
/// # Examples
///
/// ```
/// use retropad_oracle::bits::swap24;
///
/// assert_eq!(swap24(0x0012_3456), 0x0056_3412);
/// ```
#[must_use]
pub const fn swap24(value: u32) -> u32 {
    let clamped = if value > U24_FIELD_MAX { U24_FIELD_MAX } else { value };
    clamped.swap_bytes() >> 8
}

/// Byte swap a 32-bit field, saturating wider inputs to `0xFFFF_FFFF`
#[must_use]
pub const fn swap32(value: u64) -> u32 {
    let clamped = if value > u32::MAX as u64 { u32::MAX } else { value as u32 };
    clamped.swap_bytes()
}

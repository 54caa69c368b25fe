//! # Wired System Tables
//!
//! Destination-side tables. Entry `i` of a remap table is the set of wire
//! bits generic position `i` drives; several positions may drive the same
//! wire bit.

use super::{Axis, AxisCalibration, AxisSet, ButtonRemapTable};
use crate::bits::bit;

/// Saturn system id
pub const SATURN_SYSTEM_ID: u8 = 12;

/// N64 system id
pub const N64_SYSTEM_ID: u8 = 15;

/// GameCube system id
pub const GC_SYSTEM_ID: u8 = 18;

/// Saturn pad buttons are active-low over all 16 wire bits
pub const SATURN_IDLE_BUTTONS: u32 = 0xFFFF;

/// Wire bit positions, one module per system
pub mod layout {
    pub mod gc {
        pub const A: u32 = 0;
        pub const B: u32 = 1;
        pub const X: u32 = 2;
        pub const Y: u32 = 3;
        pub const START: u32 = 4;
        pub const LD_LEFT: u32 = 8;
        pub const LD_RIGHT: u32 = 9;
        pub const LD_DOWN: u32 = 10;
        pub const LD_UP: u32 = 11;
        pub const Z: u32 = 12;
        pub const R: u32 = 13;
        pub const L: u32 = 14;
    }

    pub mod n64 {
        pub const LD_RIGHT: u32 = 0;
        pub const LD_LEFT: u32 = 1;
        pub const LD_DOWN: u32 = 2;
        pub const LD_UP: u32 = 3;
        pub const START: u32 = 4;
        pub const Z: u32 = 5;
        pub const B: u32 = 6;
        pub const A: u32 = 7;
        pub const C_RIGHT: u32 = 8;
        pub const C_LEFT: u32 = 9;
        pub const C_DOWN: u32 = 10;
        pub const C_UP: u32 = 11;
        pub const R: u32 = 12;
        pub const L: u32 = 13;
    }

    pub mod saturn {
        pub const B: u32 = 0;
        pub const C: u32 = 1;
        pub const A: u32 = 2;
        pub const START: u32 = 3;
        pub const LD_UP: u32 = 4;
        pub const LD_DOWN: u32 = 5;
        pub const LD_LEFT: u32 = 6;
        pub const LD_RIGHT: u32 = 7;
        pub const L: u32 = 11;
        pub const Z: u32 = 12;
        pub const Y: u32 = 13;
        pub const X: u32 = 14;
        pub const R: u32 = 15;
    }
}

use layout::{gc, n64, saturn};

/// GameCube: both shoulder digital clicks share Z
pub static GC_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(gc::LD_LEFT), bit(gc::LD_RIGHT), bit(gc::LD_DOWN), bit(gc::LD_UP),
    0, 0, 0, 0,
    bit(gc::B), bit(gc::X), bit(gc::A), bit(gc::Y),
    bit(gc::START), 0, 0, 0,
    0, bit(gc::Z), bit(gc::L), 0,
    0, bit(gc::Z), bit(gc::R), 0,
]);

/// N64: right stick and right cluster both drive the C buttons
pub static N64_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    bit(n64::C_LEFT), bit(n64::C_RIGHT), bit(n64::C_DOWN), bit(n64::C_UP),
    bit(n64::LD_LEFT), bit(n64::LD_RIGHT), bit(n64::LD_DOWN), bit(n64::LD_UP),
    0, bit(n64::C_RIGHT), 0, bit(n64::C_UP),
    bit(n64::B), bit(n64::C_DOWN), bit(n64::A), bit(n64::C_LEFT),
    bit(n64::START), 0, 0, 0,
    bit(n64::Z), bit(n64::L), 0, 0,
    bit(n64::Z), bit(n64::R), 0, 0,
]);

pub static SATURN_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(saturn::LD_LEFT), bit(saturn::LD_RIGHT), bit(saturn::LD_DOWN), bit(saturn::LD_UP),
    0, 0, 0, 0,
    bit(saturn::A), bit(saturn::C), bit(saturn::B), bit(saturn::Y),
    bit(saturn::START), 0, 0, 0,
    bit(saturn::L), bit(saturn::X), 0, 0,
    bit(saturn::R), bit(saturn::Z), 0, 0,
]);

const GC_MAIN_STICK: AxisCalibration = AxisCalibration::symmetric(0x80, 0x64).with_range(-128, 127);
const GC_C_STICK: AxisCalibration = AxisCalibration::symmetric(0x80, 0x5C).with_range(-128, 127);
const GC_TRIGGER: AxisCalibration = AxisCalibration::asymmetric(0x20, 0xD0, 0x00).with_range(0, 255);

pub const GC_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, GC_MAIN_STICK)
    .with(Axis::LY, GC_MAIN_STICK)
    .with(Axis::RX, GC_C_STICK)
    .with(Axis::RY, GC_C_STICK)
    .with(Axis::LM, GC_TRIGGER)
    .with(Axis::RM, GC_TRIGGER);

const N64_STICK: AxisCalibration = AxisCalibration::symmetric(0x00, 0x54).with_range(-128, 127);

pub const N64_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, N64_STICK)
    .with(Axis::LY, N64_STICK);

const SATURN_STICK: AxisCalibration = AxisCalibration::asymmetric(0x80, 0x7F, 0x80).with_range(-128, 127);
const SATURN_TRIGGER: AxisCalibration = AxisCalibration::asymmetric(0x00, 0xFF, 0x00).with_range(0, 255);

/// Saturn 3D pad in analog mode
pub const SATURN_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, SATURN_STICK)
    .with(Axis::LY, SATURN_STICK)
    .with(Axis::LM, SATURN_TRIGGER)
    .with(Axis::RM, SATURN_TRIGGER);

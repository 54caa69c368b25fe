//! # Wireless Controller Tables
//!
//! Source-side button remap tables and axis calibration defaults for each
//! supported wireless controller report format. Entry `i` of a remap table
//! is the set of report bits that press generic position `i`.

use super::{AxisCalibration, AxisSet, ButtonRemapTable, Axis};
use crate::bits::bit;

/// Report bit positions, one module per report format
pub mod layout {
    /// PlayStation 4/5 report buttons
    pub mod ps {
        pub const S: u32 = 4;
        pub const X: u32 = 5;
        pub const C: u32 = 6;
        pub const T: u32 = 7;
        pub const L1: u32 = 8;
        pub const R1: u32 = 9;
        pub const L2: u32 = 10;
        pub const R2: u32 = 11;
        pub const SHARE: u32 = 12;
        pub const OPTIONS: u32 = 13;
        pub const L3: u32 = 14;
        pub const R3: u32 = 15;
        pub const PS: u32 = 16;
        pub const TP: u32 = 17;
        pub const MUTE: u32 = 18;
    }

    /// PlayStation 3 report buttons
    pub mod ps3 {
        pub const SELECT: u32 = 8;
        pub const L3: u32 = 9;
        pub const R3: u32 = 10;
        pub const START: u32 = 11;
        pub const D_UP: u32 = 12;
        pub const D_RIGHT: u32 = 13;
        pub const D_DOWN: u32 = 14;
        pub const D_LEFT: u32 = 15;
        pub const L2: u32 = 16;
        pub const R2: u32 = 17;
        pub const L1: u32 = 18;
        pub const R1: u32 = 19;
        pub const T: u32 = 20;
        pub const C: u32 = 21;
        pub const X: u32 = 22;
        pub const S: u32 = 23;
        pub const PS: u32 = 24;
    }

    /// Xbox BLE report buttons
    pub mod xbox {
        pub const A: u32 = 0;
        pub const B: u32 = 1;
        pub const X: u32 = 3;
        pub const Y: u32 = 4;
        pub const LB: u32 = 6;
        pub const RB: u32 = 7;
        pub const VIEW: u32 = 10;
        pub const MENU: u32 = 11;
        pub const XBOX: u32 = 12;
        pub const LJ: u32 = 13;
        pub const RJ: u32 = 14;
        pub const SHARE: u32 = 16;
    }

    /// Switch default (simple HID) report buttons
    pub mod sw {
        pub const B: u32 = 0;
        pub const A: u32 = 1;
        pub const Y: u32 = 2;
        pub const X: u32 = 3;
        pub const L: u32 = 4;
        pub const R: u32 = 5;
        pub const ZL: u32 = 6;
        pub const ZR: u32 = 7;
        pub const MINUS: u32 = 8;
        pub const PLUS: u32 = 9;
        pub const LJ: u32 = 10;
        pub const RJ: u32 = 11;
        pub const HOME: u32 = 12;
        pub const CAPTURE: u32 = 13;
        pub const SL: u32 = 14;
        pub const SR: u32 = 15;
    }

    /// Switch native (full) report buttons
    ///
    /// Positions within the 32-bit word that follows the timer byte; the low
    /// byte carries battery and connection info.
    pub mod sw_native {
        pub const Y: u32 = 8;
        pub const X: u32 = 9;
        pub const B: u32 = 10;
        pub const A: u32 = 11;
        pub const R_SR: u32 = 12;
        pub const R_SL: u32 = 13;
        pub const R: u32 = 14;
        pub const ZR: u32 = 15;
        pub const MINUS: u32 = 16;
        pub const PLUS: u32 = 17;
        pub const RJ: u32 = 18;
        pub const LJ: u32 = 19;
        pub const HOME: u32 = 20;
        pub const CAPTURE: u32 = 21;
        pub const DOWN: u32 = 24;
        pub const UP: u32 = 25;
        pub const RIGHT: u32 = 26;
        pub const LEFT: u32 = 27;
        pub const L_SR: u32 = 28;
        pub const L_SL: u32 = 29;
        pub const L: u32 = 30;
        pub const ZL: u32 = 31;
    }

    /// Wiimote core buttons
    pub mod wii_core {
        pub const D_LEFT: u32 = 0;
        pub const D_RIGHT: u32 = 1;
        pub const D_DOWN: u32 = 2;
        pub const D_UP: u32 = 3;
        pub const PLUS: u32 = 4;
        pub const TWO: u32 = 8;
        pub const ONE: u32 = 9;
        pub const B: u32 = 10;
        pub const A: u32 = 11;
        pub const MINUS: u32 = 12;
        pub const HOME: u32 = 15;
    }

    /// Wii classic extension and Wii U pro buttons (shared layout)
    pub mod wii_classic {
        pub const R: u32 = 1;
        pub const PLUS: u32 = 2;
        pub const HOME: u32 = 3;
        pub const MINUS: u32 = 4;
        pub const L: u32 = 5;
        pub const D_DOWN: u32 = 6;
        pub const D_RIGHT: u32 = 7;
        pub const D_UP: u32 = 8;
        pub const D_LEFT: u32 = 9;
        pub const ZR: u32 = 10;
        pub const X: u32 = 11;
        pub const A: u32 = 12;
        pub const Y: u32 = 13;
        pub const B: u32 = 14;
        pub const ZL: u32 = 15;
        pub const RJ: u32 = 16;
        pub const LJ: u32 = 17;
    }

    /// Typical HID gamepad button usages
    pub mod hid {
        pub const A: u32 = 0;
        pub const B: u32 = 1;
        pub const C: u32 = 2;
        pub const X: u32 = 3;
        pub const Y: u32 = 4;
        pub const Z: u32 = 5;
        pub const LB: u32 = 6;
        pub const RB: u32 = 7;
        pub const L: u32 = 8;
        pub const R: u32 = 9;
        pub const SELECT: u32 = 10;
        pub const START: u32 = 11;
        pub const MENU: u32 = 12;
        pub const LJ: u32 = 13;
        pub const RJ: u32 = 14;
    }
}

use layout::{hid, ps, ps3, sw, sw_native as swn, wii_classic as wc, wii_core, xbox};

// ==================== Button Remap Tables ====================

pub static PS_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(ps::S), bit(ps::C), bit(ps::X), bit(ps::T),
    bit(ps::OPTIONS), bit(ps::SHARE), bit(ps::PS), bit(ps::TP),
    0, bit(ps::L1), 0, bit(ps::L3),
    0, bit(ps::R1), 0, bit(ps::R3),
]);

pub static PS3_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(ps3::D_LEFT), bit(ps3::D_RIGHT), bit(ps3::D_DOWN), bit(ps3::D_UP),
    0, 0, 0, 0,
    bit(ps3::S), bit(ps3::C), bit(ps3::X), bit(ps3::T),
    bit(ps3::START), bit(ps3::SELECT), bit(ps3::PS), 0,
    0, bit(ps3::L1), 0, bit(ps3::L3),
    0, bit(ps3::R1), 0, bit(ps3::R3),
]);

pub static XBOX_BLE_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(xbox::X), bit(xbox::B), bit(xbox::A), bit(xbox::Y),
    bit(xbox::MENU), bit(xbox::VIEW), bit(xbox::XBOX), bit(xbox::SHARE),
    0, bit(xbox::LB), 0, bit(xbox::LJ),
    0, bit(xbox::RB), 0, bit(xbox::RJ),
]);

pub static SW_DEFAULT_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(sw::Y), bit(sw::A), bit(sw::B), bit(sw::X),
    bit(sw::PLUS), bit(sw::MINUS), bit(sw::HOME), bit(sw::CAPTURE),
    bit(sw::ZL), bit(sw::L), 0, bit(sw::LJ),
    bit(sw::ZR), bit(sw::R), 0, bit(sw::RJ),
]);

pub static SW_NATIVE_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(swn::LEFT), bit(swn::RIGHT), bit(swn::DOWN), bit(swn::UP),
    0, 0, 0, 0,
    bit(swn::Y), bit(swn::A), bit(swn::B), bit(swn::X),
    bit(swn::PLUS), bit(swn::MINUS), bit(swn::HOME), bit(swn::CAPTURE),
    bit(swn::ZL), bit(swn::L), bit(swn::L_SL) | bit(swn::R_SL), bit(swn::LJ),
    bit(swn::ZR), bit(swn::R), bit(swn::L_SR) | bit(swn::R_SR), bit(swn::RJ),
]);

/// Single Joy-Con held sideways, either half, native report
///
/// Both halves share one table, so each face position aliases a button from
/// each half.
pub static SW_NATIVE_JOYCON_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(swn::B) | bit(swn::UP), bit(swn::X) | bit(swn::DOWN), bit(swn::A) | bit(swn::LEFT), bit(swn::Y) | bit(swn::RIGHT),
    bit(swn::CAPTURE) | bit(swn::PLUS), bit(swn::MINUS) | bit(swn::HOME), 0, 0,
    bit(swn::L_SL) | bit(swn::R_SL), bit(swn::ZL) | bit(swn::ZR), 0, bit(swn::LJ) | bit(swn::RJ),
    bit(swn::L_SR) | bit(swn::R_SR), bit(swn::L) | bit(swn::R), 0, 0,
]);

pub static SW_NATIVE_N64_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    bit(swn::X), bit(swn::MINUS), bit(swn::ZR), bit(swn::Y),
    bit(swn::LEFT), bit(swn::RIGHT), bit(swn::DOWN), bit(swn::UP),
    0, 0, 0, 0,
    bit(swn::B), 0, bit(swn::A), 0,
    bit(swn::PLUS), 0, bit(swn::HOME), bit(swn::CAPTURE),
    bit(swn::ZL), bit(swn::L), 0, 0,
    bit(swn::LJ), bit(swn::R), 0, 0,
]);

pub static SW_NATIVE_SNES_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(swn::LEFT), bit(swn::RIGHT), bit(swn::DOWN), bit(swn::UP),
    0, 0, 0, 0,
    bit(swn::Y), bit(swn::A), bit(swn::B), bit(swn::X),
    bit(swn::PLUS), bit(swn::MINUS), 0, 0,
    bit(swn::L), bit(swn::ZL), 0, 0,
    bit(swn::R), bit(swn::ZR), 0, 0,
]);

pub static SW_NATIVE_NES_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(swn::LEFT), bit(swn::RIGHT), bit(swn::DOWN), bit(swn::UP),
    0, 0, 0, 0,
    bit(swn::B), 0, bit(swn::A), 0,
    bit(swn::PLUS), bit(swn::MINUS), 0, 0,
    bit(swn::L), 0, 0, 0,
    bit(swn::R), 0, 0, 0,
]);

pub static SW_NATIVE_GENESIS_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(swn::LEFT), bit(swn::RIGHT), bit(swn::DOWN), bit(swn::UP),
    0, 0, 0, 0,
    bit(swn::A), bit(swn::R), bit(swn::B), bit(swn::Y),
    bit(swn::PLUS), bit(swn::ZR), bit(swn::HOME), bit(swn::CAPTURE),
    0, bit(swn::X), 0, 0,
    0, bit(swn::L), 0, 0,
]);

pub static SW_NATIVE_POWERA_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(swn::LEFT), bit(swn::RIGHT), bit(swn::DOWN), bit(swn::UP),
    0, 0, 0, 0,
    bit(swn::B), bit(swn::X), bit(swn::A), bit(swn::Y),
    bit(swn::PLUS), bit(swn::MINUS), bit(swn::HOME), bit(swn::CAPTURE),
    bit(swn::ZL), bit(swn::L), 0, bit(swn::LJ),
    bit(swn::ZR), bit(swn::R), 0, bit(swn::RJ),
]);

/// Retro-Fighters Brawler64, default report
pub static SW_BRAWLER64_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    bit(sw::X), bit(sw::LJ), bit(sw::Y), bit(sw::RJ),
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(sw::A), 0, bit(sw::B), 0,
    bit(sw::PLUS), bit(sw::MINUS), bit(sw::HOME), bit(sw::CAPTURE),
    bit(sw::ZL), bit(sw::L), 0, 0,
    bit(sw::ZR), bit(sw::R), 0, 0,
]);

/// Hyperkin Admiral, default report
pub static SW_ADMIRAL_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    bit(sw::MINUS), bit(sw::RJ), bit(sw::CAPTURE), bit(sw::HOME),
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(sw::B), 0, bit(sw::A), 0,
    bit(sw::PLUS), 0, 0, 0,
    bit(sw::SL), bit(sw::L), 0, 0,
    0, bit(sw::R), 0, 0,
]);

pub static WII_CORE_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(wii_core::D_UP), bit(wii_core::D_DOWN), bit(wii_core::D_LEFT), bit(wii_core::D_RIGHT),
    0, 0, 0, 0,
    bit(wii_core::ONE), bit(wii_core::B), bit(wii_core::TWO), bit(wii_core::A),
    bit(wii_core::PLUS), bit(wii_core::MINUS), bit(wii_core::HOME), 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
]);

pub static WII_CLASSIC_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(wc::D_LEFT), bit(wc::D_RIGHT), bit(wc::D_DOWN), bit(wc::D_UP),
    0, 0, 0, 0,
    bit(wc::Y), bit(wc::A), bit(wc::B), bit(wc::X),
    bit(wc::PLUS), bit(wc::MINUS), bit(wc::HOME), 0,
    0, bit(wc::ZL), bit(wc::L), 0,
    0, bit(wc::ZR), bit(wc::R), 0,
]);

pub static WII_CLASSIC_PRO_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(wc::D_LEFT), bit(wc::D_RIGHT), bit(wc::D_DOWN), bit(wc::D_UP),
    0, 0, 0, 0,
    bit(wc::Y), bit(wc::A), bit(wc::B), bit(wc::X),
    bit(wc::PLUS), bit(wc::MINUS), bit(wc::HOME), 0,
    bit(wc::ZL), bit(wc::L), 0, 0,
    bit(wc::ZR), bit(wc::R), 0, 0,
]);

pub static WIIU_PRO_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(wc::D_LEFT), bit(wc::D_RIGHT), bit(wc::D_DOWN), bit(wc::D_UP),
    0, 0, 0, 0,
    bit(wc::Y), bit(wc::A), bit(wc::B), bit(wc::X),
    bit(wc::PLUS), bit(wc::MINUS), bit(wc::HOME), 0,
    bit(wc::ZL), bit(wc::L), 0, bit(wc::LJ),
    bit(wc::ZR), bit(wc::R), 0, bit(wc::RJ),
]);

/// Generic HID gamepad with up to 20 buttons
///
/// Usages past the named ones (15 to 19) fill the remaining right-cluster
/// and trigger positions.
pub static HID_BUTTONS: ButtonRemapTable = ButtonRemapTable::new([
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    bit(15), bit(hid::Z), bit(16), bit(hid::C),
    bit(hid::X), bit(hid::B), bit(hid::A), bit(hid::Y),
    bit(hid::START), bit(hid::SELECT), bit(hid::MENU), bit(17),
    bit(hid::L), bit(hid::LB), bit(18), bit(hid::LJ),
    bit(hid::R), bit(hid::RB), bit(19), bit(hid::RJ),
]);

// ==================== Axis Calibration Defaults ====================

const STICK_8BIT: AxisCalibration = AxisCalibration::asymmetric(0x80, 0x7F, 0x80);

/// Y reads 0 at the top, so up (positive) has the 0x80 side
const STICK_8BIT_Y: AxisCalibration = AxisCalibration::asymmetric(0x80, 0x80, 0x7F).inverted();
const TRIGGER_8BIT: AxisCalibration = AxisCalibration::asymmetric(0x00, 0xFF, 0x00);

/// PlayStation 3, 4 and 5 (8-bit sticks, Y axes reported down-positive)
pub const PS_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_8BIT)
    .with(Axis::LY, STICK_8BIT_Y)
    .with(Axis::RX, STICK_8BIT)
    .with(Axis::RY, STICK_8BIT_Y)
    .with(Axis::LM, TRIGGER_8BIT)
    .with(Axis::RM, TRIGGER_8BIT);

const STICK_XBOX: AxisCalibration = AxisCalibration::asymmetric(0x8000, 0x7FFF, 0x8000);
const STICK_XBOX_Y: AxisCalibration = AxisCalibration::asymmetric(0x8000, 0x8000, 0x7FFF).inverted();
const TRIGGER_XBOX: AxisCalibration = AxisCalibration::asymmetric(0x000, 0x3FF, 0x000);

pub const XBOX_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_XBOX)
    .with(Axis::LY, STICK_XBOX_Y)
    .with(Axis::RX, STICK_XBOX)
    .with(Axis::RY, STICK_XBOX_Y)
    .with(Axis::LM, TRIGGER_XBOX)
    .with(Axis::RM, TRIGGER_XBOX);

const STICK_SW_DEFAULT: AxisCalibration = AxisCalibration::symmetric(0x8000, 0x5EEC).with_deadzone(0xB00);

/// Switch pro controller over its simple HID report
pub const SW_DEFAULT_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_SW_DEFAULT)
    .with(Axis::LY, STICK_SW_DEFAULT.inverted())
    .with(Axis::RX, STICK_SW_DEFAULT)
    .with(Axis::RY, STICK_SW_DEFAULT.inverted());

const STICK_SW_NATIVE: AxisCalibration = AxisCalibration::symmetric(0x800, 0x578);

/// Switch native report before factory calibration arrives
pub const SW_NATIVE_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_SW_NATIVE)
    .with(Axis::LY, STICK_SW_NATIVE)
    .with(Axis::RX, STICK_SW_NATIVE)
    .with(Axis::RY, STICK_SW_NATIVE);

/// Left Joy-Con held sideways
pub const SW_LEFT_JOYCON_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_SW_NATIVE.inverted())
    .with(Axis::LY, STICK_SW_NATIVE);

/// Right Joy-Con held sideways
pub const SW_RIGHT_JOYCON_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_SW_NATIVE)
    .with(Axis::LY, STICK_SW_NATIVE.inverted());

pub const SW_NATIVE_N64_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_SW_NATIVE)
    .with(Axis::LY, STICK_SW_NATIVE);

/// Third-party Switch pads with 16-bit sticks and flipped Y travel
pub const SW_THIRD_PARTY_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, AxisCalibration::asymmetric(0x8000, 0x7FFF, 0x8000))
    .with(Axis::LY, AxisCalibration::asymmetric(0x8000, 0x8000, 0x7FFF));

pub const WII_CLASSIC_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, AxisCalibration::symmetric(0x20, 0x1B))
    .with(Axis::LY, AxisCalibration::symmetric(0x20, 0x1B))
    .with(Axis::RX, AxisCalibration::symmetric(0x10, 0x0D))
    .with(Axis::RY, AxisCalibration::symmetric(0x10, 0x0D))
    .with(Axis::LM, AxisCalibration::asymmetric(0x02, 0x1D, 0x00))
    .with(Axis::RM, AxisCalibration::asymmetric(0x02, 0x1D, 0x00));

pub const WII_CLASSIC_8BIT_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, AxisCalibration::symmetric(0x80, 0x66))
    .with(Axis::LY, AxisCalibration::symmetric(0x80, 0x66))
    .with(Axis::RX, AxisCalibration::symmetric(0x80, 0x66))
    .with(Axis::RY, AxisCalibration::symmetric(0x80, 0x66))
    .with(Axis::LM, AxisCalibration::asymmetric(0x16, 0xDA, 0x00))
    .with(Axis::RM, AxisCalibration::asymmetric(0x16, 0xDA, 0x00));

const STICK_WIIU: AxisCalibration = AxisCalibration::symmetric(0x800, 0x44C);

pub const WIIU_PRO_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_WIIU)
    .with(Axis::LY, STICK_WIIU)
    .with(Axis::RX, STICK_WIIU)
    .with(Axis::RY, STICK_WIIU);

/// Generic HID pad with 8-bit usages
pub const HID_AXES: AxisSet = AxisSet::EMPTY
    .with(Axis::LX, STICK_8BIT)
    .with(Axis::LY, STICK_8BIT_Y)
    .with(Axis::RX, STICK_8BIT)
    .with(Axis::RY, STICK_8BIT_Y)
    .with(Axis::LM, TRIGGER_8BIT)
    .with(Axis::RM, TRIGGER_8BIT);

//! # Descriptor Registry
//!
//! Static dispatch from a detected device identity (type, subtype, report
//! mode) or a configured profile name to the tables the engines consume.

use super::wired::{self, GC_AXES, GC_BUTTONS, N64_AXES, N64_BUTTONS, SATURN_AXES, SATURN_BUTTONS};
use super::wireless::*;
use super::{AxisSet, CalibrationLayout, HatEncoding, SourceProfile, WiredProfile};
use crate::error::{OracleError, Result};

/// Wireless device family as reported in `device_name` records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    HidGeneric = 0,
    Ps3 = 1,
    Wii = 2,
    Xbox = 3,
    Ps = 4,
    Switch = 5,
}

impl DeviceType {
    /// Decode the numeric id the DUT reports
    #[must_use]
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::HidGeneric),
            1 => Some(Self::Ps3),
            2 => Some(Self::Wii),
            3 => Some(Self::Xbox),
            4 => Some(Self::Ps),
            5 => Some(Self::Switch),
            _ => None,
        }
    }
}

/// Device subtype as reported in `device_name` and `type_update` records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSubtype {
    Default = 0,
    WiiNunchuck,
    WiiClassic,
    WiiClassic8bit,
    WiiClassicPro,
    WiiClassicPro8bit,
    WiiuPro,
    Ps5Ds,
    XboxXinput,
    XboxXs,
    XboxAdaptive,
    SwLeftJoycon,
    SwRightJoycon,
    SwNes,
    SwSnes,
    SwN64,
    SwMdGen,
    SwPowerA,
    SwHyperkinAdmiral,
    Gbros,
}

impl DeviceSubtype {
    const ALL: [DeviceSubtype; 20] = [
        Self::Default, Self::WiiNunchuck, Self::WiiClassic, Self::WiiClassic8bit,
        Self::WiiClassicPro, Self::WiiClassicPro8bit, Self::WiiuPro, Self::Ps5Ds,
        Self::XboxXinput, Self::XboxXs, Self::XboxAdaptive, Self::SwLeftJoycon,
        Self::SwRightJoycon, Self::SwNes, Self::SwSnes, Self::SwN64, Self::SwMdGen,
        Self::SwPowerA, Self::SwHyperkinAdmiral, Self::Gbros,
    ];

    /// Decode the numeric id the DUT reports
    #[must_use]
    pub fn from_id(id: i64) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Report format a Switch-family controller is driven in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Simple HID report every controller supports out of the box
    Default,
    /// Full report enabled after the DUT switches the controller over
    Native,
}

/// Every wireless controller mode with tables in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Ps4,
    Ps5,
    Ps3,
    Xbox,
    SwitchDefault,
    SwitchPro,
    SwitchLeftJoycon,
    SwitchRightJoycon,
    SwitchN64,
    SwitchSnes,
    SwitchNes,
    SwitchGenesis,
    SwitchPowerA,
    SwitchAdmiral,
    SwitchBrawler64,
    Wiimote,
    WiiClassic,
    WiiClassic8bit,
    WiiClassicPro,
    WiiClassicPro8bit,
    WiiuPro,
    HidGeneric,
}

impl SourceKind {
    pub const ALL: [SourceKind; 22] = [
        Self::Ps4, Self::Ps5, Self::Ps3, Self::Xbox, Self::SwitchDefault, Self::SwitchPro,
        Self::SwitchLeftJoycon, Self::SwitchRightJoycon, Self::SwitchN64, Self::SwitchSnes,
        Self::SwitchNes, Self::SwitchGenesis, Self::SwitchPowerA, Self::SwitchAdmiral,
        Self::SwitchBrawler64, Self::Wiimote, Self::WiiClassic, Self::WiiClassic8bit,
        Self::WiiClassicPro, Self::WiiClassicPro8bit, Self::WiiuPro, Self::HidGeneric,
    ];

    /// Configuration name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ps4 => "ps4",
            Self::Ps5 => "ps5",
            Self::Ps3 => "ps3",
            Self::Xbox => "xbox",
            Self::SwitchDefault => "sw_default",
            Self::SwitchPro => "sw_pro",
            Self::SwitchLeftJoycon => "sw_left_joycon",
            Self::SwitchRightJoycon => "sw_right_joycon",
            Self::SwitchN64 => "sw_n64",
            Self::SwitchSnes => "sw_snes",
            Self::SwitchNes => "sw_nes",
            Self::SwitchGenesis => "sw_genesis",
            Self::SwitchPowerA => "sw_powera",
            Self::SwitchAdmiral => "sw_admiral",
            Self::SwitchBrawler64 => "sw_brawler64",
            Self::Wiimote => "wiimote",
            Self::WiiClassic => "wii_classic",
            Self::WiiClassic8bit => "wii_classic_8bit",
            Self::WiiClassicPro => "wii_classic_pro",
            Self::WiiClassicPro8bit => "wii_classic_pro_8bit",
            Self::WiiuPro => "wiiu_pro",
            Self::HidGeneric => "hid",
        }
    }

    /// Device identity the DUT reports for this mode
    #[must_use]
    pub const fn identity(self) -> (DeviceType, DeviceSubtype, ReportMode) {
        use DeviceSubtype as S;
        use DeviceType as T;
        use ReportMode::{Default as D, Native as N};
        match self {
            Self::Ps4 => (T::Ps, S::Default, D),
            Self::Ps5 => (T::Ps, S::Ps5Ds, D),
            Self::Ps3 => (T::Ps3, S::Default, D),
            Self::Xbox => (T::Xbox, S::Default, D),
            Self::SwitchDefault => (T::Switch, S::Default, D),
            Self::SwitchPro => (T::Switch, S::Default, N),
            Self::SwitchLeftJoycon => (T::Switch, S::SwLeftJoycon, N),
            Self::SwitchRightJoycon => (T::Switch, S::SwRightJoycon, N),
            Self::SwitchN64 => (T::Switch, S::SwN64, N),
            Self::SwitchSnes => (T::Switch, S::SwSnes, N),
            Self::SwitchNes => (T::Switch, S::SwNes, N),
            Self::SwitchGenesis => (T::Switch, S::SwMdGen, N),
            Self::SwitchPowerA => (T::Switch, S::SwPowerA, N),
            Self::SwitchAdmiral => (T::Switch, S::SwHyperkinAdmiral, D),
            Self::SwitchBrawler64 => (T::Switch, S::SwN64, D),
            Self::Wiimote => (T::Wii, S::Default, D),
            Self::WiiClassic => (T::Wii, S::WiiClassic, D),
            Self::WiiClassic8bit => (T::Wii, S::WiiClassic8bit, D),
            Self::WiiClassicPro => (T::Wii, S::WiiClassicPro, D),
            Self::WiiClassicPro8bit => (T::Wii, S::WiiClassicPro8bit, D),
            Self::WiiuPro => (T::Wii, S::WiiuPro, D),
            Self::HidGeneric => (T::HidGeneric, S::Default, D),
        }
    }

    /// Tables for this mode
    #[must_use]
    pub fn profile(self) -> SourceProfile {
        let (buttons, axes, hat, calibration) = match self {
            Self::Ps4 | Self::Ps5 => (&PS_BUTTONS, PS_AXES, Some(HatEncoding::ZERO_BASED), None),
            Self::Ps3 => (&PS3_BUTTONS, PS_AXES, None, None),
            Self::Xbox => (&XBOX_BLE_BUTTONS, XBOX_AXES, Some(HatEncoding::ONE_BASED), None),
            Self::SwitchDefault => (&SW_DEFAULT_BUTTONS, SW_DEFAULT_AXES, Some(HatEncoding::ZERO_BASED), None),
            Self::SwitchPro => (&SW_NATIVE_BUTTONS, SW_NATIVE_AXES, None, Some(CalibrationLayout::Direct)),
            Self::SwitchLeftJoycon => (
                &SW_NATIVE_JOYCON_BUTTONS,
                SW_LEFT_JOYCON_AXES,
                None,
                Some(CalibrationLayout::SwappedPairs),
            ),
            Self::SwitchRightJoycon => (
                &SW_NATIVE_JOYCON_BUTTONS,
                SW_RIGHT_JOYCON_AXES,
                None,
                Some(CalibrationLayout::Direct),
            ),
            Self::SwitchN64 => (&SW_NATIVE_N64_BUTTONS, SW_NATIVE_N64_AXES, None, Some(CalibrationLayout::Direct)),
            Self::SwitchSnes => (&SW_NATIVE_SNES_BUTTONS, AxisSet::EMPTY, None, None),
            Self::SwitchNes => (&SW_NATIVE_NES_BUTTONS, AxisSet::EMPTY, None, None),
            Self::SwitchGenesis => (&SW_NATIVE_GENESIS_BUTTONS, AxisSet::EMPTY, None, None),
            Self::SwitchPowerA => (&SW_NATIVE_POWERA_BUTTONS, SW_NATIVE_AXES, None, Some(CalibrationLayout::Direct)),
            Self::SwitchAdmiral => (&SW_ADMIRAL_BUTTONS, SW_THIRD_PARTY_AXES, Some(HatEncoding::ZERO_BASED), None),
            Self::SwitchBrawler64 => (&SW_BRAWLER64_BUTTONS, SW_THIRD_PARTY_AXES, Some(HatEncoding::ZERO_BASED), None),
            Self::Wiimote => (&WII_CORE_BUTTONS, AxisSet::EMPTY, None, None),
            Self::WiiClassic => (&WII_CLASSIC_BUTTONS, WII_CLASSIC_AXES, None, None),
            Self::WiiClassic8bit => (&WII_CLASSIC_BUTTONS, WII_CLASSIC_8BIT_AXES, None, None),
            Self::WiiClassicPro => (&WII_CLASSIC_PRO_BUTTONS, WII_CLASSIC_AXES, None, None),
            Self::WiiClassicPro8bit => (&WII_CLASSIC_PRO_BUTTONS, WII_CLASSIC_8BIT_AXES, None, None),
            Self::WiiuPro => (&WIIU_PRO_BUTTONS, WIIU_PRO_AXES, None, None),
            Self::HidGeneric => (&HID_BUTTONS, HID_AXES, Some(HatEncoding::ONE_BASED), None),
        };

        SourceProfile {
            name: self.name(),
            buttons,
            axes,
            hat,
            calibration,
        }
    }

    /// Mode matching a DUT-reported identity
    ///
    /// An unknown subtype of a known family falls back to that family's
    /// default-subtype mode in the same report mode.
    #[must_use]
    pub fn resolve(device_type: DeviceType, subtype: DeviceSubtype, mode: ReportMode) -> Option<Self> {
        let exact = Self::ALL
            .into_iter()
            .find(|kind| kind.identity() == (device_type, subtype, mode));

        exact.or_else(|| {
            Self::ALL
                .into_iter()
                .find(|kind| kind.identity() == (device_type, DeviceSubtype::Default, mode))
        })
    }

    /// Mode for a configuration name
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownProfile` for names not in [`SourceKind::ALL`].
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| OracleError::UnknownProfile(name.to_string()))
    }
}

/// Wired destination systems with tables in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiredSystem {
    GameCube,
    N64,
    Saturn,
}

impl WiredSystem {
    pub const ALL: [WiredSystem; 3] = [Self::GameCube, Self::N64, Self::Saturn];

    /// Configuration name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GameCube => "gc",
            Self::N64 => "n64",
            Self::Saturn => "saturn",
        }
    }

    /// System id the DUT expects in a system-id command
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::GameCube => wired::GC_SYSTEM_ID,
            Self::N64 => wired::N64_SYSTEM_ID,
            Self::Saturn => wired::SATURN_SYSTEM_ID,
        }
    }

    /// Tables for this system
    #[must_use]
    pub fn profile(self) -> WiredProfile {
        let (buttons, idle_buttons, axes) = match self {
            Self::GameCube => (&GC_BUTTONS, 0, GC_AXES),
            Self::N64 => (&N64_BUTTONS, 0, N64_AXES),
            Self::Saturn => (&SATURN_BUTTONS, wired::SATURN_IDLE_BUTTONS, SATURN_AXES),
        };

        WiredProfile {
            name: self.name(),
            system_id: self.id(),
            buttons,
            idle_buttons,
            axes,
        }
    }

    /// System for a DUT system id
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|system| system.id() == id)
    }

    /// System for a configuration name
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownProfile` for unsupported names.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|system| system.name() == name)
            .ok_or_else(|| OracleError::UnknownProfile(name.to_string()))
    }
}

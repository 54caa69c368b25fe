//! Comparison of observed DUT records against a scenario's expected output

use std::fmt;

use serde::Serialize;

use super::scenarios::Scenario;
use crate::descriptor::Axis;
use crate::mapping::axis::AxisSample;
use crate::protocol::record::{StageRecord, StageRecords};

/// Pipeline stage a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Wireless,
    Generic,
    Mapped,
    Wired,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Self::Wireless, Self::Generic, Self::Mapped, Self::Wired];

    /// Record tag the DUT uses for this stage
    #[must_use]
    pub const fn log_type(self) -> &'static str {
        match self {
            Self::Wireless => "wireless_input",
            Self::Generic => "generic_input",
            Self::Mapped => "mapped_input",
            Self::Wired => "wired_output",
        }
    }

    fn observed(self, records: &StageRecords) -> Option<&StageRecord> {
        match self {
            Self::Wireless => records.wireless.as_ref(),
            Self::Generic => records.generic.as_ref(),
            Self::Mapped => records.mapped.as_ref(),
            Self::Wired => records.wired.as_ref(),
        }
    }

    fn axis_value(self, sample: &AxisSample) -> i32 {
        match self {
            Self::Wireless => sample.wireless,
            Self::Generic => sample.generic,
            Self::Mapped => sample.mapped,
            Self::Wired => sample.wired,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_type())
    }
}

/// Part of a stage record that disagreed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The whole record was missing
    Record,
    Buttons,
    Axis(Axis),
}

/// One disagreement between the model and the DUT
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub stage: Stage,
    pub field: Field,
    pub expected: i64,
    /// `None` when the DUT did not report the value at all
    pub observed: Option<i64>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.field, self.observed) {
            (Field::Record, _) => write!(f, "{}: record missing", self.stage),
            (Field::Buttons, Some(observed)) => write!(
                f,
                "{} buttons: expected 0x{:08X}, observed 0x{:08X}",
                self.stage, self.expected, observed
            ),
            (Field::Axis(axis), Some(observed)) => write!(
                f,
                "{} {:?}: expected {}, observed {}",
                self.stage, axis, self.expected, observed
            ),
            (field, None) => write!(f, "{} {:?}: expected {}, not reported", self.stage, field, self.expected),
        }
    }
}

/// Compare one response against a scenario
///
/// `wireless_mask` selects the source button bits that carry buttons; the
/// DUT echoes the raw field, which may share bits with a hat or status byte.
/// The mapped stage carries generic buttons unchanged.
///
/// # Returns
///
/// Every mismatch found, empty if the DUT agreed with the model.
#[must_use]
pub fn verify(scenario: &Scenario, observed: &StageRecords, wireless_mask: u32) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    for stage in Stage::ALL {
        let Some(record) = stage.observed(observed) else {
            mismatches.push(Mismatch {
                stage,
                field: Field::Record,
                expected: 0,
                observed: None,
            });
            continue;
        };

        let (expected_buttons, observed_buttons) = match stage {
            Stage::Wireless => (scenario.input.buttons & wireless_mask, record.btns.primary() & wireless_mask),
            Stage::Generic | Stage::Mapped => (scenario.expected.generic_buttons, record.btns.primary()),
            Stage::Wired => (scenario.expected.wired_buttons, record.btns.primary()),
        };
        if expected_buttons != observed_buttons {
            mismatches.push(Mismatch {
                stage,
                field: Field::Buttons,
                expected: i64::from(expected_buttons),
                observed: Some(i64::from(observed_buttons)),
            });
        }

        for axis in Axis::ALL {
            let Some(sample) = scenario.expected.axis(axis) else {
                continue;
            };

            let expected = stage.axis_value(&sample);
            let observed_value = record.axis(axis as usize);
            if observed_value != Some(expected) {
                mismatches.push(Mismatch {
                    stage,
                    field: Field::Axis(axis),
                    expected: i64::from(expected),
                    observed: observed_value.map(i64::from),
                });
            }
        }
    }

    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::registry::{SourceKind, WiredSystem};
    use crate::mapping::PadMapper;
    use crate::oracle::scenarios::generate;
    use crate::protocol::record::{ButtonField, Record};

    fn ps4_scenario(name: &str) -> Scenario {
        let mapper = PadMapper::new(SourceKind::Ps4.profile(), WiredSystem::GameCube.profile());
        generate(&mapper)
            .into_iter()
            .find(|s| s.name == name)
            .unwrap()
    }

    /// Records exactly as a conforming DUT would print them
    fn conforming(scenario: &Scenario, wireless_extra: u32) -> StageRecords {
        let stage = |pick: fn(&AxisSample) -> i32, btns: ButtonField| StageRecord {
            report_id: None,
            axes: scenario
                .expected
                .axes
                .iter()
                .map(|sample| sample.as_ref().map(pick).unwrap_or(0))
                .collect(),
            btns,
            hat: None,
        };

        [
            Record::WirelessInput(stage(|s| s.wireless, ButtonField::Word(scenario.input.buttons | wireless_extra))),
            Record::GenericInput(stage(|s| s.generic, ButtonField::Words(vec![scenario.expected.generic_buttons, 0]))),
            Record::MappedInput(stage(|s| s.mapped, ButtonField::Word(scenario.expected.generic_buttons))),
            Record::WiredOutput(stage(|s| s.wired, ButtonField::Word(scenario.expected.wired_buttons))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_conforming_response_passes() {
        let scenario = ps4_scenario("buttons/RB_DOWN");
        let mask = SourceKind::Ps4.profile().buttons.union();
        // hat nibble reads "released" in the raw field
        let observed = conforming(&scenario, 0x8);
        assert!(verify(&scenario, &observed, mask).is_empty());
    }

    #[test]
    fn test_wrong_wired_axis() {
        let scenario = ps4_scenario("axis/LX/positive/extreme");
        let mut observed = conforming(&scenario, 0);
        if let Some(wired) = observed.wired.as_mut() {
            wired.axes[0] = 0xE3;
        }

        let mismatches = verify(&scenario, &observed, u32::MAX);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].stage, Stage::Wired);
        assert_eq!(mismatches[0].field, Field::Axis(Axis::LX));
        assert_eq!(mismatches[0].expected, 0xE4);
        assert_eq!(mismatches[0].observed, Some(0xE3));
        assert_eq!(mismatches[0].to_string(), "wired_output LX: expected 228, observed 227");
    }

    #[test]
    fn test_wrong_generic_buttons() {
        let scenario = ps4_scenario("buttons/RB_DOWN");
        let mut observed = conforming(&scenario, 0);
        if let Some(generic) = observed.generic.as_mut() {
            generic.btns = ButtonField::Words(vec![0]);
        }

        let mismatches = verify(&scenario, &observed, u32::MAX);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].field, Field::Buttons);
        assert_eq!(mismatches[0].observed, Some(0));
    }

    #[test]
    fn test_missing_stage_and_axis() {
        let scenario = ps4_scenario("buttons/none");
        let mut observed = conforming(&scenario, 0);
        observed.mapped = None;
        if let Some(wired) = observed.wired.as_mut() {
            wired.axes.truncate(2);
        }

        let mismatches = verify(&scenario, &observed, u32::MAX);
        assert!(mismatches
            .iter()
            .any(|m| m.stage == Stage::Mapped && m.field == Field::Record));
        let missing_axes: Vec<_> = mismatches
            .iter()
            .filter(|m| m.stage == Stage::Wired && m.observed.is_none())
            .collect();
        assert_eq!(missing_axes.len(), 4);
        assert_eq!(missing_axes[0].to_string(), "wired_output Axis(RX): expected 128, not reported");
    }

    #[test]
    fn test_mismatch_serializes() {
        let mismatch = Mismatch {
            stage: Stage::Generic,
            field: Field::Axis(Axis::RY),
            expected: -5,
            observed: None,
        };
        let json = serde_json::to_string(&mismatch).unwrap();
        assert_eq!(json, r#"{"stage":"generic","field":{"axis":"RY"},"expected":-5,"observed":null}"#);
    }
}

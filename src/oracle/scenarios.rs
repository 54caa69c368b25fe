//! Scenario generation
//!
//! Every scenario is a single report built on the neutral report of the
//! source, with the expected output computed by [`PadMapper::map`].

use serde::Serialize;

use crate::descriptor::{Axis, PadButton};
use crate::mapping::axis::{deadzone, QuantizationSteps};
use crate::mapping::{PadInput, PadMapper, PadOutput};

/// What a scenario exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Buttons,
    Hat,
    Axis,
}

/// One report and the output the adapter should produce for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub kind: ScenarioKind,
    pub input: PadInput,
    pub expected: PadOutput,
}

/// Every scenario for a mapper, in a stable order: buttons, hat, then axes
///
/// # Examples
///
/// ```
/// use retropad_oracle::descriptor::registry::{SourceKind, WiredSystem};
/// use retropad_oracle::mapping::PadMapper;
/// use retropad_oracle::oracle::scenarios::generate;
///
/// let mapper = PadMapper::new(SourceKind::Ps4.profile(), WiredSystem::GameCube.profile());
/// let scenarios = generate(&mapper);
/// assert_eq!(scenarios[0].name, "buttons/none");
/// ```
#[must_use]
pub fn generate(mapper: &PadMapper) -> Vec<Scenario> {
    let mut scenarios = Vec::new();
    button_scenarios(mapper, &mut scenarios);
    hat_scenarios(mapper, &mut scenarios);
    axis_scenarios(mapper, &mut scenarios);
    scenarios
}

fn push(scenarios: &mut Vec<Scenario>, mapper: &PadMapper, name: String, kind: ScenarioKind, input: PadInput) {
    scenarios.push(Scenario {
        name,
        kind,
        expected: mapper.map(&input),
        input,
    });
}

/// No buttons, each table entry alone, then every mapped bit at once
fn button_scenarios(mapper: &PadMapper, scenarios: &mut Vec<Scenario>) {
    let table = mapper.source().buttons;
    let base = PadInput::neutral(&mapper.source().axes);

    push(scenarios, mapper, "buttons/none".to_string(), ScenarioKind::Buttons, base);

    for position in table.active_positions() {
        let label = PadButton::from_index(position)
            .map(|button| format!("{:?}", button))
            .unwrap_or_else(|| position.to_string());
        let input = base.with_buttons(table.entry(position));
        push(scenarios, mapper, format!("buttons/{}", label), ScenarioKind::Buttons, input);
    }

    push(
        scenarios,
        mapper,
        "buttons/all".to_string(),
        ScenarioKind::Buttons,
        base.with_buttons(table.union()),
    );
}

fn hat_scenarios(mapper: &PadMapper, scenarios: &mut Vec<Scenario>) {
    if mapper.source().hat.is_none() {
        return;
    }

    let base = PadInput::neutral(&mapper.source().axes);
    for code in 0u8..16 {
        push(scenarios, mapper, format!("hat/{}", code), ScenarioKind::Hat, base.with_hat(code));
    }
}

/// Boundary samples for every axis both sides have
///
/// Per direction: the deadzone edge (last raw value that maps to 0) and the
/// true extreme. Where the source has at least two raw units per
/// destination unit, also the smallest displacement that moves the output
/// and one that must not.
fn axis_scenarios(mapper: &PadMapper, scenarios: &mut Vec<Scenario>) {
    let base = PadInput::neutral(&mapper.source().axes);

    for (axis, src) in mapper.source().axes.iter() {
        let Some(dst) = mapper.wired().axes.get(axis) else {
            continue;
        };

        push(scenarios, mapper, format!("axis/{:?}/zero", axis), ScenarioKind::Axis, base);

        for (direction_label, direction) in [("positive", 1), ("negative", -1)] {
            // Raw direction that produces a generic value of this sign
            let toward = axis.net_sign(src.inverted) * direction;
            let extent = src.extent_for(direction);
            if extent <= 0 {
                continue;
            }

            let dz = deadzone(extent, src.fixed_deadzone, mapper.deadzone_fraction());
            let dst_extent = dst.extent_for(axis.net_sign(dst.inverted) * direction);
            let steps = QuantizationSteps::new(extent, dst_extent);

            let mut samples = vec![("deadzone", dz), ("extreme", extent)];
            if steps.is_resolvable() && dz + steps.one_step < extent {
                samples.push(("min_step", dz + steps.one_step));
                samples.push(("sub_step", dz + steps.half_step));
            }

            for (sample, magnitude) in samples {
                let input = base.with_axis(axis, src.neutral + toward * magnitude);
                let name = axis_name(axis, direction_label, sample);
                push(scenarios, mapper, name, ScenarioKind::Axis, input);
            }
        }
    }
}

fn axis_name(axis: Axis, direction: &str, sample: &str) -> String {
    format!("axis/{:?}/{}/{}", axis, direction, sample)
}

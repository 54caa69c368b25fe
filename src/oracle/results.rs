//! # Scenario Results
//!
//! One JSON object per line, appended as scenarios complete:
//!
//! ```json
//! {"timestamp":"2026-01-01T12:00:00.000Z","source":"ps4","destination":"gc","scenario":"hat/0","kind":"hat","passed":true,"mismatches":[]}
//! ```
//!
//! The same writer prints the model's expected records when no DUT is
//! attached, in the keyed form the DUT itself answers with.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use super::scenarios::{Scenario, ScenarioKind};
use super::verify::Mismatch;
use crate::descriptor::{Axis, AXIS_COUNT};
use crate::error::Result;
use crate::mapping::axis::AxisSample;
use crate::protocol::record::{ButtonField, StageRecord};

/// Outcome of one scenario against the DUT
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub timestamp: String,
    pub source: String,
    pub destination: String,
    pub scenario: String,
    pub kind: ScenarioKind,
    pub passed: bool,
    pub mismatches: Vec<Mismatch>,
}

impl ScenarioResult {
    /// Result stamped with the current UTC time
    #[must_use]
    pub fn new(source: &str, destination: &str, scenario: &Scenario, mismatches: Vec<Mismatch>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source: source.to_string(),
            destination: destination.to_string(),
            scenario: scenario.name.clone(),
            kind: scenario.kind,
            passed: mismatches.is_empty(),
            mismatches,
        }
    }
}

/// The records a conforming DUT prints for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ExpectedRecords {
    pub scenario: String,
    pub kind: ScenarioKind,
    pub wireless_input: StageRecord,
    pub generic_input: StageRecord,
    pub mapped_input: StageRecord,
    pub wired_output: StageRecord,
}

impl From<&Scenario> for ExpectedRecords {
    fn from(scenario: &Scenario) -> Self {
        // Axes absent on either side are printed as 0
        let axes = |pick: fn(&AxisSample) -> i32| -> Vec<i32> {
            (0..AXIS_COUNT)
                .map(|index| {
                    Axis::from_index(index)
                        .and_then(|axis| scenario.expected.axis(axis))
                        .map_or(0, |sample| pick(&sample))
                })
                .collect()
        };
        let stage = |pick: fn(&AxisSample) -> i32, btns: u32, hat: Option<u8>| StageRecord {
            report_id: None,
            axes: axes(pick),
            btns: ButtonField::Word(btns),
            hat,
        };
        let expected = &scenario.expected;

        Self {
            scenario: scenario.name.clone(),
            kind: scenario.kind,
            wireless_input: stage(|s| s.wireless, scenario.input.buttons, scenario.input.hat),
            generic_input: stage(|s| s.generic, expected.generic_buttons, None),
            mapped_input: stage(|s| s.mapped, expected.generic_buttons, None),
            wired_output: stage(|s| s.wired, expected.wired_buttons, None),
        }
    }
}

/// Line-per-object JSON writer
pub struct JsonlWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl JsonlWriter<BufWriter<File>> {
    /// Append to a results file, creating it and its directory if needed
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Io` if the directory or file cannot be created
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Writing results to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Write one value as a single line
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized or written
    pub fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far
    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and hand back the underlying writer
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Io` if the flush fails
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

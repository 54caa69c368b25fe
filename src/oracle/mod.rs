//! # Oracle
//!
//! Drives the DUT through a session and checks every stage it reports
//! against the mapping model.
//!
//! A session runs in this order:
//!
//! 1. Disconnect whatever is on the handle
//! 2. Select the wired system
//! 3. Connect and announce the source by name (plus a descriptor for the HID pad)
//! 4. For a pad that self-reports calibration, inject its calibration
//!    replies and adopt the `calib_data` the DUT prints
//! 5. Inject two neutral reports, adopting any stick calibration the DUT reports
//! 6. Inject every scenario and verify the response

pub mod results;
pub mod scenarios;
pub mod verify;

use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::OracleConfig;
use crate::descriptor::registry::{SourceKind, WiredSystem};
use crate::error::{OracleError, Result};
use crate::mapping::{PadInput, PadMapper};
use crate::protocol::command::Command;
use crate::protocol::record::StageRecords;
use crate::protocol::report::{self, HID_PAD_DESCRIPTOR};
use crate::transport::DutClient;
use results::{JsonlWriter, ScenarioResult};
use scenarios::Scenario;

/// Neutral reports sent before the first scenario
const WARMUP_REPORTS: usize = 2;

/// Totals for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    /// Scenarios the source's report format cannot express
    pub skipped: usize,
}

impl RunSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Model and session state for one source and destination pair
#[derive(Debug, Clone)]
pub struct Oracle {
    kind: SourceKind,
    system: WiredSystem,
    mapper: PadMapper,
    device_name: Option<String>,
}

impl Oracle {
    pub fn new(kind: SourceKind, system: WiredSystem, deadzone_fraction: f32) -> Self {
        Self {
            kind,
            system,
            mapper: PadMapper::with_deadzone(kind.profile(), system.profile(), deadzone_fraction),
            device_name: None,
        }
    }

    /// Oracle for the configured profile pair
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownProfile` if either name is unknown
    ///
    /// # Examples
    ///
    /// ```
    /// use retropad_oracle::config::OracleConfig;
    /// use retropad_oracle::oracle::Oracle;
    ///
    /// let oracle = Oracle::from_config(&OracleConfig::default()).unwrap();
    /// assert!(!oracle.scenarios().is_empty());
    /// ```
    pub fn from_config(config: &OracleConfig) -> Result<Self> {
        let mut oracle = Self::new(config.source_kind()?, config.wired_system()?, config.deadzone_fraction);
        oracle.device_name = config.device_name.clone();
        Ok(oracle)
    }

    #[must_use]
    pub fn mapper(&self) -> &PadMapper {
        &self.mapper
    }

    /// Scenarios under the current calibration
    #[must_use]
    pub fn scenarios(&self) -> Vec<Scenario> {
        scenarios::generate(&self.mapper)
    }

    /// Name the source is announced with
    fn device_name(&self) -> Result<String> {
        self.device_name
            .clone()
            .or_else(|| report::device_name(self.kind).map(str::to_string))
            .ok_or_else(|| {
                OracleError::UnknownProfile(format!("{} has no report encoder to drive a DUT", self.kind.name()))
            })
    }

    /// Run a whole session against the DUT
    ///
    /// Scenario failures are counted, not returned; only link and protocol
    /// failures abort the session.
    ///
    /// # Errors
    ///
    /// Returns error if the source cannot be driven, a command fails, or a
    /// result line cannot be written
    pub async fn run<W: Write>(
        &mut self,
        client: &mut DutClient,
        mut results: Option<&mut JsonlWriter<W>>,
    ) -> Result<RunSummary> {
        self.setup(client).await?;

        let mask = self.mapper.source().buttons.union();
        let mut summary = RunSummary::default();

        for scenario in self.scenarios() {
            let Some(report) = report::encode(self.kind, &scenario.input) else {
                warn!("Skipping {}: not expressible in a {} report", scenario.name, self.kind.name());
                summary.skipped += 1;
                continue;
            };

            let observed = client.inject(&report).await?;
            let mismatches = verify::verify(&scenario, &observed, mask);

            if mismatches.is_empty() {
                debug!("PASS {}", scenario.name);
                summary.passed += 1;
            } else {
                for mismatch in &mismatches {
                    warn!("FAIL {}: {}", scenario.name, mismatch);
                }
                summary.failed += 1;
            }

            if let Some(writer) = results.as_deref_mut() {
                writer.write(&ScenarioResult::new(
                    self.kind.name(),
                    self.system.name(),
                    &scenario,
                    mismatches,
                ))?;
            }
        }

        info!(
            "{} scenarios: {} passed, {} failed, {} skipped",
            summary.total(),
            summary.passed,
            summary.failed,
            summary.skipped
        );
        Ok(summary)
    }

    async fn setup(&mut self, client: &mut DutClient) -> Result<()> {
        let name = self.device_name()?;

        client.send(&Command::Disconnect).await?;
        client.send(&Command::SystemId(self.system.id())).await?;
        client.send(&Command::Connect { ble: false }).await?;

        let response = client.send(&Command::Name(name.clone())).await?;
        self.adopt(&response)?;
        if let Some(device) = &response.device {
            info!(
                "DUT detected \"{}\" as type {}:{}",
                name, device.device_type, device.device_subtype
            );
        }

        if self.kind == SourceKind::HidGeneric {
            let response = client.send(&Command::HidDescriptor(HID_PAD_DESCRIPTOR.to_vec())).await?;
            self.adopt(&response)?;
        }

        if self.mapper.source().calibration.is_some() {
            if let Some(reports) = report::calibration_reports(self.kind) {
                let response = client.calibrate(&reports).await?;
                self.adopt(&response)?;
            }
        }

        let neutral = report::encode(self.kind, &PadInput::neutral(&self.mapper.source().axes))
            .ok_or_else(|| OracleError::UnknownProfile(format!("{} has no report encoder", self.kind.name())))?;
        for _ in 0..WARMUP_REPORTS {
            let response = client.inject(&neutral).await?;
            self.adopt(&response)?;
        }

        info!("Session ready: {} -> {}", self.kind.name(), self.system.name());
        Ok(())
    }

    /// Take over stick calibration the DUT reported
    fn adopt(&mut self, response: &StageRecords) -> Result<()> {
        if let Some(calibration) = &response.calibration {
            self.mapper.apply_calibration(calibration)?;
            info!("Adopted stick calibration for {}", self.kind.name());
        }
        Ok(())
    }
}

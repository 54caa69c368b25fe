//! # DUT Transport
//!
//! Talks to the adapter under test over TCP or a serial port.
//!
//! This module handles:
//! - Opening the link, with retries
//! - Framing and sending [`Command`]s
//! - Collecting the JSON records the DUT answers with
//!
//! Only one command is ever in flight; every request waits for its response
//! before the next is sent.

pub mod link;

use std::time::Duration;

use tokio::net::TcpStream;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

use crate::config::{DutConfig, TransportKind};
use crate::error::{OracleError, Result};
use crate::protocol::command::Command;
use crate::protocol::record::{decode_line, StageRecords};
use link::{DutLink, StreamLink};

/// Client for one DUT handle
pub struct DutClient {
    link: Box<dyn DutLink>,
    handle: u8,
    response_timeout: Duration,
    max_lines: usize,
}

impl std::fmt::Debug for DutClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DutClient")
            .field("handle", &self.handle)
            .field("response_timeout", &self.response_timeout)
            .field("max_lines", &self.max_lines)
            .finish_non_exhaustive()
    }
}

impl DutClient {
    /// Client over an already open link
    pub fn new(link: Box<dyn DutLink>, config: &DutConfig) -> Self {
        Self {
            link,
            handle: config.handle,
            response_timeout: Duration::from_millis(config.response_timeout_ms),
            max_lines: config.max_lines_per_response,
        }
    }

    /// Open the configured link
    ///
    /// Retries `connect_retries` times, `retry_interval_ms` apart.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Transport` with the last failure once every
    /// attempt has failed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use retropad_oracle::config::DutConfig;
    /// use retropad_oracle::protocol::command::Command;
    /// use retropad_oracle::transport::DutClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut client = DutClient::connect(&DutConfig::default()).await?;
    ///     client.send(&Command::Disconnect).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(config: &DutConfig) -> Result<Self> {
        let mut last_error = OracleError::Transport("no connection attempt made".to_string());

        for attempt in 1..=config.connect_retries {
            debug!("Connecting to DUT (attempt {}/{})", attempt, config.connect_retries);

            match Self::open_link(config).await {
                Ok(link) => {
                    info!("Connected to DUT at {}", Self::target(config));
                    return Ok(Self::new(link, config));
                }
                Err(e) => {
                    warn!("Failed to connect to {}: {}", Self::target(config), e);
                    last_error = e;
                }
            }

            if attempt < config.connect_retries {
                tokio::time::sleep(Duration::from_millis(config.retry_interval_ms)).await;
            }
        }

        Err(last_error)
    }

    fn target(config: &DutConfig) -> &str {
        match config.transport {
            TransportKind::Tcp => &config.address,
            TransportKind::Serial => &config.serial_port,
        }
    }

    async fn open_link(config: &DutConfig) -> Result<Box<dyn DutLink>> {
        match config.transport {
            TransportKind::Tcp => {
                let stream = TcpStream::connect(&config.address)
                    .await
                    .map_err(|e| OracleError::Transport(format!("Failed to open {}: {}", config.address, e)))?;
                stream.set_nodelay(true)?;
                Ok(Box::new(StreamLink::new(stream)))
            }
            TransportKind::Serial => {
                let port = tokio_serial::new(&config.serial_port, config.baud_rate)
                    .data_bits(tokio_serial::DataBits::Eight)
                    .parity(tokio_serial::Parity::None)
                    .stop_bits(tokio_serial::StopBits::One)
                    .flow_control(tokio_serial::FlowControl::None)
                    .open_native_async()
                    .map_err(|e| OracleError::Transport(format!("Failed to open {}: {}", config.serial_port, e)))?;
                Ok(Box::new(StreamLink::new(port)))
            }
        }
    }

    /// Handle every command is addressed to
    #[must_use]
    pub fn handle(&self) -> u8 {
        self.handle
    }

    /// Send a command and collect its response
    ///
    /// The response is the first JSON object line the DUT prints; debug
    /// lines before it are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if the frame cannot be encoded or written, or if no
    /// response arrives within the line and time budget
    pub async fn send(&mut self, command: &Command) -> Result<StageRecords> {
        self.exchange(command, |_| true).await
    }

    /// Inject a raw wireless report and collect every pipeline stage
    ///
    /// Keeps reading until wireless, generic, mapped and wired records have
    /// all been seen, whether they arrive on one line or several.
    ///
    /// # Errors
    ///
    /// Same as [`DutClient::send`]
    pub async fn inject(&mut self, report: &[u8]) -> Result<StageRecords> {
        let command = Command::HidReport(report.to_vec());
        self.exchange(&command, StageRecords::is_complete).await
    }

    /// Inject calibration replies until the DUT reports the calibration
    ///
    /// Every reply but the last is answered with a single line. The last one
    /// waits for the `calib_data` record.
    ///
    /// # Errors
    ///
    /// Same as [`DutClient::send`]
    pub async fn calibrate(&mut self, reports: &[Vec<u8>]) -> Result<StageRecords> {
        let Some((last, leading)) = reports.split_last() else {
            return Ok(StageRecords::default());
        };

        for report in leading {
            let records = self.send(&Command::HidReport(report.clone())).await?;
            if records.calibration.is_some() {
                return Ok(records);
            }
        }

        let command = Command::HidReport(last.clone());
        self.exchange(&command, |records| records.calibration.is_some()).await
    }

    async fn exchange<F>(&mut self, command: &Command, done: F) -> Result<StageRecords>
    where
        F: Fn(&StageRecords) -> bool,
    {
        let frame = command.encode(self.handle)?;
        self.link
            .write_all(&frame)
            .await
            .map_err(|e| OracleError::Transport(format!("Failed to write command: {}", e)))?;
        debug!("Sent opcode 0x{:02X} ({} bytes)", command.opcode(), frame.len());

        let waiting_for = format!("response to opcode 0x{:02X}", command.opcode());
        let mut records = StageRecords::default();

        for _ in 0..self.max_lines {
            let line = match tokio::time::timeout(self.response_timeout, self.link.read_line()).await {
                Err(_) => {
                    return Err(OracleError::Timeout {
                        waiting_for,
                        after_ms: self.response_timeout.as_millis() as u64,
                    });
                }
                Ok(Err(e)) => return Err(OracleError::Transport(format!("Failed to read response: {}", e))),
                Ok(Ok(None)) => return Err(OracleError::Transport("DUT closed the link".to_string())),
                Ok(Ok(Some(line))) => line,
            };

            let Some(decoded) = decode_line(&line)? else {
                debug!("DUT: {}", line);
                continue;
            };

            for record in decoded {
                debug!("Record: {:?}", record);
                records.push(record);
            }

            if done(&records) {
                return Ok(records);
            }
        }

        Err(OracleError::Protocol(format!(
            "no complete {} within {} lines",
            waiting_for, self.max_lines
        )))
    }
}

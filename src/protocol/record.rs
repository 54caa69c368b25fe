//! # DUT Records
//!
//! The DUT reports each pipeline stage as a JSON object. Two framings show up
//! on the line-oriented response stream:
//!
//! - one record per line, tagged by a `log_type` field:
//!   `{"log_type": "wired_output", "axes": [...], "btns": 4}`
//! - one command response per line, keyed by stage name:
//!   `{"wireless_input": {...}, "generic_input": {...}}`
//!
//! Both decode to the same [`Record`] values. Lines that are not JSON objects
//! (firmware `#` debug output, blank lines) are skipped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{OracleError, Result};
use crate::mapping::live_calib::StickCalibration;

/// Button field of a stage record
///
/// Most stages print a single word; the generic stage and some wired systems
/// print an array of words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonField {
    Word(u32),
    Words(Vec<u32>),
}

impl ButtonField {
    /// First (or only) word
    #[must_use]
    pub fn primary(&self) -> u32 {
        match self {
            Self::Word(word) => *word,
            Self::Words(words) => words.first().copied().unwrap_or(0),
        }
    }
}

impl Default for ButtonField {
    fn default() -> Self {
        Self::Word(0)
    }
}

/// Payload of the four pipeline stage records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<i64>,
    pub axes: Vec<i32>,
    pub btns: ButtonField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hat: Option<u8>,
}

impl StageRecord {
    /// Axis value by canonical index
    #[must_use]
    pub fn axis(&self, index: usize) -> Option<i32> {
        self.axes.get(index).copied()
    }
}

/// Device identity, sent after a name or type change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device_id: i64,
    pub device_type: i64,
    pub device_subtype: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// Device connection acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConn {
    pub handle: i64,
    pub device_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<i64>,
}

/// One usage located by the HID descriptor parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HidUsage {
    pub usage_page: u32,
    pub usage: u32,
    pub bit_offset: u32,
    pub bit_size: u32,
}

/// Summary of one parsed HID report layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedHidReport {
    pub report_id: i64,
    pub report_type: i64,
    pub device_type: i64,
    pub device_subtype: i64,
    #[serde(default)]
    pub usages: Vec<HidUsage>,
}

/// One decoded DUT record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "log_type", rename_all = "snake_case")]
pub enum Record {
    WirelessInput(StageRecord),
    GenericInput(StageRecord),
    MappedInput(StageRecord),
    WiredOutput(StageRecord),
    DeviceConn(DeviceConn),
    DeviceDisconn(DeviceConn),
    DeviceName(DeviceInfo),
    TypeUpdate(DeviceInfo),
    CalibData(StickCalibration),
    ParsedHidReport(ParsedHidReport),
    #[serde(other)]
    Unknown,
}

/// Decode one line of DUT output
///
/// # Returns
///
/// * `Ok(Vec<Record>)` - Records on the line, empty for non-JSON lines
///
/// # Errors
///
/// Returns `OracleError::Protocol` if a record with a known tag has a
/// malformed body.
///
/// # Examples
///
/// ```
/// use retropad_oracle::protocol::record::{parse_line, Record};
///
/// let records = parse_line(r#"{"log_type": "wired_output", "axes": [128, 128], "btns": 1}"#).unwrap();
/// assert!(matches!(records[0], Record::WiredOutput(_)));
///
/// assert!(parse_line("# dev: 0 type: 4:0 Wireless Controller").unwrap().is_empty());
/// ```
pub fn parse_line(line: &str) -> Result<Vec<Record>> {
    Ok(decode_line(line)?.unwrap_or_default())
}

/// Decode one line, telling JSON objects apart from noise
///
/// Returns `Ok(None)` for lines that are not a JSON object, and
/// `Ok(Some(vec![]))` for an empty object (a command with nothing to report).
///
/// # Errors
///
/// Same as [`parse_line`].
pub fn decode_line(line: &str) -> Result<Option<Vec<Record>>> {
    let trimmed = line.trim();
    if !trimmed.starts_with('{') {
        return Ok(None);
    }

    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed) else {
        debug!("Skipping non-JSON line: {}", trimmed);
        return Ok(None);
    };

    if object.contains_key("log_type") {
        return Ok(Some(vec![decode_record(Value::Object(object))?]));
    }

    object
        .into_iter()
        .map(|(stage, body)| decode_keyed(stage, body))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn decode_keyed(stage: String, body: Value) -> Result<Record> {
    let mut fields = match body {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    fields.insert("log_type".to_string(), Value::String(stage));
    decode_record(Value::Object(fields))
}

fn decode_record(value: Value) -> Result<Record> {
    let tag = value
        .get("log_type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    serde_json::from_value(value)
        .map_err(|e| OracleError::Protocol(format!("Malformed {} record: {}", tag, e)))
}

/// Stage records collected from one DUT response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageRecords {
    pub wireless: Option<StageRecord>,
    pub generic: Option<StageRecord>,
    pub mapped: Option<StageRecord>,
    pub wired: Option<StageRecord>,
    pub device: Option<DeviceInfo>,
    pub calibration: Option<StickCalibration>,
    /// Records that carry no stage data
    pub other: Vec<Record>,
}

impl StageRecords {
    /// Fold one record in; later records of the same stage replace earlier ones
    pub fn push(&mut self, record: Record) {
        match record {
            Record::WirelessInput(stage) => self.wireless = Some(stage),
            Record::GenericInput(stage) => self.generic = Some(stage),
            Record::MappedInput(stage) => self.mapped = Some(stage),
            Record::WiredOutput(stage) => self.wired = Some(stage),
            Record::DeviceName(info) | Record::TypeUpdate(info) => self.device = Some(info),
            Record::CalibData(calib) => self.calibration = Some(calib),
            other => self.other.push(other),
        }
    }

    /// True once every pipeline stage has been seen
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.wireless.is_some() && self.generic.is_some() && self.mapped.is_some() && self.wired.is_some()
    }

    /// True if nothing has been collected yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FromIterator<Record> for StageRecords {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut records = Self::default();
        for record in iter {
            records.push(record);
        }
        records
    }
}

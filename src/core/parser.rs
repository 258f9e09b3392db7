// K6LogView - core/parser.rs
//
// JSON Lines parsing and normalisation of k6 log output.
// Core layer: accepts text, never touches the filesystem directly.
//
// Each line goes through two independent decode attempts:
//   1. the outer envelope `{"time", "level", "msg"}` -- failure drops the line;
//   2. the `msg` string as JSON `{"msg", "VU", "ITER"}` -- failure falls back
//      to the raw `msg` text.

use crate::core::model::{InnerPayload, LogRecord, Payload};
use crate::util::constants;
use crate::util::error::ParseError;
use crate::util::logging::preview;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};

/// Configuration for parsing operations.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Diagnostics beyond this count are counted but not retained.
    pub max_parse_errors: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_parse_errors: constants::MAX_PARSE_ERRORS_PER_FILE,
        }
    }
}

/// Result of parsing one log file's text.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Normalised records in file line order.
    pub records: Vec<LogRecord>,
    /// Diagnostics encountered (capped at `max_parse_errors`).
    pub errors: Vec<ParseError>,
    /// Non-empty lines examined.
    pub lines_processed: u64,
    /// Lines excluded because the outer JSON could not be decoded.
    pub lines_dropped: u64,
    /// Records kept with an empty `time` because the timestamp was unusable.
    pub timestamp_fallbacks: u64,
}

impl ParseResult {
    fn record_error(&mut self, error: ParseError, config: &ParseConfig) {
        if self.errors.len() < config.max_parse_errors {
            self.errors.push(error);
        }
    }
}

/// Parse file text into normalised records, discarding undecodable lines.
///
/// Never fails: a file with no decodable lines yields an empty vector.
pub fn parse(content: &str) -> Vec<LogRecord> {
    parse_content(content, &ParseConfig::default()).records
}

/// Parse file text, also returning per-line diagnostics and counters.
///
/// Lines are split on `'\n'` only; a trailing `'\r'` is JSON whitespace and
/// decodes cleanly. A leading UTF-8 byte-order mark is ignored. Line numbers
/// in diagnostics are 1-based and count blank lines, so they match what an
/// editor shows.
pub fn parse_content(content: &str, config: &ParseConfig) -> ParseResult {
    let mut result = ParseResult::default();
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for (line_idx, line) in content.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = (line_idx as u64) + 1;
        result.lines_processed += 1;

        match normalise_line(line, line_number) {
            Ok((record, time_error)) => {
                if let Some(err) = time_error {
                    tracing::debug!(line = line_number, error = %err, "Timestamp fallback");
                    result.timestamp_fallbacks += 1;
                    result.record_error(err, config);
                }
                result.records.push(record);
            }
            Err(err) => {
                tracing::warn!(
                    line = line_number,
                    preview = preview(line),
                    error = %err,
                    "Invalid log line"
                );
                result.lines_dropped += 1;
                result.record_error(err, config);
            }
        }
    }

    tracing::debug!(
        lines = result.lines_processed,
        records = result.records.len(),
        dropped = result.lines_dropped,
        timestamp_fallbacks = result.timestamp_fallbacks,
        "Parsing complete"
    );

    result
}

/// Normalise a single non-empty line.
///
/// `Err` means the line is excluded. `Ok` may carry a timestamp diagnostic
/// for a record that was kept with the fallback time.
pub fn normalise_line(
    line: &str,
    line_number: u64,
) -> Result<(LogRecord, Option<ParseError>), ParseError> {
    let outer = match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(ParseError::NotAnObject {
                line_number,
                kind: json_kind(&other),
            })
        }
        Err(source) => {
            return Err(ParseError::LineDecode {
                line_number,
                source,
            })
        }
    };

    let (time, time_error) = match normalise_time(outer.get("time"), line_number) {
        Ok(time) => (time, None),
        Err(err) => (constants::MISSING_TIME.to_string(), Some(err)),
    };
    let level = normalise_level(outer.get("level"));
    let inner = decode_payload(outer.get("msg")).into_inner();

    let record = LogRecord {
        time,
        level,
        message: inner.msg,
        vu: inner.vu,
        iter: inner.iter,
    };
    Ok((record, time_error))
}

/// Uppercase the level and rewrite every `WARNING` substring to `WARN`.
///
/// This is a substring replace: `"warningx"` becomes `"WARNX"`.
pub fn normalise_level(level: Option<&Value>) -> String {
    match level.and_then(scalar_text) {
        Some(raw) => raw.to_uppercase().replace("WARNING", "WARN"),
        None => String::new(),
    }
}

/// Second decode of the outer `msg` field.
pub fn decode_payload(msg: Option<&Value>) -> Payload {
    match msg {
        None | Some(Value::Null) => Payload::Fallback(None),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(decoded) => Payload::Decoded(extract_payload(&decoded)),
            Err(_) => Payload::Fallback(Some(raw.clone())),
        },
        // Already structured; nothing to decode.
        Some(Value::Object(map)) => Payload::Decoded(payload_from_map(map)),
        Some(other) => Payload::Fallback(Some(other.to_string())),
    }
}

/// A decoded non-object (`"123"`, `"true"`) carries no fields.
fn extract_payload(decoded: &Value) -> InnerPayload {
    match decoded {
        Value::Object(map) => payload_from_map(map),
        _ => InnerPayload::default(),
    }
}

fn payload_from_map(map: &Map<String, Value>) -> InnerPayload {
    InnerPayload {
        msg: map.get("msg").and_then(scalar_text),
        vu: map.get("VU").and_then(numeric_value),
        iter: map.get("ITER").and_then(numeric_value),
    }
}

/// Text form of a JSON value; `null` is treated as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// JSON numbers pass through; numeric strings (`"3"`) are coerced.
fn numeric_value(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => serde_json::from_str::<Number>(s.trim()).ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// ISO-8601 variants with a `+hhmm` offset that RFC 3339 parsing rejects.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Offset-less ISO-8601 variants; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Convert the `time` field to `YYYY-MM-DD HH:MM:SS` in UTC.
fn normalise_time(value: Option<&Value>, line_number: u64) -> Result<String, ParseError> {
    let value = match value {
        None | Some(Value::Null) => return Err(ParseError::MissingTimestamp { line_number }),
        Some(v) => v,
    };

    let parsed = match value {
        Value::String(raw) => parse_timestamp(raw),
        // Epoch milliseconds.
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };

    match parsed {
        Some(dt) => Ok(dt.format(constants::RECORD_TIME_FORMAT).to_string()),
        None => Err(ParseError::TimestampParse {
            line_number,
            raw_timestamp: scalar_text(value).unwrap_or_default(),
        }),
    }
}

/// Parse an ISO-8601 timestamp string, converting to UTC.
///
/// Tried in order:
///   1. RFC 3339 (`2024-01-15T10:30:00.123+02:00`, `...Z`).
///   2. `+hhmm` offsets without a colon.
///   3. No offset at all, taken as UTC.
///   4. A bare date, taken as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ndt.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|nd| nd.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

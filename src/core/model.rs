// K6LogView - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use serde_json::Number;
use std::path::PathBuf;

// =============================================================================
// Log Record (normalised output of parsing)
// =============================================================================

/// A single k6 log line after normalisation.
///
/// Records are created once by the parser and never mutated afterwards;
/// the filter engine and the UI only ever hold shared references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// UTC timestamp formatted as `YYYY-MM-DD HH:MM:SS`, or the empty
    /// string when the source line had no usable `time` field.
    pub time: String,

    /// Uppercased level with `WARNING` rewritten to `WARN`.
    /// Empty when the source line had no level.
    pub level: String,

    /// Human-readable message from the inner payload.
    pub message: Option<String>,

    /// k6 virtual user number.
    #[serde(rename = "VU")]
    pub vu: Option<Number>,

    /// Iteration index within the virtual user's loop.
    #[serde(rename = "ITER")]
    pub iter: Option<Number>,
}

impl LogRecord {
    /// Message text for display; absent messages render as empty.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// VU column text; absent values render as empty.
    pub fn vu_text(&self) -> String {
        self.vu.as_ref().map(Number::to_string).unwrap_or_default()
    }

    /// ITER column text; absent values render as empty.
    pub fn iter_text(&self) -> String {
        self.iter.as_ref().map(Number::to_string).unwrap_or_default()
    }
}

// =============================================================================
// Inner payload
// =============================================================================

/// Structured payload k6 encodes as a JSON string inside the outer `msg`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InnerPayload {
    pub msg: Option<String>,
    pub vu: Option<Number>,
    pub iter: Option<Number>,
}

/// Outcome of decoding the outer `msg` field a second time.
///
/// `Fallback` is an expected branch: most k6 `console.log` output is plain
/// text, not JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `msg` decoded as JSON.
    Decoded(InnerPayload),
    /// `msg` was not JSON; carries the raw text (absent if `msg` was absent).
    Fallback(Option<String>),
}

impl Payload {
    /// Collapse into the fields a `LogRecord` needs.
    pub fn into_inner(self) -> InnerPayload {
        match self {
            Payload::Decoded(inner) => inner,
            Payload::Fallback(msg) => InnerPayload {
                msg,
                ..Default::default()
            },
        }
    }
}

// =============================================================================
// Load Summary
// =============================================================================

/// Statistics for the most recently parsed file.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// File the records came from.
    pub path: PathBuf,

    /// Non-empty lines examined.
    pub lines_processed: u64,

    /// Records produced.
    pub records: usize,

    /// Lines excluded because they were not a JSON object.
    pub lines_dropped: u64,

    /// Records kept with an empty time.
    pub timestamp_fallbacks: u64,

    /// Rendered diagnostics, capped by the parse config.
    pub diagnostics: Vec<String>,

    /// Wall-clock parse duration.
    pub duration: std::time::Duration,
}

// =============================================================================
// Load Progress (for UI updates)
// =============================================================================

/// Messages sent from a file-reader thread to the UI thread.
///
/// Every message carries the generation of the request that produced it so
/// the receiver can discard results of superseded reads.
#[derive(Debug, Clone)]
pub enum LoadProgress {
    /// The file was read completely.
    Loaded {
        generation: u64,
        path: PathBuf,
        text: String,
    },

    /// The file could not be read.
    Failed {
        generation: u64,
        path: PathBuf,
        error: String,
    },
}

impl LoadProgress {
    /// Generation of the load request this message belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            LoadProgress::Loaded { generation, .. } | LoadProgress::Failed { generation, .. } => {
                *generation
            }
        }
    }
}

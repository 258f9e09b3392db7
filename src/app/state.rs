// K6LogView - app/state.rs
//
// Application state management. Holds the current record set, the filter
// state, and the visible subset. Owned by the eframe::App implementation.
//
// Every mutation of `records` or `filter_state` goes through a method here
// that finishes by recomputing `filtered_indices` from scratch.

use crate::core::filter::{self, FilterState};
use crate::core::model::{LoadSummary, LogRecord};
use crate::core::parser::{self, ParseConfig};
use crate::platform::config::AppConfig;
use crate::util::constants;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// File the current records came from. `None` = no file loaded; the
    /// filter controls and record table are hidden in that state.
    pub source_path: Option<PathBuf>,

    /// All normalised records of the current file, in line order.
    pub records: Vec<LogRecord>,

    /// Indices of records matching the current filter (into `records`).
    pub filtered_indices: Vec<usize>,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Parser limits from config.toml.
    pub parse_config: ParseConfig,

    /// Statistics from the most recent parse.
    pub load_summary: Option<LoadSummary>,

    /// File chosen by the user that the app should start reading.
    pub pending_load: Option<PathBuf>,

    /// A background read is in flight.
    pub loading: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings accumulated during the session.
    pub warnings: Vec<String>,

    /// Whether to show the load summary dialog.
    pub show_summary: bool,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    /// Body font size in points.
    pub font_size: f32,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state from validated configuration.
    pub fn new(config: &AppConfig, debug_mode: bool) -> Self {
        Self {
            source_path: None,
            records: Vec::new(),
            filtered_indices: Vec::new(),
            filter_state: FilterState::default(),
            parse_config: ParseConfig {
                max_parse_errors: config.max_parse_errors,
            },
            load_summary: None,
            pending_load: None,
            loading: false,
            status_message: "Ready. Open a k6 log file to begin.".to_string(),
            warnings: Vec::new(),
            show_summary: false,
            dark_mode: config.dark_mode,
            font_size: config.font_size,
            debug_mode,
        }
    }

    /// Whether a file is currently loaded.
    pub fn is_file_loaded(&self) -> bool {
        self.source_path.is_some()
    }

    /// Replace the record set with the parsed contents of `text`.
    ///
    /// Filters are reset to empty, so the full new set becomes visible.
    pub fn load_text(&mut self, path: &Path, text: &str) {
        let started = Instant::now();
        let result = parser::parse_content(text, &self.parse_config);

        let summary = LoadSummary {
            path: path.to_path_buf(),
            lines_processed: result.lines_processed,
            records: result.records.len(),
            lines_dropped: result.lines_dropped,
            timestamp_fallbacks: result.timestamp_fallbacks,
            diagnostics: result.errors.iter().map(ToString::to_string).collect(),
            duration: started.elapsed(),
        };

        self.status_message = if summary.lines_dropped > 0 {
            format!(
                "Loaded {} records from {} ({} invalid lines skipped).",
                summary.records,
                display_name(path),
                summary.lines_dropped
            )
        } else {
            format!(
                "Loaded {} records from {}.",
                summary.records,
                display_name(path)
            )
        };
        if summary.lines_dropped > 0 {
            self.push_warning(format!(
                "{}: {} line(s) were not valid JSON and were skipped.",
                display_name(path),
                summary.lines_dropped
            ));
        }

        tracing::info!(
            path = %path.display(),
            records = summary.records,
            dropped = summary.lines_dropped,
            "File parsed"
        );

        self.source_path = Some(path.to_path_buf());
        self.records = result.records;
        self.load_summary = Some(summary);
        self.loading = false;
        self.filter_state.clear();
        self.apply_filters();
    }

    /// Record a failed read. The current record set is left untouched.
    pub fn load_failed(&mut self, path: &Path, error: &str) {
        self.loading = false;
        self.status_message = format!("Could not open {}: {error}", display_name(path));
        self.push_warning(format!("Could not open '{}': {error}", path.display()));
    }

    /// The "no file" signal: drop all records and reset every filter.
    pub fn close(&mut self) {
        self.source_path = None;
        self.records.clear();
        self.filtered_indices.clear();
        self.filter_state.clear();
        self.load_summary = None;
        self.loading = false;
        self.show_summary = false;
        self.status_message = "Ready.".to_string();
    }

    pub fn set_level_filter(&mut self, value: impl Into<String>) {
        self.filter_state.level_filter = value.into();
        self.apply_filters();
    }

    pub fn set_msg_filter(&mut self, value: impl Into<String>) {
        self.filter_state.msg_filter = value.into();
        self.apply_filters();
    }

    pub fn set_vu_filter(&mut self, value: impl Into<String>) {
        self.filter_state.vu_filter = value.into();
        self.apply_filters();
    }

    pub fn set_iter_filter(&mut self, value: impl Into<String>) {
        self.filter_state.iter_filter = value.into();
        self.apply_filters();
    }

    /// Reset all four filter fields in one step.
    pub fn clear_filters(&mut self) {
        self.filter_state.clear();
        self.apply_filters();
    }

    /// Recompute filtered indices from current records and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(&self.records, &self.filter_state);
        tracing::trace!(
            visible = self.filtered_indices.len(),
            total = self.records.len(),
            "Filters applied"
        );
    }

    /// Records currently visible, in file order.
    pub fn visible_records(&self) -> Vec<&LogRecord> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.records.get(i))
            .collect()
    }

    /// "Showing X of Y Logs", present only while filters hide something.
    pub fn count_summary(&self) -> Option<String> {
        let shown = self.filtered_indices.len();
        let total = self.records.len();
        (shown != total).then(|| format!("Showing {shown} of {total} Logs"))
    }

    /// Add a warning, dropping it once the cap is reached.
    pub fn push_warning(&mut self, warning: String) {
        if self.warnings.len() < constants::MAX_WARNINGS {
            self.warnings.push(warning);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

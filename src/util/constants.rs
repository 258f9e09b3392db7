// K6LogView - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "K6 Log Viewer";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "K6LogView";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Parsing
// =============================================================================

/// Output format for normalised record timestamps.
///
/// Fixed-width and zero-padded so that string order equals chronological order.
pub const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value stored in `LogRecord::time` when the source timestamp is missing
/// or cannot be parsed.
pub const MISSING_TIME: &str = "";

/// Default cap on parse diagnostics retained per file.
pub const MAX_PARSE_ERRORS_PER_FILE: usize = 1_000;

/// Minimum user-configurable diagnostics cap.
pub const MIN_MAX_PARSE_ERRORS: usize = 1;

/// Hard upper bound on retained diagnostics.
pub const ABSOLUTE_MAX_PARSE_ERRORS: usize = 100_000;

/// Maximum number of non-fatal warnings kept by the application state.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// Filters
// =============================================================================

/// Level values offered by the level drop-down, in display order.
/// The empty string (no constraint) is rendered separately as "All Levels".
pub const LEVEL_CHOICES: &[&str] = &["ERROR", "WARN", "INFO", "DEBUG"];

/// Label of the "no level constraint" choice.
pub const ALL_LEVELS_LABEL: &str = "All Levels";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// File extensions offered by the open dialog. k6 writes `--log-output=file`
/// logs as plain text; `.json` / `.jsonl` / `.log` are common renames.
pub const LOG_FILE_EXTENSIONS: &[&str] = &["txt", "log", "json", "jsonl"];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in diagnostic output.
/// Prevents accidental exposure of sensitive data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_RECORDS: usize = 5_000_000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

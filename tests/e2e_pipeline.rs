// K6LogView - tests/e2e_pipeline.rs
//
// End-to-end tests for the load, parse and filter pipeline.
//
// These tests read a real k6 log fixture from disk, run it through the
// parser and the application state, and check what the table would show.
// The background loader is exercised against tempfile-backed files.

use k6logview::app::load::LoadManager;
use k6logview::app::state::AppState;
use k6logview::core::filter::{apply_filters, filter_records, FilterState};
use k6logview::core::model::{LoadProgress, LogRecord};
use k6logview::core::parser::{parse, parse_content, ParseConfig};
use k6logview::platform::config::AppConfig;
use k6logview::platform::fs::read_file_lossy;
use serde_json::Number;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample_text() -> String {
    fs::read_to_string(fixture("k6_sample.txt")).expect("fixture should be readable")
}

/// State with the sample fixture loaded.
fn loaded_state() -> AppState {
    let mut state = AppState::new(&AppConfig::default(), false);
    state.load_text(&fixture("k6_sample.txt"), &sample_text());
    state
}

fn visible_messages(state: &AppState) -> Vec<String> {
    state
        .visible_records()
        .iter()
        .map(|r| r.message_text().to_string())
        .collect()
}

fn wait_for(manager: &mut LoadManager) -> Vec<LoadProgress> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let messages = manager.poll_progress();
        if !messages.is_empty() || Instant::now() > deadline {
            return messages;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

// =============================================================================
// Parsing E2E
// =============================================================================

#[test]
fn e2e_fixture_parses_with_expected_counts() {
    let result = parse_content(&sample_text(), &ParseConfig::default());

    assert_eq!(result.lines_processed, 8, "blank line must not be counted");
    assert_eq!(result.records.len(), 7);
    assert_eq!(result.lines_dropped, 1);
    assert_eq!(result.timestamp_fallbacks, 1);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].line_number(), 6);
    assert!(result.errors[0].is_line_dropped());
    assert_eq!(result.errors[1].line_number(), 7);
    assert!(!result.errors[1].is_line_dropped());
}

#[test]
fn e2e_fixture_records_are_normalised() {
    let records = parse(&sample_text());

    let levels: Vec<_> = records.iter().map(|r| r.level.as_str()).collect();
    assert_eq!(
        levels,
        ["INFO", "WARN", "ERROR", "INFO", "DEBUG", "INFO", "ERROR"]
    );

    // Nested payload
    assert_eq!(records[0].time, "2024-03-01 12:00:00");
    assert_eq!(records[0].message.as_deref(), Some("Starting test"));
    assert_eq!(records[0].vu, Some(Number::from(1)));
    assert_eq!(records[0].iter, Some(Number::from(0)));

    // Offset converted to UTC
    assert_eq!(records[1].time, "2024-03-01 11:00:01");

    // Plain-text msg falls back to the raw string
    assert_eq!(
        records[3].message.as_deref(),
        Some("plain text message from setup()")
    );
    assert!(records[3].vu.is_none());

    // Missing time keeps the record with an empty timestamp
    assert_eq!(records[4].time, "");
    assert_eq!(records[4].message.as_deref(), Some("cache warm"));

    // Missing msg
    assert!(records[5].message.is_none());
    assert_eq!(records[5].message_text(), "");
}

#[test]
fn e2e_crlf_line_endings_parse() {
    let text = sample_text().replace('\n', "\r\n");
    let records = parse(&text);
    assert_eq!(records.len(), 7);
    assert_eq!(records[6].message.as_deref(), Some("Request failed with status 502"));
}

#[test]
fn e2e_bom_prefixed_file_keeps_first_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.txt");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(sample_text().as_bytes());
    fs::write(&path, bytes).unwrap();

    let text = read_file_lossy(&path).unwrap();
    let result = parse_content(&text, &ParseConfig::default());

    assert_eq!(result.records.len(), 7);
    assert_eq!(result.lines_dropped, 1);
    assert_eq!(result.records[0].message.as_deref(), Some("Starting test"));
}

#[test]
fn e2e_file_without_valid_lines_yields_nothing() {
    let records = parse("garbage\n[1,2,3]\n\n\"just a string\"\n");
    assert!(records.is_empty());
}

// =============================================================================
// Filtering E2E (through AppState)
// =============================================================================

#[test]
fn e2e_unfiltered_shows_everything_without_count() {
    let state = loaded_state();
    assert_eq!(state.filtered_indices.len(), 7);
    assert!(state.count_summary().is_none());
}

#[test]
fn e2e_level_filter_hides_records_without_message() {
    let mut state = loaded_state();
    state.set_level_filter("INFO");

    // The INFO line with no msg is excluded by the coupled text test.
    assert_eq!(
        visible_messages(&state),
        ["Starting test", "plain text message from setup()"]
    );
    assert_eq!(state.count_summary().as_deref(), Some("Showing 2 of 7 Logs"));
}

#[test]
fn e2e_level_and_message_combine() {
    let mut state = loaded_state();
    state.set_level_filter("ERROR");
    state.set_msg_filter("502");
    assert_eq!(visible_messages(&state), ["Request failed with status 502"]);
}

#[test]
fn e2e_numeric_filters_combine() {
    let mut state = loaded_state();
    state.set_vu_filter("2");
    assert_eq!(state.filtered_indices, vec![1, 4, 6]);

    state.set_iter_filter("1");
    assert_eq!(state.filtered_indices, vec![4, 6]);

    state.set_msg_filter("Request");
    assert_eq!(state.filtered_indices, vec![6]);
}

#[test]
fn e2e_non_numeric_vu_matches_nothing() {
    let mut state = loaded_state();
    state.set_vu_filter("abc");
    assert!(state.filtered_indices.is_empty());
    assert_eq!(state.count_summary().as_deref(), Some("Showing 0 of 7 Logs"));
}

#[test]
fn e2e_clear_restores_full_set() {
    let mut state = loaded_state();
    state.set_level_filter("WARN");
    state.set_vu_filter("2");
    assert_eq!(state.filtered_indices, vec![1]);

    state.clear_filters();
    assert!(state.filter_state.is_empty());
    assert_eq!(state.filtered_indices.len(), 7);
}

#[test]
fn e2e_filtering_is_idempotent_and_order_preserving() {
    let records = parse(&sample_text());
    let filter = FilterState {
        msg_filter: "e".to_string(),
        vu_filter: "2".to_string(),
        ..FilterState::default()
    };

    let first = apply_filters(&records, &filter);
    assert!(first.windows(2).all(|w| w[0] < w[1]));

    // Filtering the already-filtered output changes nothing.
    let once: Vec<LogRecord> = filter_records(&records, &filter)
        .into_iter()
        .cloned()
        .collect();
    let twice: Vec<LogRecord> = filter_records(&once, &filter)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(once.len(), first.len());
    assert_eq!(once, twice);
}

#[test]
fn e2e_new_file_resets_filters() {
    let mut state = loaded_state();
    state.set_level_filter("ERROR");
    assert_eq!(state.filtered_indices.len(), 2);

    state.load_text(
        &PathBuf::from("second.txt"),
        "{\"time\":\"2024-03-02T00:00:00Z\",\"level\":\"info\",\"msg\":\"only\"}\n",
    );
    assert!(state.filter_state.is_empty());
    assert_eq!(visible_messages(&state), ["only"]);
}

#[test]
fn e2e_close_clears_records_and_filters() {
    let mut state = loaded_state();
    state.set_msg_filter("Request");
    state.close();

    assert!(!state.is_file_loaded());
    assert!(state.records.is_empty());
    assert!(state.filtered_indices.is_empty());
    assert!(state.filter_state.is_empty());
}

// =============================================================================
// Background load E2E
// =============================================================================

#[test]
fn e2e_background_load_feeds_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.log");
    fs::write(&path, sample_text()).unwrap();

    let mut manager = LoadManager::new();
    let mut state = AppState::new(&AppConfig::default(), false);
    manager.start_load(path.clone());

    let messages = wait_for(&mut manager);
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        LoadProgress::Loaded { path: p, text, .. } => state.load_text(p, text),
        other => panic!("expected Loaded, got {other:?}"),
    }

    assert_eq!(state.source_path.as_deref(), Some(path.as_path()));
    assert_eq!(state.records.len(), 7);
    let summary = state.load_summary.as_ref().unwrap();
    assert_eq!(summary.lines_dropped, 1);
    assert_eq!(summary.diagnostics.len(), 2);
}

#[test]
fn e2e_missing_file_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let mut state = loaded_state();
    let mut manager = LoadManager::new();
    manager.start_load(missing.clone());

    let messages = wait_for(&mut manager);
    match &messages[0] {
        LoadProgress::Failed { path, error, .. } => state.load_failed(path, error),
        other => panic!("expected Failed, got {other:?}"),
    }

    assert_eq!(state.records.len(), 7);
    assert!(state.warnings.iter().any(|w| w.contains("nope.txt")));
}

// K6LogView - core/filter.rs
//
// Filter engine for normalised k6 log records.
// Core layer: pure logic, no I/O or UI dependencies.
//
// Level and message are a coupled pair: if either is set, BOTH substring
// tests run (an empty value matches vacuously), so a record with no message
// is hidden by a level-only filter. VU and ITER are independent numeric
// equality tests. All active tests are AND-combined.

use crate::core::model::LogRecord;
use serde_json::Number;

/// Current values of the four filter inputs. Empty = no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Level substring, normally one of ERROR / WARN / INFO / DEBUG.
    pub level_filter: String,

    /// Message substring (case-sensitive).
    pub msg_filter: String,

    /// VU number as typed by the user.
    pub vu_filter: String,

    /// ITER number as typed by the user.
    pub iter_filter: String,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.level_filter.is_empty()
            && self.msg_filter.is_empty()
            && self.vu_filter.is_empty()
            && self.iter_filter.is_empty()
    }

    /// Reset all four fields at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A parsed VU/ITER filter input.
///
/// Text that is not a number yields `Invalid`, which matches no record.
#[derive(Debug, Clone, Copy, PartialEq)]
enum NumericFilter {
    Inactive,
    Equals(f64),
    Invalid,
}

impl NumericFilter {
    fn parse(input: &str) -> Self {
        if input.is_empty() {
            return Self::Inactive;
        }
        match input.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Equals(v),
            _ => Self::Invalid,
        }
    }

    fn matches(self, value: Option<&Number>) -> bool {
        match self {
            Self::Inactive => true,
            Self::Invalid => false,
            Self::Equals(target) => value.and_then(Number::as_f64) == Some(target),
        }
    }
}

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Indices are ascending, so the result preserves input order. The same
/// inputs always give the same output and `records` is never modified.
pub fn apply_filters(records: &[LogRecord], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    let text_active = !filter.level_filter.is_empty() || !filter.msg_filter.is_empty();
    let vu = NumericFilter::parse(&filter.vu_filter);
    let iter = NumericFilter::parse(&filter.iter_filter);

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            (!text_active || matches_text(record, filter))
                && vu.matches(record.vu.as_ref())
                && iter.matches(record.iter.as_ref())
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Filter records, returning the matching ones in input order.
pub fn filter_records<'a>(records: &'a [LogRecord], filter: &FilterState) -> Vec<&'a LogRecord> {
    apply_filters(records, filter)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}

/// Coupled level + message test. Absent messages never match.
fn matches_text(record: &LogRecord, filter: &FilterState) -> bool {
    record.level.contains(filter.level_filter.as_str())
        && record
            .message
            .as_deref()
            .is_some_and(|m| m.contains(filter.msg_filter.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(level: &str, message: Option<&str>, vu: Option<i64>, iter: Option<i64>) -> LogRecord {
        LogRecord {
            time: "2024-01-15 10:00:00".to_string(),
            level: level.to_string(),
            message: message.map(str::to_string),
            vu: vu.map(Number::from),
            iter: iter.map(Number::from),
        }
    }

    fn sample() -> Vec<LogRecord> {
        vec![
            make_record("ERROR", Some("request failed"), Some(1), Some(0)),
            make_record("WARN", Some("slow response"), Some(2), Some(1)),
            make_record("INFO", Some("request ok"), Some(3), Some(1)),
            make_record("INFO", None, Some(2), Some(2)),
        ]
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let records = sample();
        let result = apply_filters(&records, &FilterState::default());
        assert_eq!(result, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_level_filter_matches_canonicalised_warn() {
        let records = vec![
            make_record("ERROR", Some("a"), None, None),
            make_record("WARN", Some("b"), None, None),
        ];
        let filter = FilterState {
            level_filter: "WARN".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![1]);
    }

    #[test]
    fn test_level_filter_is_substring_match() {
        let records = vec![make_record("WARNX", Some("a"), None, None)];
        let filter = FilterState {
            level_filter: "WARN".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![0]);
    }

    #[test]
    fn test_level_only_filter_hides_records_without_message() {
        let records = sample();
        let filter = FilterState {
            level_filter: "INFO".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![2]);
    }

    #[test]
    fn test_message_filter_is_case_sensitive_substring() {
        let records = sample();
        let filter = FilterState {
            msg_filter: "request".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![0, 2]);

        let filter = FilterState {
            msg_filter: "REQUEST".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&records, &filter).is_empty());
    }

    #[test]
    fn test_vu_filter_exact_numeric_match() {
        let records = vec![
            make_record("INFO", Some("a"), Some(1), None),
            make_record("INFO", Some("b"), Some(2), None),
            make_record("INFO", Some("c"), Some(3), None),
        ];
        let filter = FilterState {
            vu_filter: "2".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![1]);
    }

    #[test]
    fn test_vu_filter_coerces_text() {
        let records = sample();
        for input in ["02", "2.0", " 2 "] {
            let filter = FilterState {
                vu_filter: input.to_string(),
                ..Default::default()
            };
            assert_eq!(apply_filters(&records, &filter), vec![1, 3], "input {input:?}");
        }
    }

    #[test]
    fn test_vu_filter_applies_without_text_filters() {
        // VU alone must not be gated on the level/message pair, and absent
        // messages are irrelevant when that pair is inactive.
        let records = sample();
        let filter = FilterState {
            vu_filter: "2".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![1, 3]);
    }

    #[test]
    fn test_non_numeric_vu_filter_matches_nothing() {
        let records = sample();
        let filter = FilterState {
            vu_filter: "abc".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&records, &filter).is_empty());
    }

    #[test]
    fn test_absent_vu_never_matches() {
        let records = vec![make_record("INFO", Some("a"), None, None)];
        let filter = FilterState {
            vu_filter: "0".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&records, &filter).is_empty());
    }

    #[test]
    fn test_combined_filters() {
        let records = sample();
        let filter = FilterState {
            level_filter: "INFO".to_string(),
            msg_filter: "request".to_string(),
            vu_filter: "3".to_string(),
            iter_filter: "1".to_string(),
        };
        assert_eq!(apply_filters(&records, &filter), vec![2]);
    }

    #[test]
    fn test_iter_filter() {
        let records = sample();
        let filter = FilterState {
            iter_filter: "1".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![1, 2]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let filter = FilterState {
            msg_filter: "re".to_string(),
            vu_filter: "2".to_string(),
            ..Default::default()
        };
        let once: Vec<LogRecord> = filter_records(&records, &filter)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<LogRecord> = filter_records(&once, &filter)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut filter = FilterState {
            level_filter: "ERROR".to_string(),
            msg_filter: "x".to_string(),
            vu_filter: "1".to_string(),
            iter_filter: "2".to_string(),
        };
        filter.clear();
        assert!(filter.is_empty());
    }
}

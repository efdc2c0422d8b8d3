//! Column-oriented reshaping of historical liquidity log records.
//!
//! The upstream log endpoint returns row-oriented records: one flat object
//! per snapshot with a `timestamp` plus an arbitrary set of per-country
//! values. The history view wants columns, one time series per country.
//!
//! Records are heterogeneous: a country may appear in some snapshots and not
//! others. Naively appending values per record would leave shorter columns
//! silently misaligned against the timestamp axis, so [`transpose`] works in
//! two passes: collect every field name first, then emit exactly one value
//! (or an explicit missing marker) per field per timestamp.

use crate::fmt::thousands;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// One raw log record from the upstream endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    /// Remaining fields, preserved in wire order.
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

/// Column-oriented log history.
///
/// Invariant: every series holds exactly `timestamps.len()` entries; a `None`
/// marks a timestamp at which the field was absent or non-numeric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    pub timestamps: Vec<String>,
    /// Field name (first-seen order) to its aligned value column.
    pub series: IndexMap<String, Vec<Option<f64>>>,
}

impl LogTable {
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Reshape row-oriented records into aligned per-field columns.
pub fn transpose(records: &[LogRecord]) -> LogTable {
    let mut table = LogTable::default();

    for record in records {
        for name in record.fields.keys() {
            if !table.series.contains_key(name) {
                table.series.insert(name.clone(), Vec::new());
            }
        }
    }

    for record in records {
        table.timestamps.push(record.timestamp.clone());
        for (name, column) in table.series.iter_mut() {
            column.push(record.fields.get(name).and_then(numeric_value));
        }
    }

    table
}

/// Canonical "missing" handling for log values.
///
/// Absent fields, JSON nulls, and non-numeric values all collapse to `None`;
/// numeric strings are accepted the same way the table endpoints format them.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Render one cell of the history table: 2dp thousands-grouped, or "N/A".
pub fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => thousands(v, 2),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(raw: Value) -> Vec<LogRecord> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_transpose_homogeneous_records() {
        let table = transpose(&records(json!([
            {"timestamp": "t1", "Argentina": 1.0},
            {"timestamp": "t2", "Argentina": 2.0}
        ])));

        assert_eq!(table.timestamps, vec!["t1", "t2"]);
        assert_eq!(
            table.series.get("Argentina"),
            Some(&vec![Some(1.0), Some(2.0)])
        );
    }

    #[test]
    fn test_transpose_heterogeneous_records_stay_aligned() {
        let table = transpose(&records(json!([
            {"timestamp": "t1", "Argentina": 1.0},
            {"timestamp": "t2", "Kenya": 2.0}
        ])));

        // Each series must span every timestamp, absent slots marked.
        assert_eq!(table.timestamps.len(), 2);
        assert_eq!(table.series.get("Argentina"), Some(&vec![Some(1.0), None]));
        assert_eq!(table.series.get("Kenya"), Some(&vec![None, Some(2.0)]));
    }

    #[test]
    fn test_field_order_is_first_seen() {
        let table = transpose(&records(json!([
            {"timestamp": "t1", "Vietnam": 1, "Argentina": 2},
            {"timestamp": "t2", "Kenya": 3}
        ])));

        let names: Vec<_> = table.series.keys().cloned().collect();
        assert_eq!(names, vec!["Vietnam", "Argentina", "Kenya"]);
    }

    #[test]
    fn test_null_and_non_numeric_collapse_to_missing() {
        let table = transpose(&records(json!([
            {"timestamp": "t1", "Kenya": null, "Argentina": "12.5", "Vietnam": "offline"}
        ])));

        assert_eq!(table.series.get("Kenya"), Some(&vec![None]));
        assert_eq!(table.series.get("Argentina"), Some(&vec![Some(12.5)]));
        assert_eq!(table.series.get("Vietnam"), Some(&vec![None]));
    }

    #[test]
    fn test_empty_input() {
        let table = transpose(&[]);
        assert!(table.is_empty());
        assert!(table.series.is_empty());
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(Some(1234567.891)), "1,234,567.89");
        assert_eq!(format_cell(None), "N/A");
    }
}

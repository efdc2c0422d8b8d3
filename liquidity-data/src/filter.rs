//! Free-text country filter over the dashboard rows.

use crate::types::DashboardRow;

/// Rows whose country contains `term` case-insensitively, original order
/// preserved. An empty term matches everything.
///
/// Recomputed on every render; with one row per country the input is small
/// enough that memoization would be noise.
pub fn filter_rows<'a>(rows: &'a [DashboardRow], term: &str) -> Vec<&'a DashboardRow> {
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| row.country.to_lowercase().contains(&needle))
        .collect()
}

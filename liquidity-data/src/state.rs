//! Per-view dashboard state for one exchange.
//!
//! Owns everything a view mutates: the row list with its per-country method
//! selections, the metrics snapshot, the transposed log history, and the
//! liquidity lookup cache. All mutation happens on the task that owns the
//! state; network results are handed in via the `apply_*` methods.

use crate::cache::LiquidityCache;
use crate::exchange::Exchange;
use crate::filter::filter_rows;
use crate::logs::{LogRecord, LogTable, transpose};
use crate::selection::toggle_method;
use crate::types::{DashboardRow, LiquiditySlice, MetricsSnapshot};
use tracing::debug;

/// An outgoing liquidity fetch produced by a selection toggle.
///
/// The response must echo `seq` back into
/// [`DashboardState::apply_liquidity`]; stale sequences are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityRequest {
    pub country: String,
    pub payment_methods: Vec<String>,
    pub seq: u64,
}

/// Liquidity/VWAP values to display for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowDisplay {
    pub liquidity: f64,
    pub vwap: f64,
    /// True when the values come from an on-demand slice rather than the
    /// row's aggregate fallback.
    pub specific: bool,
}

/// Mutable state behind one exchange's dashboard view.
#[derive(Debug)]
pub struct DashboardState {
    pub exchange: Exchange,
    pub rows: Vec<DashboardRow>,
    pub metrics: Option<MetricsSnapshot>,
    pub logs: Option<LogTable>,
    cache: LiquidityCache,
}

impl DashboardState {
    pub fn new(exchange: Exchange) -> Self {
        Self {
            exchange,
            rows: Vec::new(),
            metrics: None,
            logs: None,
            cache: LiquidityCache::new(),
        }
    }

    /// Tear the view down and re-activate it for `exchange`.
    ///
    /// Rows, metrics, history, and cache are all session state of a single
    /// activation and never survive a switch.
    pub fn activate(&mut self, exchange: Exchange) {
        self.exchange = exchange;
        self.rows.clear();
        self.metrics = None;
        self.logs = None;
        self.cache.clear();
    }

    /// Ingest the base row list, activating every payment method per row.
    pub fn apply_dashboard(&mut self, mut rows: Vec<DashboardRow>) {
        for row in &mut rows {
            row.init_selection();
        }
        debug!(exchange = %self.exchange, rows = rows.len(), "dashboard rows applied");
        self.rows = rows;
    }

    pub fn apply_metrics(&mut self, snapshot: MetricsSnapshot) {
        self.metrics = Some(snapshot);
    }

    /// Ingest raw log records, reshaped into aligned columns.
    pub fn apply_logs(&mut self, records: Vec<LogRecord>) {
        self.logs = Some(transpose(&records));
    }

    /// Toggle `method` on the row for `country`.
    ///
    /// Returns the liquidity fetch to issue for the new active set, or `None`
    /// when no such row exists or the method is not advertised there. Exactly
    /// one request is produced per toggle.
    pub fn toggle_method(&mut self, country: &str, method: &str) -> Option<LiquidityRequest> {
        let row = self.rows.iter_mut().find(|row| row.country == country)?;

        let next = toggle_method(&row.available_methods(), &row.active_methods, method);
        if next == row.active_methods {
            return None;
        }
        row.active_methods = next;

        let seq = self.cache.issue(country);
        Some(LiquidityRequest {
            country: country.to_string(),
            payment_methods: row.active_methods.clone(),
            seq,
        })
    }

    /// Store a liquidity response unless superseded. Returns whether applied.
    pub fn apply_liquidity(
        &mut self,
        country: &str,
        payment_methods: &[String],
        seq: u64,
        slice: LiquiditySlice,
    ) -> bool {
        self.cache.apply(country, payment_methods, seq, slice)
    }

    /// Values the table should display for `row`: the cached slice for its
    /// current active set, or the aggregate fallback.
    pub fn row_display(&self, row: &DashboardRow) -> RowDisplay {
        match self.cache.lookup(&row.country, &row.active_methods) {
            Some(slice) => RowDisplay {
                liquidity: slice.specific_liquidity,
                vwap: slice.specific_vwap,
                specific: true,
            },
            None => RowDisplay {
                liquidity: row.total_liquidity,
                vwap: row.volume_weighted_price,
                specific: false,
            },
        }
    }

    /// Rows matching the free-text country filter, order preserved.
    pub fn filtered(&self, term: &str) -> Vec<&DashboardRow> {
        filter_rows(&self.rows, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<DashboardRow> {
        serde_json::from_value(json!([
            {
                "date_time": "2024-11-02 14:30",
                "country": "Argentina",
                "fiat_currency": "ARS",
                "total_liquidity": 125000.0,
                "volume_weighted_price": 1023.4,
                "exchange_rate": 998.2,
                "spread": "2.52%",
                "available_payment_methods": [
                    {"method": "Bank Transfer"},
                    {"method": "MercadoPago"},
                    {"method": "Wise"}
                ]
            },
            {
                "date_time": "2024-11-02 14:30",
                "country": "Kenya",
                "fiat_currency": "KES",
                "total_liquidity": 52000.0,
                "volume_weighted_price": 129.5,
                "exchange_rate": 128.9,
                "spread": "1.10%",
                "available_payment_methods": [{"method": "M-Pesa"}]
            }
        ]))
        .unwrap()
    }

    fn slice(liquidity: f64, vwap: f64) -> LiquiditySlice {
        LiquiditySlice {
            specific_liquidity: liquidity,
            specific_vwap: vwap,
        }
    }

    #[test]
    fn test_apply_dashboard_activates_full_sets() {
        let mut state = DashboardState::new(Exchange::Okx);
        state.apply_dashboard(rows());

        for row in &state.rows {
            assert!(row.all_selected());
            assert_eq!(row.active_methods, row.available_methods());
        }
    }

    #[test]
    fn test_toggle_collapses_and_issues_request() {
        let mut state = DashboardState::new(Exchange::Okx);
        state.apply_dashboard(rows());

        let request = state.toggle_method("Argentina", "Wise").unwrap();
        assert_eq!(request.country, "Argentina");
        assert_eq!(request.payment_methods, vec!["Wise".to_string()]);

        let row = &state.rows[0];
        assert_eq!(row.active_methods, vec!["Wise".to_string()]);
        // No slice cached yet, so the display falls back to aggregates.
        let display = state.row_display(row);
        assert!(!display.specific);
        assert_eq!(display.liquidity, 125000.0);
        assert_eq!(display.vwap, 1023.4);
    }

    #[test]
    fn test_applied_response_switches_display_to_specific() {
        let mut state = DashboardState::new(Exchange::Okx);
        state.apply_dashboard(rows());

        let request = state.toggle_method("Argentina", "Wise").unwrap();
        assert!(state.apply_liquidity(
            &request.country,
            &request.payment_methods,
            request.seq,
            slice(40000.0, 1019.0)
        ));

        let display = state.row_display(&state.rows[0]);
        assert!(display.specific);
        assert_eq!(display.liquidity, 40000.0);
        assert_eq!(display.vwap, 1019.0);
    }

    #[test]
    fn test_stale_response_never_overwrites_newer_selection() {
        let mut state = DashboardState::new(Exchange::Okx);
        state.apply_dashboard(rows());

        let first = state.toggle_method("Argentina", "Wise").unwrap();
        let second = state.toggle_method("Argentina", "MercadoPago").unwrap();

        // The older in-flight response lands after the newer toggle.
        assert!(!state.apply_liquidity(
            &first.country,
            &first.payment_methods,
            first.seq,
            slice(1.0, 1.0)
        ));
        assert!(state.apply_liquidity(
            &second.country,
            &second.payment_methods,
            second.seq,
            slice(2.0, 2.0)
        ));

        let display = state.row_display(&state.rows[0]);
        assert!(display.specific);
        assert_eq!(display.liquidity, 2.0);
    }

    #[test]
    fn test_toggle_unknown_country_or_method_is_noop() {
        let mut state = DashboardState::new(Exchange::Okx);
        state.apply_dashboard(rows());

        assert!(state.toggle_method("Atlantis", "Wise").is_none());
        assert!(state.toggle_method("Kenya", "Wise").is_none());
        assert!(state.rows[1].all_selected());
    }

    #[test]
    fn test_metrics_absent_until_applied() {
        let mut state = DashboardState::new(Exchange::Binance);
        // A failed fetch applies nothing; the panel keeps showing "Loading…".
        assert!(state.metrics.is_none());

        state.apply_metrics(MetricsSnapshot {
            total_liquidity: 9_000_000.0,
            total_countries: 42,
            average_spread: 1.37,
            unique_payment_methods_count: 125,
        });
        assert_eq!(state.metrics.as_ref().unwrap().total_countries, 42);
    }

    #[test]
    fn test_activate_discards_previous_session() {
        let mut state = DashboardState::new(Exchange::Okx);
        state.apply_dashboard(rows());
        let request = state.toggle_method("Argentina", "Wise").unwrap();
        assert!(state.apply_liquidity(
            &request.country,
            &request.payment_methods,
            request.seq,
            slice(5.0, 5.0)
        ));

        state.activate(Exchange::Bybit);
        assert_eq!(state.exchange, Exchange::Bybit);
        assert!(state.rows.is_empty());
        assert!(state.metrics.is_none());
        assert!(state.logs.is_none());

        // The old session's response cannot apply into the new one.
        assert!(!state.apply_liquidity(
            &request.country,
            &request.payment_methods,
            request.seq,
            slice(5.0, 5.0)
        ));
    }

    #[test]
    fn test_apply_logs_transposes() {
        let mut state = DashboardState::new(Exchange::Okx);
        let records: Vec<LogRecord> = serde_json::from_value(json!([
            {"timestamp": "2024-11-01 00:00", "Argentina": 100.0},
            {"timestamp": "2024-11-02 00:00", "Kenya": 50.0}
        ]))
        .unwrap();

        state.apply_logs(records);
        let table = state.logs.as_ref().unwrap();
        assert_eq!(table.timestamps.len(), 2);
        assert_eq!(table.series.len(), 2);
    }
}

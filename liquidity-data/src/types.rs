//! Wire types for the dashboard, metrics, and liquidity endpoints.
//!
//! The upstream serialises numbers inconsistently: aggregate fields arrive as
//! JSON numbers while on-demand liquidity values arrive as formatted strings
//! (e.g. `"1234.56"`). Numeric fields therefore decode through
//! [`de_flexible_f64`], which accepts either form.

use serde::{Deserialize, Deserializer, Serialize};

/// One payment method advertised for a country.
///
/// Per-method liquidity/VWAP breakdowns are present on some rows and absent
/// on others, so they stay optional raw strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PaymentMethod {
    pub method: String,
    #[serde(default)]
    pub liquidity: Option<String>,
    #[serde(default)]
    pub vwap: Option<String>,
}

/// One country row of the dashboard table.
///
/// `active_methods` never appears on the wire; it is initialised to the full
/// available set when the row enters [`DashboardState`](crate::state::DashboardState)
/// and mutated only by the selection toggle. Invariant: `active_methods` is a
/// subset of the advertised method names.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardRow {
    pub date_time: String,
    pub country: String,
    pub fiat_currency: String,
    #[serde(deserialize_with = "de_flexible_f64")]
    pub total_liquidity: f64,
    #[serde(deserialize_with = "de_flexible_f64")]
    pub volume_weighted_price: f64,
    #[serde(deserialize_with = "de_flexible_f64")]
    pub exchange_rate: f64,
    /// Upstream formats the spread itself (e.g. "1.25%"), so it stays a string.
    pub spread: String,
    pub available_payment_methods: Vec<PaymentMethod>,
    #[serde(skip)]
    pub active_methods: Vec<String>,
}

impl DashboardRow {
    /// Names of all advertised payment methods, in wire order.
    pub fn available_methods(&self) -> Vec<String> {
        self.available_payment_methods
            .iter()
            .map(|payment| payment.method.clone())
            .collect()
    }

    /// Reset the selection to the default "everything active" state.
    pub fn init_selection(&mut self) {
        self.active_methods = self.available_methods();
    }

    /// True when the active set still equals the full available set.
    pub fn all_selected(&self) -> bool {
        self.active_methods.len() == self.available_payment_methods.len()
    }

    pub fn is_active(&self, method: &str) -> bool {
        self.active_methods.iter().any(|m| m == method)
    }
}

/// Top-line metrics fetched once per view activation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(deserialize_with = "de_flexible_f64")]
    pub total_liquidity: f64,
    pub total_countries: u64,
    #[serde(deserialize_with = "de_flexible_f64")]
    pub average_spread: f64,
    pub unique_payment_methods_count: u64,
}

/// On-demand liquidity/VWAP pair for one (country, method-set) combination.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LiquiditySlice {
    #[serde(deserialize_with = "de_flexible_f64")]
    pub specific_liquidity: f64,
    #[serde(deserialize_with = "de_flexible_f64")]
    pub specific_vwap: f64,
}

/// Request body for the on-demand liquidity endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LiquidityQuery<'a> {
    pub country: &'a str,
    pub payment_methods: &'a [String],
}

/// Deserialize a JSON number or a numeric string into `f64`.
pub(crate) fn de_flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric value: {raw:?}"))),
    }
}

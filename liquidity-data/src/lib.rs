//! Liquidity Data - client-side core of the P2P liquidity dashboard
//!
//! The upstream system exposes per-country P2P liquidity for OKX, Binance,
//! and Bybit through four HTTP endpoints. This crate owns everything the
//! dashboard computes on top of those payloads:
//! - Wire types and a tolerant numeric decoder for the inconsistent upstream
//! - The per-country payment-method selection reducer
//! - The liquidity lookup cache (normalised keys, bounded, sequence-gated)
//! - The free-text country filter
//! - The log transposer turning row-oriented snapshots into aligned columns
//! - [`DashboardState`], the per-view orchestration of all of the above

pub mod cache;
pub mod client;
pub mod error;
pub mod exchange;
pub mod filter;
pub mod fmt;
pub mod logs;
pub mod selection;
pub mod state;
pub mod types;

// Re-export commonly used types for convenience
pub use cache::LiquidityCache;
pub use client::{ApiClient, ApiConfig};
pub use error::DataError;
pub use exchange::Exchange;
pub use filter::filter_rows;
pub use logs::{LogRecord, LogTable, transpose};
pub use selection::toggle_method;
pub use state::{DashboardState, LiquidityRequest, RowDisplay};
pub use types::{DashboardRow, LiquiditySlice, MetricsSnapshot, PaymentMethod};

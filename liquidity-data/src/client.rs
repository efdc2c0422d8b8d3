//! HTTP client for the dashboard and liquidity calculation APIs.
//!
//! The upstream is an external collaborator with a stable schema; requests
//! carry no timeout, retry, or backoff. A failed call surfaces as one
//! [`DataError`] and the caller leaves its prior view state unchanged.

use crate::error::DataError;
use crate::exchange::Exchange;
use crate::logs::LogRecord;
use crate::types::{DashboardRow, LiquidityQuery, LiquiditySlice, MetricsSnapshot};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

/// Default API base when `LIQUIDITY_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "LIQUIDITY_API_URL";

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, DataError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Read the base URL from `LIQUIDITY_API_URL`, falling back to the
    /// default on absence or an unparseable value.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(raw) => match Self::new(&raw) {
                Ok(config) => config,
                Err(error) => {
                    warn!(%error, raw, "invalid {BASE_URL_ENV}, using default");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
        }
    }
}

/// Client for the four upstream endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint_url(&self, path: &str, exchange: Exchange) -> Url {
        let mut url = self.config.base_url.clone();
        url.set_path(path);
        url.query_pairs_mut()
            .clear()
            .append_pair("exchange", exchange.as_str());
        url
    }

    async fn decode<T>(
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<T, DataError>
    where
        T: DeserializeOwned,
    {
        let body = response
            .text()
            .await
            .map_err(|source| DataError::Transport { endpoint, source })?;
        serde_json::from_str(&body).map_err(|error| DataError::decode(endpoint, error))
    }

    /// GET `/api/dashboard?exchange={name}`: the base row list.
    ///
    /// Rows arrive without a selection; the view initialises it on apply.
    pub async fn fetch_dashboard(
        &self,
        exchange: Exchange,
    ) -> Result<Vec<DashboardRow>, DataError> {
        const ENDPOINT: &str = "/api/dashboard";
        let response = self
            .http
            .get(self.endpoint_url(ENDPOINT, exchange))
            .send()
            .await
            .map_err(|source| DataError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::decode(ENDPOINT, response).await
    }

    /// GET `/calculate?exchange={name}`: top-line metrics.
    pub async fn fetch_metrics(&self, exchange: Exchange) -> Result<MetricsSnapshot, DataError> {
        const ENDPOINT: &str = "/calculate";
        let response = self
            .http
            .get(self.endpoint_url(ENDPOINT, exchange))
            .send()
            .await
            .map_err(|source| DataError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::decode(ENDPOINT, response).await
    }

    /// POST `/get_liquidity?exchange={name}`: liquidity/VWAP for one country
    /// restricted to the given payment methods.
    pub async fn fetch_liquidity(
        &self,
        exchange: Exchange,
        country: &str,
        payment_methods: &[String],
    ) -> Result<LiquiditySlice, DataError> {
        const ENDPOINT: &str = "/get_liquidity";
        let response = self
            .http
            .post(self.endpoint_url(ENDPOINT, exchange))
            .json(&LiquidityQuery {
                country,
                payment_methods,
            })
            .send()
            .await
            .map_err(|source| DataError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::decode(ENDPOINT, response).await
    }

    /// GET `/logs?exchange={name}`: historical snapshot records.
    pub async fn fetch_logs(&self, exchange: Exchange) -> Result<Vec<LogRecord>, DataError> {
        const ENDPOINT: &str = "/logs";
        let response = self
            .http
            .get(self.endpoint_url(ENDPOINT, exchange))
            .send()
            .await
            .map_err(|source| DataError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::decode(ENDPOINT, response).await
    }
}

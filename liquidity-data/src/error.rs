use thiserror::Error;

/// All errors generated in `liquidity-data`.
///
/// Failures are logged at the call site and leave prior in-memory state
/// unchanged; the dashboard is read-only so there is no retry path.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("transport failure calling {endpoint}: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed payload from {endpoint}: {detail}")]
    Decode {
        endpoint: &'static str,
        detail: String,
    },

    #[error("invalid api base url: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("unknown exchange: {0}")]
    UnknownExchange(String),
}

impl DataError {
    pub(crate) fn decode(endpoint: &'static str, error: serde_json::Error) -> Self {
        Self::Decode {
            endpoint,
            detail: error.to_string(),
        }
    }
}

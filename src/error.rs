//! Error types for the shared-time library

use thiserror::Error;

/// Why a life-expectancy lookup did not produce a figure.
///
/// Never surfaced to end users: the lookup layer substitutes the fallback
/// table for every variant.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Country name outside the catalogue
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// Provider switched off in configuration
    #[error("life-expectancy provider is disabled")]
    Disabled,

    /// Network or transport error
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status that was not worth retrying
    #[error("request failed with HTTP {0}")]
    Status(u16),

    /// Error payload returned by the API
    #[error("world bank api error: {0}")]
    Api(String),

    /// Response body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No observation available for the indicator
    #[error("no {indicator} value for {country}")]
    NoData { country: String, indicator: String },
}

/// Rejected feature-lifecycle transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// Enable/disable requested before the first configuration
    #[error("time-together view is not configured yet")]
    NotConfigured,
}

//! Exchange rate lookup abstractions

use async_trait::async_trait;
use reqwest::StatusCode;

/// Failures a rate provider can report. The calculator maps each variant to a status.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Rate provider is unreachable: {0}")]
    Unreachable(String),

    #[error("Rate provider answered with {0}")]
    Upstream(StatusCode),

    #[error("Rate provider sent a malformed rate: {0:?}")]
    Malformed(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl RateError {
    /// Whether the provider failed to answer at all (connect error or timeout).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RateError::Unreachable(_))
    }
}

/// Parses a plain-text rate body. Only finite numbers are accepted.
pub fn parse_rate(body: &str) -> Result<f64, RateError> {
    match body.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() => Ok(rate),
        _ => Err(RateError::Malformed(body.to_string())),
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the rate that converts one unit of `currency_code` into EUR.
    async fn fetch_rate(&self, currency_code: &str) -> Result<f64, RateError>;
}

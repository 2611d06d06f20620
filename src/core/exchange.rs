//! Conversion of an amount into EUR using a single rate lookup.

use reqwest::StatusCode;
use serde::{Serialize, Serializer};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::rate::{RateError, RateProvider};
use crate::providers::conversion_rates::ConversionRatesProvider;

pub const TARGET_CURRENCY: &str = "EUR";
pub const INTERNAL_ERROR_MESSAGE: &str = "Ooops! There was an error on our side!";
pub const GATEWAY_TIMEOUT_MESSAGE: &str = "The exchange rate provider did not respond in time";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RequestError {
    #[error("Amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    #[error("Currency code must be three letters, got {0:?}")]
    InvalidCurrency(String),
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub currency_code: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, currency_code: &str) -> Result<Self, RequestError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(RequestError::InvalidAmount(amount));
        }
        let code = currency_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RequestError::InvalidCurrency(currency_code.to_string()));
        }
        Ok(Self {
            amount,
            currency_code: code.to_ascii_uppercase(),
        })
    }
}

/// Outcome of one conversion: an HTTP-style status plus the message shown to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub body: String,
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl ConversionResult {
    pub fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn gateway_timeout() -> Self {
        Self {
            status: StatusCode::GATEWAY_TIMEOUT,
            body: GATEWAY_TIMEOUT_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl From<RateError> for ConversionResult {
    fn from(err: RateError) -> Self {
        if err.is_unreachable() {
            ConversionResult::gateway_timeout()
        } else {
            ConversionResult::internal_error()
        }
    }
}

/// Formats a number the shortest way that round-trips, keeping a trailing `.0` on integral values.
pub fn format_number(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

pub struct ExchangeCalculator {
    provider: Box<dyn RateProvider>,
}

impl ExchangeCalculator {
    /// Creates a calculator that asks the rate provider at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let provider = ConversionRatesProvider::new(base_url, timeout)?;
        Ok(Self::with_provider(provider))
    }

    pub fn with_provider(provider: impl RateProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Converts `amount` of `currency_code` to EUR. Every failure is folded into the result.
    #[instrument(name = "ToEuro", skip(self))]
    pub async fn to_euro(&self, amount: f64, currency_code: &str) -> ConversionResult {
        match self.provider.fetch_rate(currency_code).await {
            Ok(rate) => {
                let result = amount * rate;
                debug!(rate, result, "Computed conversion");
                ConversionResult::ok(format!(
                    "Exchanging {} {} at a rate of {} will give you {} {}",
                    format_number(amount),
                    currency_code,
                    format_number(rate),
                    format_number(result),
                    TARGET_CURRENCY
                ))
            }
            Err(e) => {
                warn!(error = %e, "Rate lookup failed");
                e.into()
            }
        }
    }

    pub async fn convert(&self, request: &ConversionRequest) -> ConversionResult {
        self.to_euro(request.amount, &request.currency_code).await
    }
}

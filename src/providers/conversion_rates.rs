use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::rate::{RateError, RateProvider, parse_rate};

/// Plain-text rate provider served at `{base_url}/currencies/{code}`.
pub struct ConversionRatesProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ConversionRatesProvider {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mxc/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(ConversionRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn rate_url(&self, currency_code: &str) -> String {
        format!("{}/currencies/{}", self.base_url, currency_code)
    }
}

fn classify(err: reqwest::Error) -> RateError {
    if err.is_timeout() || err.is_connect() {
        RateError::Unreachable(err.to_string())
    } else {
        RateError::Transport(err.to_string())
    }
}

#[async_trait]
impl RateProvider for ConversionRatesProvider {
    #[instrument(
        name = "ConversionRateFetch",
        skip(self),
        fields(currency = %currency_code)
    )]
    async fn fetch_rate(&self, currency_code: &str) -> Result<f64, RateError> {
        let url = self.rate_url(currency_code);
        debug!("Requesting exchange rate from {}", url);

        let response = self.client.get(&url).send().await.map_err(classify)?;
        debug!(status = %response.status(), "Received rate provider response");

        if !response.status().is_success() {
            return Err(RateError::Upstream(response.status()));
        }

        let text = response.text().await.map_err(classify)?;
        parse_rate(&text)
    }
}

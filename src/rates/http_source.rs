use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::rates::{RateError, RateSource, RateTable};

const RATE_API_URL: &str = "https://developers.paysera.com/tasks/api/currency-exchange-rates";

#[derive(Debug, Deserialize)]
struct RateResponse {
    /// A response without this field yields an empty table, which makes
    /// every currency fall back to parity with EUR.
    #[serde(default)]
    rates: RateTable
}

/// Fetches the exchange-rate table from the public rate endpoint.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into()
        }
    }
}

impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new(RATE_API_URL)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        let response = self.client.get(&self.url)
            .send().await?
            .error_for_status()?;

        let parsed: RateResponse = response.json().await?;

        // A rate must be positive to be usable as a divisor.
        let table = parsed.rates.into_iter()
            .filter(|(_, rate)| rate > &Decimal::ZERO)
            .collect();

        Ok(table)
    }
}

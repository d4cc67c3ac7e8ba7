mod errors;
mod http_source;
#[cfg(test)]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::OnceCell;
use tracing::debug;

pub use errors::RateError;
pub use http_source::HttpRateSource;

use crate::types::{round_cents, EUR};

/// EUR-relative exchange rates keyed by currency code.
pub type RateTable = HashMap<String, Decimal>;

/// A source of the full exchange-rate table.
///
/// Fetched at most once per process; implementations are free to hit the
/// network, a file, or a fixed in-memory table in tests.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<RateTable, RateError>;
}

/// Caching currency converter over a [`RateSource`].
///
/// The table is loaded lazily on the first conversion that needs a rate and
/// kept for the lifetime of the process. Conversions to or from EUR never
/// consult the table, so EUR-only batches run without a fetch.
pub struct ExchangeRates {
    source: Box<dyn RateSource>,
    table: OnceCell<RateTable>
}

impl ExchangeRates {
    pub fn new(source: impl RateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            table: OnceCell::new()
        }
    }

    /// Returns the EUR-relative rate for a currency.
    ///
    /// Currencies absent from the table are treated as trading at parity
    /// with EUR, so a response without the expected data still converts
    /// every amount 1:1 instead of failing the batch.
    pub async fn rate(&self, currency: &str) -> Result<Decimal, RateError> {
        let table = self.table.get_or_try_init(|| self.source.fetch()).await?;

        Ok(table.get(currency).copied().unwrap_or_else(|| {
            debug!("No exchange rate for {currency}, assuming parity with EUR");
            Decimal::ONE
        }))
    }

    /// Converts an amount in `currency` to EUR, rounded to 2 decimals.
    pub async fn to_eur(&self, amount: Decimal, currency: &str) -> Result<Decimal, RateError> {
        if currency == EUR {
            return Ok(round_cents(amount));
        }

        let rate = self.rate(currency).await?;
        Ok(round_cents(amount / rate))
    }

    /// Converts an EUR amount to `currency`, rounded to 2 decimals.
    pub async fn from_eur(&self, amount: Decimal, currency: &str) -> Result<Decimal, RateError> {
        if currency == EUR {
            return Ok(round_cents(amount));
        }

        let rate = self.rate(currency).await?;
        Ok(round_cents(amount * rate))
    }
}

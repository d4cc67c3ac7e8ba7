use anyhow::Result;
use async_trait::async_trait;
use rust_decimal_macros::dec;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ExchangeRates, HttpRateSource, RateError, RateSource, RateTable};

struct FixedRateSource(RateTable);

#[async_trait]
impl RateSource for FixedRateSource {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        Ok(self.0.clone())
    }
}

/// Fails every fetch, to prove a code path never asks for the table.
struct UnreachableRateSource;

#[async_trait]
impl RateSource for UnreachableRateSource {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        Err(reqwest::get("http://127.0.0.1:1/unreachable").await.unwrap_err().into())
    }
}

fn fixed_rates() -> ExchangeRates {
    let table = RateTable::from([
        ("USD".to_string(), dec!(1.1497)),
        ("JPY".to_string(), dec!(129.53))
    ]);

    ExchangeRates::new(FixedRateSource(table))
}

async fn mount_rates_body(server: &MockServer, body: &str, expected_fetches: u64) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .expect(expected_fetches)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_http_source_fetches_table_exactly_once() -> Result<()> {
    let server = MockServer::start().await;
    mount_rates_body(&server, r#"{"rates": {"USD": 1.1497, "JPY": 129.53}}"#, 1).await;

    let rates = ExchangeRates::new(HttpRateSource::new(server.uri()));

    assert_eq!(rates.rate("USD").await?, dec!(1.1497));
    assert_eq!(rates.rate("JPY").await?, dec!(129.53));
    assert_eq!(rates.rate("USD").await?, dec!(1.1497));

    server.verify().await;

    Ok(())
}

#[tokio::test]
async fn test_missing_rates_field_falls_back_to_parity() -> Result<()> {
    let server = MockServer::start().await;
    mount_rates_body(&server, r#"{"base": "EUR"}"#, 1).await;

    let rates = ExchangeRates::new(HttpRateSource::new(server.uri()));

    assert_eq!(rates.rate("USD").await?, dec!(1));
    assert_eq!(rates.to_eur(dec!(100), "USD").await?, dec!(100.00));

    Ok(())
}

#[tokio::test]
async fn test_unknown_currency_falls_back_to_parity() -> Result<()> {
    let rates = fixed_rates();

    assert_eq!(rates.rate("GBP").await?, dec!(1));

    Ok(())
}

#[tokio::test]
async fn test_non_positive_rates_are_dropped_at_ingest() -> Result<()> {
    let server = MockServer::start().await;
    mount_rates_body(&server, r#"{"rates": {"XXX": 0, "USD": 1.1497}}"#, 1).await;

    let rates = ExchangeRates::new(HttpRateSource::new(server.uri()));

    assert_eq!(rates.rate("XXX").await?, dec!(1));
    assert_eq!(rates.rate("USD").await?, dec!(1.1497));

    Ok(())
}

#[tokio::test]
async fn test_http_failure_propagates_as_rate_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let rates = ExchangeRates::new(HttpRateSource::new(server.uri()));
    let result = rates.rate("USD").await;

    assert!(matches!(result, Err(RateError::Fetch(_))));
}

#[tokio::test]
async fn test_eur_conversions_never_touch_the_source() -> Result<()> {
    let rates = ExchangeRates::new(UnreachableRateSource);

    assert_eq!(rates.to_eur(dec!(123.456), "EUR").await?, dec!(123.46));
    assert_eq!(rates.from_eur(dec!(123.456), "EUR").await?, dec!(123.46));

    Ok(())
}

#[tokio::test]
async fn test_to_eur_divides_by_rate_and_rounds() -> Result<()> {
    let rates = fixed_rates();

    assert_eq!(rates.to_eur(dec!(100.00), "USD").await?, dec!(86.98));
    assert_eq!(rates.to_eur(dec!(30000), "JPY").await?, dec!(231.61));

    Ok(())
}

#[tokio::test]
async fn test_from_eur_multiplies_by_rate_and_rounds() -> Result<()> {
    let rates = fixed_rates();

    assert_eq!(rates.from_eur(dec!(0.26094), "USD").await?, dec!(0.30));
    assert_eq!(rates.from_eur(dec!(0.69483), "JPY").await?, dec!(90.00));

    Ok(())
}

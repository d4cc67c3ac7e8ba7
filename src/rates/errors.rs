use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Exchange rate request failed: {0}")]
    Fetch(#[from] reqwest::Error)
}

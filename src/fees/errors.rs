use thiserror::Error;

use crate::rates::RateError;

#[derive(Debug, Error)]
pub enum FeeError {
    #[error(transparent)]
    Rate(#[from] RateError)
}

use thiserror::Error;

use crate::fees::FeeError;

#[derive(Debug, Error)]
pub enum CommissionError {
    #[error("Unsupported client type: {client_type}")]
    UnsupportedClientType {
        client_type: String
    },
    #[error(transparent)]
    Fee(#[from] FeeError)
}

mod errors;
mod transaction;

use std::str::FromStr;

pub use errors::ParseError;
pub use transaction::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Deposit,
    Withdraw
}

impl FromStr for OperationType {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "deposit" => Ok(OperationType::Deposit),
            "withdraw" => Ok(OperationType::Withdraw),
            other => Err(ParseError::UnknownOperation { value: other.to_string() })
        }
    }
}

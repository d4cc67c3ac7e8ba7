use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid transaction record: expected 6 fields, got {got}")]
    FieldCount {
        got: usize
    },
    #[error("Invalid transaction date: {value}")]
    InvalidDate {
        value: String
    },
    #[error("Invalid user id: {value}")]
    InvalidUserId {
        value: String
    },
    #[error("Unknown operation type: {value}")]
    UnknownOperation {
        value: String
    },
    #[error("Invalid transaction amount: {value}")]
    InvalidAmount {
        value: String
    },
    #[error("Transaction amount must not be negative: {value}")]
    NegativeAmount {
        value: String
    }
}

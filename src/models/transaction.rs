use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::models::{OperationType, ParseError};
use crate::types::UserId;

const FIELD_COUNT: usize = 6;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Represents a single row from the input CSV file.
///
/// Constructed once per record, consumed exactly once by the engine and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Calendar date of the operation, source of the ISO week bucketing.
    pub date: NaiveDate,
    /// The transaction owner.
    pub user_id: UserId,
    /// Client category ("private", "business", or a custom registered type).
    pub user_type: String,
    /// Deposit or withdrawal.
    pub operation: OperationType,
    /// Non-negative amount in `currency`.
    pub amount: Decimal,
    /// ISO-style currency code.
    pub currency: String
}

impl Transaction {
    /// Parses a positional CSV record:
    /// `date,user_id,user_type,operation,amount,currency`.
    ///
    /// Records with fewer than 6 fields are rejected; extra trailing fields
    /// are ignored. Negative amounts are rejected here so the fee rules can
    /// assume valid numeric input.
    pub fn from_record(record: &StringRecord) -> Result<Self, ParseError> {
        if record.len() < FIELD_COUNT {
            return Err(ParseError::FieldCount { got: record.len() });
        }

        let date = NaiveDate::parse_from_str(&record[0], DATE_FORMAT)
            .map_err(|_| ParseError::InvalidDate { value: record[0].to_string() })?;

        let user_id: UserId = record[1].parse()
            .map_err(|_| ParseError::InvalidUserId { value: record[1].to_string() })?;

        let operation: OperationType = record[3].parse()?;

        let amount: Decimal = record[4].parse()
            .map_err(|_| ParseError::InvalidAmount { value: record[4].to_string() })?;

        if amount.is_sign_negative() {
            return Err(ParseError::NegativeAmount { value: record[4].to_string() });
        }

        Ok(Self {
            date,
            user_id,
            user_type: record[2].to_string(),
            operation,
            amount,
            currency: record[5].to_string()
        })
    }
}

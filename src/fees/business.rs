use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fees::{FeeError, FeeRule};
use crate::types::{round_currency, UserId};

const COMMISSION_RATE: Decimal = dec!(0.005);

/// Flat 0.5% commission on the original-currency amount. No conversion,
/// no state.
pub struct BusinessFeeRule;

#[async_trait]
impl FeeRule for BusinessFeeRule {
    async fn calculate_fee(
        &mut self,
        amount: Decimal,
        currency: &str,
        _user_id: UserId,
        _date: NaiveDate
    ) -> Result<Decimal, FeeError> {
        Ok(round_currency(amount * COMMISSION_RATE, currency))
    }
}

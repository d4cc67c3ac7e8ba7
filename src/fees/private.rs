use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::fees::{FeeError, FeeRule, WeekKey, WeeklyAllowanceTracker};
use crate::rates::ExchangeRates;
use crate::types::{round_currency, UserId};

const COMMISSION_RATE: Decimal = dec!(0.003);
const FREE_AMOUNT_EUR: Decimal = dec!(1000);
const FREE_WITHDRAWALS_PER_WEEK: u32 = 3;

/// Private clients get their first 3 withdrawals per ISO week free, up to a
/// cumulative 1000 EUR-equivalent; everything beyond either limit is charged
/// at 0.3%.
pub struct PrivateFeeRule {
    rates: Arc<ExchangeRates>,
    allowances: WeeklyAllowanceTracker
}

impl PrivateFeeRule {
    pub fn new(rates: Arc<ExchangeRates>) -> Self {
        Self {
            rates,
            allowances: WeeklyAllowanceTracker::default()
        }
    }
}

#[async_trait]
impl FeeRule for PrivateFeeRule {
    async fn calculate_fee(
        &mut self,
        amount: Decimal,
        currency: &str,
        user_id: UserId,
        date: NaiveDate
    ) -> Result<Decimal, FeeError> {
        let key = WeekKey::new(date, user_id);
        let amount_eur = self.rates.to_eur(amount, currency).await?;

        let bucket = self.allowances.bucket_mut(key);

        // The count and amount limits are checked independently: exhausting
        // either one routes the remainder to the paid branch.
        let fee_eur = if bucket.count() < FREE_WITHDRAWALS_PER_WEEK {
            let remaining_free = bucket.remaining_free(FREE_AMOUNT_EUR);

            if amount_eur <= remaining_free {
                Decimal::ZERO
            } else {
                (amount_eur - remaining_free) * COMMISSION_RATE
            }
        } else {
            amount_eur * COMMISSION_RATE
        };

        bucket.record(amount_eur);

        debug!("User [{user_id}] withdrew {amount_eur} EUR-equivalent, fee {fee_eur} EUR");

        let fee = self.rates.from_eur(fee_eur, currency).await?;
        Ok(round_currency(fee, currency))
    }
}

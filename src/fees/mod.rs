mod allowance;
mod business;
mod errors;
mod private;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub use allowance::{WeekKey, WeeklyAllowanceTracker, WeeklyBucket};
pub use business::BusinessFeeRule;
pub use errors::FeeError;
pub use private::PrivateFeeRule;

use crate::types::UserId;

pub const PRIVATE_CLIENT: &str = "private";
pub const BUSINESS_CLIENT: &str = "business";

/// A per-client-type withdrawal fee strategy.
///
/// Implementations may carry state across calls (the private rule tracks
/// weekly allowances), so the engine dispatches to them sequentially with
/// exclusive access.
#[async_trait]
pub trait FeeRule: Send {
    /// Computes the fee for one withdrawal, in the transaction's currency.
    async fn calculate_fee(
        &mut self,
        amount: Decimal,
        currency: &str,
        user_id: UserId,
        date: NaiveDate
    ) -> Result<Decimal, FeeError>;
}

use rust_decimal::{Decimal, RoundingStrategy};

pub const EUR: &str = "EUR";

/// The only supported currency without fractional units.
const ZERO_DECIMAL_CURRENCY: &str = "JPY";

const CENT_DECIMALS: u32 = 2;

/// Number of decimal places a currency is rounded to: 0 for JPY, 2 otherwise.
pub fn currency_decimals(currency: &str) -> u32 {
    if currency == ZERO_DECIMAL_CURRENCY {
        0
    } else {
        CENT_DECIMALS
    }
}

/// Rounds an amount to the currency's decimal places, half away from zero.
pub fn round_currency(amount: Decimal, currency: &str) -> Decimal {
    amount.round_dp_with_strategy(currency_decimals(currency), RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an amount to 2 decimal places, half away from zero, regardless of currency.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a fee with exactly 2 decimal digits and a `.` separator.
///
/// Output formatting is fixed at 2 decimals for every currency, including
/// zero-decimal ones. A JPY fee rounded internally to a whole number still
/// renders as e.g. "90.00".
pub fn format_fee(fee: Decimal) -> String {
    format!("{fee:.2}")
}

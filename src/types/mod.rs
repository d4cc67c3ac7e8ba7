mod money;

pub use money::{currency_decimals, format_fee, round_cents, round_currency, EUR};

pub type UserId = u64;

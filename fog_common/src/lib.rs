mod money;

pub mod op;
mod secret;

pub use money::{Money, MoneyConversionError, MONEY_FRACTION_DIGITS, MONEY_MAX_INTEGER_DIGITS};
pub use secret::Secret;

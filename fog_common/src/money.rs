use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

use crate::op;

/// The maximum number of integer digits a monetary value may carry.
pub const MONEY_MAX_INTEGER_DIGITS: usize = 10;
/// Monetary values always carry exactly two fraction digits.
pub const MONEY_FRACTION_DIGITS: usize = 2;

//--------------------------------------       Money       -----------------------------------------------------------
/// A fixed-point monetary amount with two fraction digits, stored as a whole number of cents.
///
/// The string form is the canonical representation: `"25.50"`, at most ten integer digits and at
/// most two fraction digits. This is also the form used on the wire and accepted by [`FromStr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Type)]
#[sqlx(transparent)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a monetary amount: {0}")]
pub struct MoneyConversionError(pub String);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount as a whole number of cents.
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_mul(self, rhs: i64) -> Option<Self> {
        self.0.checked_mul(rhs).map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyConversionError(format!("'{s}' is not a decimal amount")));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyConversionError(format!("'{s}' is not a decimal amount")));
        }
        if int_part.len() > MONEY_MAX_INTEGER_DIGITS {
            return Err(MoneyConversionError(format!(
                "'{s}' has more than {MONEY_MAX_INTEGER_DIGITS} integer digits"
            )));
        }
        if frac_part.len() > MONEY_FRACTION_DIGITS {
            return Err(MoneyConversionError(format!(
                "'{s}' has more than {MONEY_FRACTION_DIGITS} fraction digits"
            )));
        }
        let units: i64 =
            int_part.parse().map_err(|e| MoneyConversionError(format!("'{s}' is out of range: {e}")))?;
        let cents = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().unwrap_or(0) * 10,
            _ => frac_part.parse::<i64>().unwrap_or(0),
        };
        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(|| MoneyConversionError(format!("'{s}' is out of range")))?;
        Ok(Self(if negative { -total } else { total }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

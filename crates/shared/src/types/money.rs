//! Money amounts in cents.
//!
//! Upstream APIs store every amount in the smallest currency unit. Conversion
//! to dollars goes through `rust_decimal::Decimal`, never through floats.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount in cents (USD).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Returns the raw number of cents.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Converts to dollars (exact, two decimal places).
    #[must_use]
    pub fn to_dollars(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

// Totals saturate at the i64 bounds rather than wrap.
impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// How a currency amount is rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Two decimal places: `$125.50`.
    #[default]
    Exact,
    /// Whole dollars, half away from zero: `$126`.
    Whole,
}

/// Formats a cent amount as US dollars with thousands separators.
#[must_use]
pub fn format_currency(cents: Cents, rounding: Rounding) -> String {
    format_dollars(cents.to_dollars(), rounding)
}

/// Formats a dollar amount that may carry fractional cents (e.g. an average).
#[must_use]
pub fn format_dollars(dollars: Decimal, rounding: Rounding) -> String {
    let places = match rounding {
        Rounding::Exact => 2,
        Rounding::Whole => 0,
    };
    let mut rounded =
        dollars.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = format!("{sign}${}", group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Inserts `,` every three digits from the right of a plain digit string.
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

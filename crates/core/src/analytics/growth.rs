//! Growth and share percentages.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Percentage growth from `previous` to `current`, rounded to two places.
///
/// Returns zero when there is no previous value to compare against.
#[must_use]
pub fn growth_percentage(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    ((current - previous) / previous * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part` as a percentage of `total`, rounded to two places; zero for an empty total.
#[must_use]
pub fn share_percentage(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Direction of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Value went up.
    Increase,
    /// Value went down.
    Decrease,
    /// No movement.
    Neutral,
}

/// A period-over-period change shown under a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Magnitude of the change in percent.
    pub value: Decimal,
    /// Direction of the change.
    #[serde(rename = "type")]
    pub change_type: ChangeType,
}

impl Change {
    /// Creates a change with an explicit direction.
    #[must_use]
    pub const fn new(value: Decimal, change_type: ChangeType) -> Self {
        Self { value, change_type }
    }

    /// Classifies a signed growth percentage.
    #[must_use]
    pub fn from_growth(growth: Decimal) -> Self {
        let change_type = if growth.is_zero() {
            ChangeType::Neutral
        } else if growth.is_sign_positive() {
            ChangeType::Increase
        } else {
            ChangeType::Decrease
        };
        Self {
            value: growth.abs(),
            change_type,
        }
    }

    /// Display form, e.g. `+12.5%`.
    ///
    /// The sign comes from the change type, not from the sign of `value`.
    #[must_use]
    pub fn display(&self) -> String {
        let mut magnitude = self
            .value
            .abs()
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        magnitude.rescale(1);
        let sign = match self.change_type {
            ChangeType::Increase => "+",
            ChangeType::Decrease => "-",
            ChangeType::Neutral => "",
        };
        format!("{sign}{magnitude}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(150), dec!(100), dec!(50))]
    #[case(dec!(50), dec!(100), dec!(-50))]
    #[case(dec!(100), dec!(0), dec!(0))]
    #[case(dec!(0), dec!(0), dec!(0))]
    #[case(dec!(200), dec!(300), dec!(-33.33))]
    fn test_growth_percentage(
        #[case] current: Decimal,
        #[case] previous: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(growth_percentage(current, previous), expected);
    }

    #[test]
    fn test_share_percentage() {
        assert_eq!(share_percentage(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(share_percentage(dec!(5), dec!(0)), Decimal::ZERO);
    }

    #[rstest]
    #[case(dec!(12.5), ChangeType::Increase, "+12.5%")]
    #[case(dec!(12.5), ChangeType::Decrease, "-12.5%")]
    #[case(dec!(12.5), ChangeType::Neutral, "12.5%")]
    #[case(dec!(-12.5), ChangeType::Increase, "+12.5%")]
    #[case(dec!(3), ChangeType::Increase, "+3.0%")]
    #[case(dec!(0.05), ChangeType::Decrease, "-0.1%")]
    fn test_change_display(
        #[case] value: Decimal,
        #[case] change_type: ChangeType,
        #[case] expected: &str,
    ) {
        assert_eq!(Change::new(value, change_type).display(), expected);
    }

    #[test]
    fn test_from_growth_classifies_direction() {
        assert_eq!(
            Change::from_growth(dec!(4.2)),
            Change::new(dec!(4.2), ChangeType::Increase)
        );
        assert_eq!(
            Change::from_growth(dec!(-4.2)),
            Change::new(dec!(4.2), ChangeType::Decrease)
        );
        assert_eq!(
            Change::from_growth(Decimal::ZERO).change_type,
            ChangeType::Neutral
        );
    }

    #[test]
    fn test_change_serializes_type_field() {
        let json = serde_json::to_value(Change::new(dec!(12.5), ChangeType::Increase)).unwrap();
        assert_eq!(json["type"], "increase");
    }
}

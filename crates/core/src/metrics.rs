//! Metric cards and number formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use maison_shared::types::money::{Rounding, format_currency, format_dollars, group_thousands};
use maison_shared::types::Cents;

use crate::analytics::growth::{Change, ChangeType};

/// Visual status of a metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    /// Moving the right way.
    Positive,
    /// Moving the wrong way.
    Negative,
    /// Flat or no comparison.
    Neutral,
}

/// Card icons understood by the admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricIcon {
    /// Currency sign.
    DollarSign,
    /// Shopping bag.
    ShoppingBag,
    /// People.
    Users,
    /// Upward trend.
    TrendingUp,
    /// Box.
    Package,
    /// Globe.
    Globe,
    /// Repeat arrows.
    Repeat,
}

/// A single headline number on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    /// Card title.
    pub title: String,
    /// Display value.
    pub value: String,
    /// Change versus the previous period, if known.
    pub change: Option<Change>,
    /// Change rendered as text (`+12.5%`).
    pub change_label: Option<String>,
    /// Icon.
    pub icon: MetricIcon,
    /// Status derived from the change.
    pub status: MetricStatus,
}

impl MetricCard {
    fn build(title: &str, value: String, change: Option<Change>, icon: MetricIcon) -> Self {
        let status = match change.map(|c| c.change_type) {
            Some(ChangeType::Increase) => MetricStatus::Positive,
            Some(ChangeType::Decrease) => MetricStatus::Negative,
            Some(ChangeType::Neutral) | None => MetricStatus::Neutral,
        };
        Self {
            title: title.to_string(),
            value,
            change_label: change.map(|c| c.display()),
            change,
            icon,
            status,
        }
    }

    /// Card showing a cent amount as whole dollars.
    #[must_use]
    pub fn currency(title: &str, cents: Cents, change: Option<Change>, icon: MetricIcon) -> Self {
        Self::build(title, format_currency(cents, Rounding::Whole), change, icon)
    }

    /// Card showing a fractional cent amount (e.g. an average) as dollars and cents.
    #[must_use]
    pub fn average_currency(
        title: &str,
        cents: Decimal,
        change: Option<Change>,
        icon: MetricIcon,
    ) -> Self {
        Self::build(
            title,
            format_dollars(cents / Decimal::ONE_HUNDRED, Rounding::Exact),
            change,
            icon,
        )
    }

    /// Card showing a count.
    #[must_use]
    pub fn count(title: &str, value: u64, change: Option<Change>, icon: MetricIcon) -> Self {
        Self::build(title, format_number(value), change, icon)
    }

    /// Card showing a percentage.
    #[must_use]
    pub fn percentage(title: &str, value: Decimal, change: Option<Change>, icon: MetricIcon) -> Self {
        Self::build(title, format_percentage(value), change, icon)
    }

    /// Card showing a plain decimal (one place).
    #[must_use]
    pub fn decimal(title: &str, value: Decimal, icon: MetricIcon) -> Self {
        Self::build(title, one_place(value).to_string(), None, icon)
    }
}

fn one_place(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}

/// Formats a count with thousands separators.
#[must_use]
pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats a percentage with one decimal place.
#[must_use]
pub fn format_percentage(value: Decimal) -> String {
    format!("{}%", one_place(value))
}

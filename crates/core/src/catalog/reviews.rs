//! Review summary and star display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One of the five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Star {
    /// Filled.
    Full,
    /// Half filled.
    Half,
    /// Outline only.
    Empty,
}

/// Rating block under the product title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Mean rating to one decimal, zero without reviews.
    pub average_rating: Decimal,
    /// Number of reviews.
    pub review_count: u64,
    /// Five stars.
    pub stars: [Star; 5],
    /// `4.5 (12 reviews)` or `No reviews yet`.
    pub label: String,
}

impl ReviewSummary {
    /// Builds the summary; ratings are clamped to 0-5.
    #[must_use]
    pub fn new(average_rating: Option<Decimal>, review_count: Option<u64>) -> Self {
        let count = review_count.unwrap_or(0);
        if count == 0 {
            return Self {
                average_rating: Decimal::ZERO,
                review_count: 0,
                stars: [Star::Empty; 5],
                label: "No reviews yet".to_string(),
            };
        }

        let rating = average_rating
            .unwrap_or(Decimal::ZERO)
            .clamp(Decimal::ZERO, Decimal::from(5))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        let noun = if count == 1 { "review" } else { "reviews" };

        Self {
            average_rating: rating,
            review_count: count,
            stars: stars(rating),
            label: format!("{} ({count} {noun})", one_place(rating)),
        }
    }
}

fn stars(rating: Decimal) -> [Star; 5] {
    let half = Decimal::new(5, 1);
    let mut out = [Star::Empty; 5];
    for (i, star) in out.iter_mut().enumerate() {
        let position = Decimal::from(i);
        let remaining = rating - position;
        *star = if remaining >= Decimal::ONE {
            Star::Full
        } else if remaining >= half {
            Star::Half
        } else {
            Star::Empty
        };
    }
    out
}

fn one_place(mut rating: Decimal) -> Decimal {
    rating.rescale(1);
    rating
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_no_reviews() {
        let summary = ReviewSummary::new(Some(dec!(4.8)), Some(0));
        assert_eq!(summary.label, "No reviews yet");
        assert_eq!(summary.stars, [Star::Empty; 5]);
        assert_eq!(summary.average_rating, Decimal::ZERO);
    }

    #[test]
    fn test_rating_rounds_to_one_decimal() {
        let summary = ReviewSummary::new(Some(dec!(4.46)), Some(12));
        assert_eq!(summary.average_rating, dec!(4.5));
        assert_eq!(summary.label, "4.5 (12 reviews)");
        assert_eq!(
            summary.stars,
            [Star::Full, Star::Full, Star::Full, Star::Full, Star::Half]
        );
    }

    #[test]
    fn test_whole_rating_label_keeps_one_decimal() {
        let summary = ReviewSummary::new(Some(dec!(4)), Some(1));
        assert_eq!(summary.label, "4.0 (1 review)");
        assert_eq!(summary.stars[4], Star::Empty);
    }

    #[test]
    fn test_rating_is_clamped() {
        let summary = ReviewSummary::new(Some(dec!(7.2)), Some(3));
        assert_eq!(summary.average_rating, dec!(5));
        assert_eq!(summary.stars, [Star::Full; 5]);
    }
}

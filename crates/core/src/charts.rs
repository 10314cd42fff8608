//! Chart specifications.
//!
//! The storefront renders every chart with the same charting library and a
//! fixed set of presets; this module produces the data half of that contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Brand palette, gold tones first.
pub const PALETTE: [&str; 8] = [
    "#D4AF37", "#C9A96E", "#B8956A", "#A78B5F", "#8C7851", "#E8D8B0", "#2C2C2C", "#7A7A7A",
];

/// Palette colour for the `index`-th series or slice; wraps around.
#[must_use]
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Chart presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Series over time.
    Line,
    /// Categorical comparison.
    Bar,
    /// Parts of a whole.
    Pie,
    /// Parts of a whole with a hole.
    Doughnut,
}

/// One series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Legend label.
    pub label: String,
    /// One value per chart label.
    pub data: Vec<Decimal>,
    /// One colour for line/bar series, one per slice for pie/doughnut.
    pub colors: Vec<String>,
    /// Drawn with this preset instead of the chart's own, for mixed charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
}

/// A chart ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Preset.
    pub kind: ChartKind,
    /// Title shown above the chart.
    pub title: String,
    /// X-axis labels or slice names.
    pub labels: Vec<String>,
    /// Series.
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    /// Starts an empty chart.
    #[must_use]
    pub fn new(kind: ChartKind, title: &str, labels: Vec<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            labels,
            datasets: Vec::new(),
        }
    }

    /// Adds a series coloured by its position.
    #[must_use]
    pub fn with_dataset(mut self, label: &str, data: Vec<Decimal>) -> Self {
        let color = palette_color(self.datasets.len()).to_string();
        self.datasets.push(Dataset {
            label: label.to_string(),
            data,
            colors: vec![color],
            kind: None,
        });
        self
    }

    /// Adds a series drawn as `kind` on top of the chart's preset.
    #[must_use]
    pub fn with_dataset_as(mut self, kind: ChartKind, label: &str, data: Vec<Decimal>) -> Self {
        self = self.with_dataset(label, data);
        if let Some(dataset) = self.datasets.last_mut() {
            dataset.kind = Some(kind);
        }
        self
    }

    /// Adds a series coloured slice by slice.
    #[must_use]
    pub fn with_slices(mut self, label: &str, data: Vec<Decimal>) -> Self {
        let colors = (0..data.len()).map(|i| palette_color(i).to_string()).collect();
        self.datasets.push(Dataset {
            label: label.to_string(),
            data,
            colors,
            kind: None,
        });
        self
    }

    /// Replaces slice colours of the first series where an override is given.
    #[must_use]
    pub fn with_slice_colors(mut self, overrides: &[Option<String>]) -> Self {
        if let Some(dataset) = self.datasets.first_mut() {
            for (slot, color) in dataset.colors.iter_mut().zip(overrides) {
                if let Some(color) = color {
                    slot.clone_from(color);
                }
            }
        }
        self
    }

    /// True when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.iter().all(|d| d.data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), "#D4AF37");
        assert_eq!(palette_color(PALETTE.len()), "#D4AF37");
    }

    #[test]
    fn test_series_get_distinct_colors() {
        let chart = ChartSpec::new(ChartKind::Line, "t", vec!["a".into()])
            .with_dataset("one", vec![dec!(1)])
            .with_dataset("two", vec![dec!(2)]);
        assert_eq!(chart.datasets[0].colors, vec![PALETTE[0]]);
        assert_eq!(chart.datasets[1].colors, vec![PALETTE[1]]);
    }

    #[test]
    fn test_mixed_series_kind() {
        let chart = ChartSpec::new(ChartKind::Line, "t", vec!["a".into()])
            .with_dataset("line", vec![dec!(1)])
            .with_dataset_as(ChartKind::Bar, "bars", vec![dec!(2)]);
        assert_eq!(chart.datasets[0].kind, None);
        assert_eq!(chart.datasets[1].kind, Some(ChartKind::Bar));
        assert_eq!(chart.datasets[1].colors, vec![PALETTE[1]]);

        let json = serde_json::to_value(&chart).unwrap();
        assert!(json["datasets"][0].get("kind").is_none());
        assert_eq!(json["datasets"][1]["kind"], "bar");
    }

    #[test]
    fn test_slice_color_overrides() {
        let chart = ChartSpec::new(ChartKind::Pie, "t", vec!["a".into(), "b".into()])
            .with_slices("s", vec![dec!(1), dec!(2)])
            .with_slice_colors(&[None, Some("#000000".to_string())]);
        assert_eq!(chart.datasets[0].colors, vec![PALETTE[0], "#000000"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(ChartSpec::new(ChartKind::Bar, "t", vec![]).is_empty());
        let chart = ChartSpec::new(ChartKind::Bar, "t", vec!["a".into()]).with_dataset("x", vec![dec!(1)]);
        assert!(!chart.is_empty());
        assert_eq!(serde_json::to_value(&chart).unwrap()["kind"], "bar");
    }
}

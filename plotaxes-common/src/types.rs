use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

/// Direction of the independent axis. A vertical plot draws bars/boxes
/// upwards, so its independent axis is `x`; a horizontal plot swaps the axes.
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlotOrientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlotType {
    Histogram,
    Barplot,
    Boxplot,
    Scatterplot,
    Lineplot,
    Heatmap,
    Volcano,
}

impl PlotType {
    /// Bars must start flush with the axis origin, so no cosmetic padding is
    /// added below the lower bound
    pub fn suppresses_lower_padding(&self) -> bool {
        matches!(self, PlotType::Histogram | PlotType::Barplot)
    }

    /// Histogram bars span the full bin range, so the upper bound is kept
    /// exact too
    pub fn suppresses_upper_padding(&self) -> bool {
        matches!(self, PlotType::Histogram)
    }
}

/// Which bounds of one axis hide data beyond the displayed range
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundTruncation {
    pub min: bool,
    pub max: bool,
}

impl BoundTruncation {
    pub fn new(min: bool, max: bool) -> Self {
        Self { min, max }
    }

    pub fn any(&self) -> bool {
        self.min || self.max
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisTruncationConfig {
    pub independent_axis: BoundTruncation,
    pub dependent_axis: BoundTruncation,
}

impl AxisTruncationConfig {
    pub fn any(&self) -> bool {
        self.independent_axis.any() || self.dependent_axis.any()
    }
}

/// One of the four truncatable bounds of a plot, in the order their
/// highlights are drawn
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TruncatedBound {
    IndependentMin,
    IndependentMax,
    DependentMin,
    DependentMax,
}

impl TruncatedBound {
    pub const ALL: [TruncatedBound; 4] = [
        TruncatedBound::IndependentMin,
        TruncatedBound::IndependentMax,
        TruncatedBound::DependentMin,
        TruncatedBound::DependentMax,
    ];

    pub fn is_independent(&self) -> bool {
        matches!(
            self,
            TruncatedBound::IndependentMin | TruncatedBound::IndependentMax
        )
    }

    pub fn is_min(&self) -> bool {
        matches!(
            self,
            TruncatedBound::IndependentMin | TruncatedBound::DependentMin
        )
    }

    pub fn is_set(&self, config: &AxisTruncationConfig) -> bool {
        match self {
            TruncatedBound::IndependentMin => config.independent_axis.min,
            TruncatedBound::IndependentMax => config.independent_axis.max,
            TruncatedBound::DependentMin => config.dependent_axis.min,
            TruncatedBound::DependentMax => config.dependent_axis.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_truncation_config_serde() {
        let config: AxisTruncationConfig =
            serde_json::from_str(r#"{"dependentAxis": {"max": true}}"#).unwrap();
        assert_eq!(config.independent_axis, BoundTruncation::default());
        assert_eq!(config.dependent_axis, BoundTruncation::new(false, true));
        assert!(config.any());
        assert!(TruncatedBound::DependentMax.is_set(&config));
        assert!(!TruncatedBound::DependentMin.is_set(&config));
    }

    #[test]
    fn test_plot_type_padding_rules() {
        assert!(PlotType::Histogram.suppresses_lower_padding());
        assert!(PlotType::Histogram.suppresses_upper_padding());
        assert!(PlotType::Barplot.suppresses_lower_padding());
        assert!(!PlotType::Barplot.suppresses_upper_padding());
        assert!(!PlotType::Scatterplot.suppresses_lower_padding());
        assert_eq!(PlotType::from_str("barplot").unwrap(), PlotType::Barplot);
        assert_eq!(
            PlotOrientation::from_str("horizontal").unwrap(),
            PlotOrientation::Horizontal
        );
    }
}

use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

pub const DEFAULT_HIGHLIGHT_FILL: &str = "rgba(128, 128, 128, 1)";
pub const DEFAULT_HIGHLIGHT_OPACITY: f64 = 0.5;

/// Whether highlights are drawn under or over the data traces
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShapeLayer {
    #[default]
    Below,
    Above,
}

/// Fill used for every truncation highlight of a plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightStyle {
    pub fill_color: String,
    pub opacity: f64,
    pub line_width: f64,
    pub layer: ShapeLayer,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_HIGHLIGHT_FILL.to_string(),
            opacity: DEFAULT_HIGHLIGHT_OPACITY,
            line_width: 0.0,
            layer: ShapeLayer::Below,
        }
    }
}

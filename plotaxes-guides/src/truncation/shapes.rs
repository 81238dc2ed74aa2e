use log::debug;
use plotaxes_common::range::{to_iso_string, AxisRange, AxisScalar};
use plotaxes_common::types::{AxisTruncationConfig, PlotOrientation, TruncatedBound};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::opts::HighlightStyle;

/// Coordinate system a shape edge is expressed in: data units of the `x` or
/// `y` axis, or the `0..1` fraction of the plotting area
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeRef {
    X,
    Y,
    Paper,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpan {
    pub reference: ShapeRef,
    pub start: AxisScalar,
    pub end: AxisScalar,
}

impl ShapeSpan {
    /// Full extent of the plotting area
    pub fn paper() -> Self {
        Self {
            reference: ShapeRef::Paper,
            start: AxisScalar::Number(0.0),
            end: AxisScalar::Number(1.0),
        }
    }
}

/// Rectangle marking the region between a raw and an extended axis bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruncationShape {
    pub bound: TruncatedBound,
    pub x: ShapeSpan,
    pub y: ShapeSpan,
    pub style: HighlightStyle,
}

impl TruncationShape {
    /// Layout shape object in the form expected by Plotly's `layout.shapes`
    pub fn to_plotly(&self) -> Value {
        json!({
            "type": "rect",
            "xref": self.x.reference,
            "yref": self.y.reference,
            "x0": scalar_to_json(&self.x.start),
            "x1": scalar_to_json(&self.x.end),
            "y0": scalar_to_json(&self.y.start),
            "y1": scalar_to_json(&self.y.end),
            "fillcolor": self.style.fill_color,
            "opacity": self.style.opacity,
            "line": { "width": self.style.line_width },
            "layer": self.style.layer,
        })
    }
}

fn scalar_to_json(value: &AxisScalar) -> Value {
    match value {
        AxisScalar::Number(v) => json!(v),
        AxisScalar::Date(d) => json!(to_iso_string(d)),
    }
}

/// Highlight rectangles for every truncated bound of a plot.
///
/// Each rectangle spans from the extended bound to the raw bound along the
/// truncated axis and covers the whole plotting area across it. Shapes come
/// out in the order independent-min, independent-max, dependent-min,
/// dependent-max. A bound whose raw or extended range is missing, or whose
/// two ranges hold different value types, gets no shape.
pub fn truncation_shapes(
    orientation: PlotOrientation,
    raw_independent: Option<&AxisRange>,
    raw_dependent: Option<&AxisRange>,
    extended_independent: Option<&AxisRange>,
    extended_dependent: Option<&AxisRange>,
    config: &AxisTruncationConfig,
    style: &HighlightStyle,
) -> Vec<TruncationShape> {
    TruncatedBound::ALL
        .iter()
        .filter(|bound| bound.is_set(config))
        .filter_map(|bound| {
            let (raw, extended) = if bound.is_independent() {
                (raw_independent?, extended_independent?)
            } else {
                (raw_dependent?, extended_dependent?)
            };
            if raw.is_date() != extended.is_date() {
                debug!("skipping {bound:?} highlight: {raw:?} and {extended:?} differ in type");
                return None;
            }

            let (start, end) = if bound.is_min() {
                (extended.min(), raw.min())
            } else {
                (extended.max(), raw.max())
            };
            let data_span = ShapeSpan {
                reference: data_axis(orientation, bound),
                start,
                end,
            };

            let (x, y) = match data_span.reference {
                ShapeRef::X => (data_span, ShapeSpan::paper()),
                _ => (ShapeSpan::paper(), data_span),
            };
            Some(TruncationShape {
                bound: *bound,
                x,
                y,
                style: style.clone(),
            })
        })
        .collect()
}

fn data_axis(orientation: PlotOrientation, bound: &TruncatedBound) -> ShapeRef {
    match (orientation, bound.is_independent()) {
        (PlotOrientation::Vertical, true) | (PlotOrientation::Horizontal, false) => ShapeRef::X,
        (PlotOrientation::Vertical, false) | (PlotOrientation::Horizontal, true) => ShapeRef::Y,
    }
}

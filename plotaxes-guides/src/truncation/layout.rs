use log::debug;
use plotaxes_common::range::AxisRange;
use plotaxes_common::types::{AxisTruncationConfig, PlotOrientation};
use plotaxes_scales::config::ExtensionOptions;
use plotaxes_scales::error::PlotAxesError;
use plotaxes_scales::extend::extend_axis_range;
use plotaxes_scales::truncation::PlotAxisRanges;
use serde::{Deserialize, Serialize};

use super::opts::HighlightStyle;
use super::shapes::{truncation_shapes, TruncationShape};

/// Axis ranges to render with, plus the highlights for truncated bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruncationLayout {
    pub independent_axis_range: Option<AxisRange>,
    pub dependent_axis_range: Option<AxisRange>,
    pub shapes: Vec<TruncationShape>,
}

/// Extends both raw axis ranges and builds the truncation highlights that sit
/// between the raw and extended bounds.
pub fn truncation_layout(
    orientation: PlotOrientation,
    raw: &PlotAxisRanges,
    config: &AxisTruncationConfig,
    independent_options: &ExtensionOptions,
    dependent_options: &ExtensionOptions,
    style: &HighlightStyle,
) -> Result<TruncationLayout, PlotAxesError> {
    let independent_axis_range = extend_axis_range(
        raw.independent_axis_range.as_ref(),
        &config.independent_axis,
        independent_options,
    )?;
    let dependent_axis_range = extend_axis_range(
        raw.dependent_axis_range.as_ref(),
        &config.dependent_axis,
        dependent_options,
    )?;

    let shapes = truncation_shapes(
        orientation,
        raw.independent_axis_range.as_ref(),
        raw.dependent_axis_range.as_ref(),
        independent_axis_range.as_ref(),
        dependent_axis_range.as_ref(),
        config,
        style,
    );
    debug!("{} truncation highlight(s) for {orientation:?} plot", shapes.len());

    Ok(TruncationLayout {
        independent_axis_range,
        dependent_axis_range,
        shapes,
    })
}

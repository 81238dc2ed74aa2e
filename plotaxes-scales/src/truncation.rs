use plotaxes_common::range::AxisRange;
use plotaxes_common::types::{AxisTruncationConfig, BoundTruncation};
use serde::{Deserialize, Serialize};

/// Independent and dependent axis ranges of one plot
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotAxisRanges {
    pub independent_axis_range: Option<AxisRange>,
    pub dependent_axis_range: Option<AxisRange>,
}

impl PlotAxisRanges {
    pub fn new(independent: Option<AxisRange>, dependent: Option<AxisRange>) -> Self {
        Self {
            independent_axis_range: independent,
            dependent_axis_range: dependent,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogScaleAxes {
    pub independent_axis_log_scale: bool,
    pub dependent_axis_log_scale: bool,
}

/// Works out which bounds hide data, by comparing the range requested for
/// display against the full data range of each axis.
pub fn derive_truncation_config(
    data: &PlotAxisRanges,
    requested: &PlotAxisRanges,
    log_scale: &LogScaleAxes,
) -> AxisTruncationConfig {
    AxisTruncationConfig {
        independent_axis: axis_bound_truncation(
            data.independent_axis_range.as_ref(),
            requested.independent_axis_range.as_ref(),
            log_scale.independent_axis_log_scale,
        ),
        dependent_axis: axis_bound_truncation(
            data.dependent_axis_range.as_ref(),
            requested.dependent_axis_range.as_ref(),
            log_scale.dependent_axis_log_scale,
        ),
    }
}

/// Truncation of a single axis.
///
/// A bound is truncated when the requested range cuts into the data range.
/// A log axis cannot show zero or negative values, so numeric data reaching
/// down to zero always truncates the lower bound of a log axis.
pub fn axis_bound_truncation(
    data: Option<&AxisRange>,
    requested: Option<&AxisRange>,
    log_scale: bool,
) -> BoundTruncation {
    let mut truncation = match (data, requested) {
        (Some(data), Some(requested)) => BoundTruncation::new(
            requested.min() > data.min(),
            requested.max() < data.max(),
        ),
        _ => BoundTruncation::default(),
    };

    if log_scale
        && data
            .and_then(AxisRange::as_number)
            .is_some_and(|data| data.min <= 0.0)
    {
        truncation.min = true;
    }
    truncation
}

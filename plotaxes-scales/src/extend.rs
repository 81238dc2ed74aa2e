use log::{debug, trace};
use plotaxes_common::range::{AxisRange, DateRange, NumberRange};
use plotaxes_common::time::TimeDelta;
use plotaxes_common::types::BoundTruncation;

use crate::config::ExtensionOptions;
use crate::error::PlotAxesError;

/// Extends a raw data range into the range used for rendering an axis.
///
/// A truncated bound is pushed outward by the truncation margin so there is
/// room to draw the truncation highlight between the extended and the raw
/// bound. A bound that is not truncated receives cosmetic padding, unless the
/// plot type requires bars to sit flush on it.
///
/// Returns `Ok(None)` when there is no base range to extend, and
/// `Err(PlotAxesError::InvalidRange)` when `min > max`.
pub fn extend_axis_range(
    range: Option<&AxisRange>,
    truncation: &BoundTruncation,
    options: &ExtensionOptions,
) -> Result<Option<AxisRange>, PlotAxesError> {
    let Some(range) = range else {
        return Ok(None);
    };
    range.validate()?;

    let extended = match range {
        AxisRange::Number(range) => {
            AxisRange::Number(extend_number_range(range, truncation, options))
        }
        AxisRange::Date(range) => AxisRange::Date(extend_date_range(range, truncation, options)?),
    };
    trace!("extended {range:?} to {extended:?} ({truncation:?}, {options:?})");
    Ok(Some(extended))
}

/// Numeric extension. Expects an already validated range.
pub fn extend_number_range(
    range: &NumberRange,
    truncation: &BoundTruncation,
    options: &ExtensionOptions,
) -> NumberRange {
    let diff = range.span();
    let (lower, upper) = extension_fractions(truncation, options);

    let mut min = range.min - diff * lower;
    let max = range.max + diff * upper;

    // Padding must not push a positive log axis to zero or below
    if options.log_scale && !truncation.min && range.min > 0.0 && min <= 0.0 {
        debug!("dropping log-scale padding below {} (would reach {min})", range.min);
        min = range.min;
    }

    NumberRange::new(min, max)
}

/// Date extension, computed in whole hours
pub fn extend_date_range(
    range: &DateRange,
    truncation: &BoundTruncation,
    options: &ExtensionOptions,
) -> Result<DateRange, PlotAxesError> {
    let hours = range.span_hours() as f64;
    let (lower, upper) = extension_fractions(truncation, options);

    let min = TimeDelta::hours((hours * lower).round())
        .subtract_from(range.min)
        .ok_or(PlotAxesError::DateOutOfRange("lower axis extension"))?;
    let max = TimeDelta::hours((hours * upper).round())
        .add_to(range.max)
        .ok_or(PlotAxesError::DateOutOfRange("upper axis extension"))?;

    Ok(DateRange::new(min, max))
}

fn extension_fractions(truncation: &BoundTruncation, options: &ExtensionOptions) -> (f64, f64) {
    let lower = if truncation.min {
        options.margins.truncation
    } else {
        options.lower_padding()
    };
    let upper = if truncation.max {
        options.margins.truncation
    } else {
        options.upper_padding()
    };
    (lower, upper)
}

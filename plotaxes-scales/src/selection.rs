use chrono::{DateTime, Utc};
use log::debug;
use plotaxes_common::bin::{BinSummaries, BinSummary};
use plotaxes_common::range::{AxisRange, AxisValue, Interval};
use plotaxes_common::time::TimeDelta;

use crate::error::PlotAxesError;

/// Axis values that a histogram selection can snap to
pub trait BinValue: AxisValue {
    /// Upper bound reported for a selection ending in a bin with this end
    fn selection_end(bin_end: Self) -> Option<Self>;
}

impl BinValue for f64 {
    fn selection_end(bin_end: Self) -> Option<Self> {
        Some(bin_end)
    }
}

impl BinValue for DateTime<Utc> {
    // Date selections are labelled as inclusive day ranges, so the exclusive
    // bin end is pulled back by one day
    fn selection_end(bin_end: Self) -> Option<Self> {
        TimeDelta::days(1.0).subtract_from(bin_end)
    }
}

/// Snaps a raw drag selection to whole bins using the midpoint rule.
///
/// The selection starts at the first bin whose middle lies strictly above
/// `raw.min` and ends at the last bin whose middle lies strictly below
/// `raw.max`. A selection that crosses no bin middle, or whose ends cross
/// over, resolves to `None`.
///
/// Date bins shorter than a day can end up with a selection end before its
/// start once the end is pulled back a day; those also resolve to `None`.
///
/// `summaries` must be ordered by `bin_start`.
pub fn resolve_selection<T: BinValue>(
    raw: &Interval<T>,
    summaries: &[BinSummary<T>],
) -> Option<Interval<T>> {
    let left = summaries.iter().find(|bin| bin.bin_middle > raw.min);
    let right = summaries.iter().rev().find(|bin| bin.bin_middle < raw.max);

    let (left, right) = match (left, right) {
        (Some(left), Some(right)) if left.bin_start <= right.bin_start => (left, right),
        _ => {
            debug!("selection {raw:?} does not span any bin middle");
            return None;
        }
    };

    let end = T::selection_end(right.bin_end)?;
    if end < left.bin_start {
        debug!("selection end {end:?} falls before start {:?}", left.bin_start);
        return None;
    }
    Some(Interval::new(left.bin_start, end))
}

/// [`resolve_selection`] over the numeric/date sum types.
///
/// Fails with `ValueTypeMismatch` when the drag range and the bins are of
/// different value types.
pub fn resolve_axis_selection(
    raw: &AxisRange,
    summaries: &BinSummaries,
) -> Result<Option<AxisRange>, PlotAxesError> {
    match (raw, summaries) {
        (AxisRange::Number(raw), BinSummaries::Number(summaries)) => {
            Ok(resolve_selection(raw, summaries).map(AxisRange::Number))
        }
        (AxisRange::Date(raw), BinSummaries::Date(summaries)) => {
            Ok(resolve_selection(raw, summaries).map(AxisRange::Date))
        }
        // No bins means nothing is selectable, whatever the drag range holds
        _ if summaries.is_empty() => Ok(None),
        (AxisRange::Number(_), BinSummaries::Date(_)) => Err(PlotAxesError::ValueTypeMismatch {
            expected: "date",
            actual: "number",
        }),
        (AxisRange::Date(_), BinSummaries::Number(_)) => Err(PlotAxesError::ValueTypeMismatch {
            expected: "number",
            actual: "date",
        }),
    }
}

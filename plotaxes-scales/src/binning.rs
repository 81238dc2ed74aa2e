//! Client-side binning of a value distribution into histogram bins.
//!
//! Bins are left-inclusive and right-exclusive, e.g. `[1, 3)`. Binning maps
//! each value to the start of the bin it falls into; bins are aligned so that
//! `bin_start` is a bin boundary.

use std::collections::BTreeMap;

use log::debug;
use ordered_float::OrderedFloat;
use plotaxes_common::bin::Bin;
use plotaxes_common::range::NumberRange;
use serde::{Deserialize, Serialize};

use crate::error::PlotAxesError;

/// Count of records holding one distinct value. `filtered_count` is the part
/// of `count` still matching the active filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionEntry {
    pub value: f64,
    pub count: f64,
    #[serde(default)]
    pub filtered_count: f64,
}

impl DistributionEntry {
    pub fn new(value: f64, count: f64, filtered_count: f64) -> Self {
        Self {
            value,
            count,
            filtered_count,
        }
    }
}

pub fn validate_bin_size(bin_size: f64) -> Result<(), PlotAxesError> {
    if bin_size.is_finite() && bin_size > 0.0 {
        Ok(())
    } else {
        Err(PlotAxesError::InvalidBinSize(bin_size))
    }
}

/// Start of the bin holding `value`, or `None` for values below `bin_start`.
/// `bin_size` must be positive.
pub fn assign_bin(bin_size: f64, bin_start: f64, value: f64) -> Option<f64> {
    if value < bin_start {
        return None;
    }
    let shift = bin_start % bin_size;
    let multiplier = ((value - shift) / bin_size).floor();
    Some(bin_size * multiplier + shift)
}

/// Sums counts per bin. Entries below `bin_start` are dropped. The result is
/// ordered by bin start, with each entry's `value` holding its bin start.
pub fn binned_distribution(
    bin_size: f64,
    bin_start: f64,
    entries: &[DistributionEntry],
) -> Result<Vec<DistributionEntry>, PlotAxesError> {
    validate_bin_size(bin_size)?;

    let mut bins: BTreeMap<OrderedFloat<f64>, (f64, f64)> = BTreeMap::new();
    for entry in entries {
        let Some(bin) = assign_bin(bin_size, bin_start, entry.value) else {
            continue;
        };
        let totals = bins.entry(OrderedFloat(bin)).or_insert((0.0, 0.0));
        totals.0 += entry.count;
        totals.1 += entry.filtered_count;
    }

    Ok(bins
        .into_iter()
        .map(|(bin, (count, filtered_count))| {
            DistributionEntry::new(bin.into_inner(), count, filtered_count)
        })
        .collect())
}

pub fn distribution_range(entries: &[DistributionEntry]) -> Option<NumberRange> {
    NumberRange::from_values(entries.iter().map(|e| e.value))
}

/// Independent axis extent of a histogram built from `entries`.
///
/// The axis includes zero, and a single-valued distribution sitting at the
/// lower bound gets a one unit wide axis.
pub fn histogram_axis_extent(entries: &[DistributionEntry]) -> Option<NumberRange> {
    let range = distribution_range(entries)?;
    let min = range.min.min(0.0);
    let max = if range.max == min { min + 1.0 } else { range.max };
    Some(NumberRange::new(min, max))
}

/// Default bin size from Sturges' rule, with 1% of the value span added so
/// the largest value does not land on the upper edge of the last bin.
///
/// Integer-valued distributions get whole-number bin sizes. Returns `None`
/// for an empty distribution or when no positive size can be derived.
pub fn default_bin_size(entries: &[DistributionEntry]) -> Option<f64> {
    let range = distribution_range(entries)?;
    let span = range.span();
    let padding = span / 100.0;
    let total: f64 = entries.iter().map(|e| e.count).sum();
    let num_bins = total.log2().ceil() + 1.0;

    let mut bin_size = (padding + span) / num_bins;
    if !(bin_size.is_finite() && bin_size > 0.0) {
        bin_size = (range.max - range.min.min(0.0)) / 10.0;
        debug!("Sturges' rule gave no usable bin size, falling back to {bin_size}");
    }

    if entries.iter().all(|e| e.value.fract() == 0.0) {
        bin_size = bin_size.ceil();
    }
    (bin_size.is_finite() && bin_size > 0.0).then_some(bin_size)
}

/// Highest count, or the second highest when `truncate` is set and the
/// highest is at least twice as large (treated as an outlier).
pub fn outlier_capped_max(counts: &[f64], truncate: bool) -> Option<f64> {
    let mut sorted: Vec<f64> = counts.iter().copied().filter(|c| !c.is_nan()).collect();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let max = *sorted.first()?;
    match sorted.get(1) {
        Some(next) if truncate && max >= next * 2.0 => Some(*next),
        _ => Some(max),
    }
}

/// Turns a binned distribution into histogram bins of width `bin_size`
pub fn to_bins(binned: &[DistributionEntry], bin_size: f64) -> Result<Vec<Bin<f64>>, PlotAxesError> {
    validate_bin_size(bin_size)?;
    Ok(binned
        .iter()
        .map(|entry| {
            let start = entry.value;
            let end = start + bin_size;
            Bin::new(start, end, format!("{start} - {end}"), entry.count)
        })
        .collect())
}

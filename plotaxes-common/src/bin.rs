use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::range::{axis_value_serde, AxisValue};

/// One histogram bar, as produced by the aggregation step upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(serialize = "T: AxisValue", deserialize = "T: AxisValue")
)]
pub struct Bin<T> {
    #[serde(with = "axis_value_serde")]
    pub bin_start: T,
    #[serde(with = "axis_value_serde")]
    pub bin_end: T,
    pub bin_label: String,
    pub value: f64,
}

pub type NumberBin = Bin<f64>;
pub type DateBin = Bin<DateTime<Utc>>;

impl<T: AxisValue> Bin<T> {
    pub fn new(bin_start: T, bin_end: T, bin_label: impl Into<String>, value: f64) -> Self {
        Self {
            bin_start,
            bin_end,
            bin_label: bin_label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: AxisValue", deserialize = "T: AxisValue"))]
pub struct HistogramSeries<T> {
    pub name: String,
    pub bins: Vec<Bin<T>>,
}

impl<T> HistogramSeries<T> {
    pub fn new(name: impl Into<String>, bins: Vec<Bin<T>>) -> Self {
        Self {
            name: name.into(),
            bins,
        }
    }
}

/// Bin boundaries plus the midpoint used for snapping drag selections
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(serialize = "T: AxisValue", deserialize = "T: AxisValue")
)]
pub struct BinSummary<T> {
    #[serde(with = "axis_value_serde")]
    pub bin_start: T,
    #[serde(with = "axis_value_serde")]
    pub bin_end: T,
    #[serde(with = "axis_value_serde")]
    pub bin_middle: T,
}

impl<T: AxisValue> BinSummary<T> {
    pub fn new(bin_start: T, bin_end: T) -> Self {
        Self {
            bin_start,
            bin_end,
            bin_middle: T::midpoint(bin_start, bin_end),
        }
    }
}

/// Summaries of every distinct bin across all series, ordered by `bin_start`.
///
/// Overlaid series usually share their bins; the first bin seen for a given
/// start wins.
pub fn summarize_bins<'a, T, I>(series: I) -> Vec<BinSummary<T>>
where
    T: AxisValue + 'a,
    I: IntoIterator<Item = &'a HistogramSeries<T>>,
{
    let mut summaries: Vec<BinSummary<T>> = series
        .into_iter()
        .flat_map(|s| s.bins.iter())
        .map(|bin| BinSummary::new(bin.bin_start, bin.bin_end))
        .collect();

    summaries.sort_by(|a, b| {
        a.bin_start
            .partial_cmp(&b.bin_start)
            .unwrap_or(Ordering::Equal)
    });
    summaries.dedup_by(|later, earlier| later.bin_start == earlier.bin_start);
    summaries
}

/// Bin summaries for either axis value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinSummaries {
    Number(Vec<BinSummary<f64>>),
    Date(Vec<BinSummary<DateTime<Utc>>>),
}

impl BinSummaries {
    pub fn len(&self) -> usize {
        match self {
            BinSummaries::Number(s) => s.len(),
            BinSummaries::Date(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<BinSummary<f64>>> for BinSummaries {
    fn from(value: Vec<BinSummary<f64>>) -> Self {
        BinSummaries::Number(value)
    }
}

impl From<Vec<BinSummary<DateTime<Utc>>>> for BinSummaries {
    fn from(value: Vec<BinSummary<DateTime<Utc>>>) -> Self {
        BinSummaries::Date(value)
    }
}

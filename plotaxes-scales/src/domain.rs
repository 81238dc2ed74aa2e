//! Default axis ranges derived from plot data.
//!
//! These give the "full data" ranges that requested display ranges are
//! compared against when deciding which bounds are truncated.

use std::collections::HashMap;

use chrono::{DateTime, NaiveTime, Utc};
use itertools::Itertools;
use log::debug;
use plotaxes_common::bin::HistogramSeries;
use plotaxes_common::range::{
    axis_value_serde, AxisRange, AxisValue, DateRange, Interval, NumberRange,
};
use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

use crate::error::PlotAxesError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarplotSeries {
    pub name: String,
    pub label: Vec<String>,
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxplotSeries {
    pub name: String,
    pub lowerfence: Vec<f64>,
    pub upperfence: Vec<f64>,
    pub outliers: Vec<Vec<f64>>,
}

/// Combines the ranges of several facets, skipping facets without data
pub fn facet_union<T: AxisValue>(
    ranges: impl IntoIterator<Item = Option<Interval<T>>>,
) -> Option<Interval<T>> {
    ranges.into_iter().fold(None, Interval::union)
}

/// From the first bin start to the last bin end across all series
pub fn histogram_independent_range<T: AxisValue>(
    series: &[HistogramSeries<T>],
) -> Option<Interval<T>> {
    let bins = || series.iter().flat_map(|s| s.bins.iter());
    let starts = Interval::from_values(bins().map(|bin| bin.bin_start))?;
    let ends = Interval::from_values(bins().map(|bin| bin.bin_end))?;
    Some(Interval::new(starts.min, ends.max))
}

/// Count range of possibly stacked histogram series.
///
/// Overlaid series are drawn stacked, so the maximum is the largest per-label
/// sum. The minimum is the smallest positive count among the first series
/// holding each label, which is what a log axis needs as its lower bound;
/// it is zero when no such count is positive.
pub fn histogram_dependent_range<T: AxisValue>(
    series: &[HistogramSeries<T>],
) -> Option<NumberRange> {
    let bins = || series.iter().flat_map(|s| s.bins.iter());

    let mut sums: HashMap<&str, f64> = HashMap::new();
    for bin in bins() {
        *sums.entry(bin.bin_label.as_str()).or_insert(0.0) += bin.value;
    }
    let max = Interval::from_values(sums.into_values())?.max;

    let min_pos = Interval::from_values(
        bins()
            .map(|bin| (bin.bin_label.as_str(), bin.value))
            .unique_by(|(label, _)| *label)
            .map(|(_, value)| value)
            .filter(|value| *value > 0.0),
    )
    .map(|r| r.min)
    .unwrap_or(0.0);

    Some(NumberRange::new(min_pos, max))
}

pub fn barplot_dependent_max(series: &[BarplotSeries]) -> Option<f64> {
    Interval::from_values(series.iter().flat_map(|s| s.value.iter().copied())).map(|r| r.max)
}

/// Smallest positive bar value, used as the lower bound on log axes
pub fn barplot_dependent_min_pos(series: &[BarplotSeries]) -> Option<f64> {
    Interval::from_values(
        series
            .iter()
            .flat_map(|s| s.value.iter().copied())
            .filter(|value| *value > 0.0),
    )
    .map(|r| r.min)
}

/// Range covering every fence and outlier, widened to the variable's
/// display range when one is annotated
pub fn boxplot_dependent_range(
    series: &[BoxplotSeries],
    display_range: Option<&NumberRange>,
) -> Option<NumberRange> {
    let outliers = series
        .iter()
        .flat_map(|s| s.outliers.iter().flatten().copied());
    let lower = series.iter().flat_map(|s| s.lowerfence.iter().copied());
    let upper = series.iter().flat_map(|s| s.upperfence.iter().copied());

    let data = Interval::from_values(outliers.chain(lower).chain(upper));
    Interval::union(data, display_range.copied())
}

/// Zips scatter coordinates, refusing arrays of different lengths
pub fn paired_points(x: &[f64], y: &[f64]) -> Result<Vec<(f64, f64)>, PlotAxesError> {
    if x.len() != y.len() {
        return Err(PlotAxesError::ValidationError(format!(
            "x and y arrays must have the same length (got {} and {})",
            x.len(),
            y.len()
        )));
    }
    Ok(x.iter().copied().zip(y.iter().copied()).collect())
}

/// Independent and dependent data ranges of a scatter series
pub fn scatter_ranges(
    x: &[f64],
    y: &[f64],
) -> Result<(Option<NumberRange>, Option<NumberRange>), PlotAxesError> {
    let points = paired_points(x, y)?;
    Ok((
        Interval::from_values(points.iter().map(|p| p.0)),
        Interval::from_values(points.iter().map(|p| p.1)),
    ))
}

/// Above this many bins, a degenerate variable gets a lower bound one bin
/// below its single value instead of zero
pub const MAX_EDGE_CASE_BINS: f64 = 2000.0;

/// How the default range of an axis is chosen
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AxisRangeSpec {
    /// Whole range of the variable, including its annotated display range
    #[default]
    Full,
    /// Only the observed data
    AutoZoom,
    Custom,
}

/// Range annotations carried by a variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(serialize = "T: AxisValue", deserialize = "T: AxisValue")
)]
pub struct DistributionDefaults<T> {
    #[serde(default, with = "option_axis_value")]
    pub display_range_min: Option<T>,
    #[serde(default, with = "option_axis_value")]
    pub display_range_max: Option<T>,
    #[serde(with = "axis_value_serde")]
    pub range_min: T,
    #[serde(with = "axis_value_serde")]
    pub range_max: T,
    #[serde(default)]
    pub bin_width: Option<f64>,
}

impl<T: AxisValue> DistributionDefaults<T> {
    pub fn new(range_min: T, range_max: T) -> Self {
        Self {
            display_range_min: None,
            display_range_max: None,
            range_min,
            range_max,
            bin_width: None,
        }
    }

    pub fn with_display_range(mut self, min: T, max: T) -> Self {
        self.display_range_min = Some(min);
        self.display_range_max = Some(max);
        self
    }

    pub fn with_bin_width(mut self, bin_width: f64) -> Self {
        self.bin_width = Some(bin_width);
        self
    }
}

/// Extremes seen in the data actually returned for a plot. `min_pos` is the
/// smallest positive value and only matters for numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedExtent<T> {
    pub min: Option<T>,
    pub min_pos: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for ObservedExtent<T> {
    fn default() -> Self {
        Self {
            min: None,
            min_pos: None,
            max: None,
        }
    }
}

impl<T: AxisValue> ObservedExtent<T> {
    pub fn new(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            min_pos: None,
            max: Some(max),
        }
    }

    pub fn with_min_pos(mut self, min_pos: T) -> Self {
        self.min_pos = Some(min_pos);
        self
    }
}

/// Variable defaults and observed data of one axis, numeric or date
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisDataSummary {
    Number {
        defaults: DistributionDefaults<f64>,
        observed: ObservedExtent<f64>,
    },
    Date {
        defaults: DistributionDefaults<DateTime<Utc>>,
        observed: ObservedExtent<DateTime<Utc>>,
    },
}

/// Raw axis range used before any user-requested range is applied.
///
/// Returns `None` when no range can be drawn, e.g. a log axis without any
/// positive data.
pub fn default_axis_range(
    summary: &AxisDataSummary,
    log_scale: bool,
    spec: AxisRangeSpec,
) -> Option<AxisRange> {
    match summary {
        AxisDataSummary::Number { defaults, observed } => {
            number_default_axis_range(defaults, observed, log_scale, spec).map(AxisRange::Number)
        }
        AxisDataSummary::Date { defaults, observed } => {
            Some(AxisRange::Date(date_default_axis_range(defaults, observed, spec)))
        }
    }
}

/// Numeric default range.
///
/// With [`AxisRangeSpec::Full`] the range starts at [`safe_lower_bound`] and
/// ends at the largest of the display, variable and observed maxima. A log
/// axis whose data or annotations reach zero starts at the smallest positive
/// observed value instead. Other specs use the observed data only.
pub fn number_default_axis_range(
    defaults: &DistributionDefaults<f64>,
    observed: &ObservedExtent<f64>,
    log_scale: bool,
    spec: AxisRangeSpec,
) -> Option<NumberRange> {
    if log_scale && observed.min_pos.is_none() {
        debug!("log axis without positive data has no default range");
        return None;
    }

    match spec {
        AxisRangeSpec::Full => {
            let reaches_zero = observed.min.is_some_and(|min| {
                min <= 0.0
                    || defaults.display_range_min.is_some_and(|d| d <= 0.0)
                    || defaults.range_min <= 0.0
            });
            let min = match observed.min_pos {
                Some(min_pos) if log_scale && reaches_zero => min_pos,
                _ => safe_lower_bound(defaults, observed.min),
            };
            let max = Interval::from_values(
                [defaults.display_range_max, Some(defaults.range_max), observed.max]
                    .into_iter()
                    .flatten(),
            )?
            .max;
            Some(NumberRange::new(min, max))
        }
        AxisRangeSpec::AutoZoom | AxisRangeSpec::Custom => {
            let min = if log_scale { observed.min_pos } else { observed.min };
            Some(NumberRange::new(min?, observed.max?))
        }
    }
}

/// Lower bound of a full numeric range.
///
/// Histograms start at zero unless the variable says otherwise, so this is
/// the smallest of `display_range_min` (zero when unset), `range_min` and the
/// observed minimum. A variable with a single value far from zero would need
/// too many bins to reach zero; it starts one bin below its value instead.
pub fn safe_lower_bound(defaults: &DistributionDefaults<f64>, observed_min: Option<f64>) -> f64 {
    let bin_width = defaults.bin_width.unwrap_or(1.0);
    let lower = match defaults.display_range_min {
        Some(display_min) => display_min,
        None if defaults.range_min == defaults.range_max
            && defaults.range_max / bin_width > MAX_EDGE_CASE_BINS =>
        {
            defaults.range_min - bin_width
        }
        None => 0.0,
    };
    [Some(defaults.range_min), observed_min]
        .into_iter()
        .flatten()
        .fold(lower, f64::min)
}

/// Date default range, snapped to midnight UTC.
///
/// With [`AxisRangeSpec::Full`] the range covers the variable range, the
/// observed data and, when both of its ends are annotated, the display range.
/// Other specs use the observed data, falling back to the variable range.
pub fn date_default_axis_range(
    defaults: &DistributionDefaults<DateTime<Utc>>,
    observed: &ObservedExtent<DateTime<Utc>>,
    spec: AxisRangeSpec,
) -> DateRange {
    let (min, max) = match spec {
        AxisRangeSpec::Full => {
            let display = defaults.display_range_min.zip(defaults.display_range_max);
            let min = [display.map(|d| d.0), observed.min]
                .into_iter()
                .flatten()
                .fold(defaults.range_min, |a, b| a.min(b));
            let max = [display.map(|d| d.1), observed.max]
                .into_iter()
                .flatten()
                .fold(defaults.range_max, |a, b| a.max(b));
            (min, max)
        }
        AxisRangeSpec::AutoZoom | AxisRangeSpec::Custom => (
            observed.min.unwrap_or(defaults.range_min),
            observed.max.unwrap_or(defaults.range_max),
        ),
    };
    DateRange::new(start_of_day(min), start_of_day(max))
}

fn start_of_day(value: DateTime<Utc>) -> DateTime<Utc> {
    value.date_naive().and_time(NaiveTime::MIN).and_utc()
}

mod option_axis_value {
    use plotaxes_common::range::AxisValue;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T: AxisValue, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => value.serialize_value(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T: AxisValue, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error> {
        #[derive(Deserialize)]
        #[serde(bound = "T: AxisValue")]
        struct Wrapper<T>(#[serde(with = "plotaxes_common::range::axis_value_serde")] T);

        Ok(Option::<Wrapper<T>>::deserialize(deserializer)?.map(|w| w.0))
    }
}

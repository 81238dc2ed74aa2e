use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AxisValueError;

/// A value that can sit on a continuous plot axis.
///
/// Implemented for plain numbers and for UTC timestamps so the range, bin and
/// selection logic can be written once and shared by numeric and date axes.
pub trait AxisValue: Copy + PartialOrd + Debug + Send + Sync {
    /// Midpoint between two values on the axis
    fn midpoint(start: Self, end: Self) -> Self;

    /// Feed the value into a hasher, treating floats by their bit pattern
    fn hash_value<H: Hasher>(&self, state: &mut H);

    /// Wrap the value as a loosely typed axis coordinate
    fn to_scalar(self) -> AxisScalar;

    /// Wire form of the value: a JSON number, or an ISO string for dates
    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;

    fn deserialize_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>;

    /// Whether the value can take part in comparisons at all
    fn is_comparable(&self) -> bool {
        true
    }
}

impl AxisValue for f64 {
    fn midpoint(start: Self, end: Self) -> Self {
        (start + end) / 2.0
    }

    fn hash_value<H: Hasher>(&self, state: &mut H) {
        OrderedFloat::from(*self).hash(state)
    }

    fn to_scalar(self) -> AxisScalar {
        AxisScalar::Number(self)
    }

    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*self)
    }

    fn deserialize_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer)
    }

    fn is_comparable(&self) -> bool {
        !self.is_nan()
    }
}

impl AxisValue for DateTime<Utc> {
    fn midpoint(start: Self, end: Self) -> Self {
        start + (end - start) / 2
    }

    fn hash_value<H: Hasher>(&self, state: &mut H) {
        self.hash(state)
    }

    fn to_scalar(self) -> AxisScalar {
        AxisScalar::Date(self)
    }

    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_iso_string(self))
    }

    // Accepts bare `YYYY-MM-DD` dates as well as full date-times
    fn deserialize_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_iso_date(&value).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for fields holding an [`AxisValue`], for use with
/// `#[serde(with = "axis_value_serde")]`
pub mod axis_value_serde {
    use serde::{Deserializer, Serializer};

    use super::AxisValue;

    pub fn serialize<T: AxisValue, S: Serializer>(
        value: &T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize_value(serializer)
    }

    pub fn deserialize<'de, T: AxisValue, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<T, D::Error> {
        T::deserialize_value(deserializer)
    }
}

/// A closed interval `[min, max]` on an axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: AxisValue", deserialize = "T: AxisValue"))]
pub struct Interval<T> {
    #[serde(with = "axis_value_serde")]
    pub min: T,
    #[serde(with = "axis_value_serde")]
    pub max: T,
}

pub type NumberRange = Interval<f64>;
pub type DateRange = Interval<DateTime<Utc>>;

impl<T: AxisValue> Interval<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Check the `min <= max` precondition shared by every range operation
    pub fn validate(&self) -> Result<(), AxisValueError> {
        if !self.min.is_comparable() || !self.max.is_comparable() {
            return Err(AxisValueError::NanBound);
        }
        if self.min > self.max {
            return Err(AxisValueError::InvalidRange {
                min: format!("{:?}", self.min),
                max: format!("{:?}", self.max),
            });
        }
        Ok(())
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Smallest interval covering both inputs. Missing inputs are skipped.
    pub fn union(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => Some(Self {
                min: if b.min < a.min { b.min } else { a.min },
                max: if b.max > a.max { b.max } else { a.max },
            }),
        }
    }

    /// Bounding interval of an iterator of values, `None` when it is empty
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_comparable())
            .fold(None, |acc, v| Self::union(acc, Some(Self::new(v, v))))
    }
}

impl<T: AxisValue> Hash for Interval<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.min.hash_value(state);
        self.max.hash_value(state);
    }
}

impl NumberRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl DateRange {
    /// Parse a date range from ISO-8601 strings.
    ///
    /// Accepts full RFC 3339 date-times as well as bare `YYYY-MM-DD` dates,
    /// which are taken as midnight UTC.
    pub fn parse(min: &str, max: &str) -> Result<Self, AxisValueError> {
        Ok(Self {
            min: parse_iso_date(min)?,
            max: parse_iso_date(max)?,
        })
    }

    /// Whole hours between the bounds, truncated toward zero
    pub fn span_hours(&self) -> i64 {
        (self.max - self.min).num_hours()
    }
}

pub fn parse_iso_date(value: &str) -> Result<DateTime<Utc>, AxisValueError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AxisValueError::InvalidDate(value.to_string()))
}

/// Format a timestamp the way browsers print `Date.toISOString()`
pub fn to_iso_string(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Numeric or date range. The variant carries the value type, so date
/// arithmetic can never be applied to a numeric range or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisRange {
    Number(NumberRange),
    Date(DateRange),
}

impl AxisRange {
    pub fn number(min: f64, max: f64) -> Self {
        AxisRange::Number(Interval::new(min, max))
    }

    pub fn date(min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
        AxisRange::Date(Interval::new(min, max))
    }

    pub fn parse_date(min: &str, max: &str) -> Result<Self, AxisValueError> {
        Ok(AxisRange::Date(DateRange::parse(min, max)?))
    }

    pub fn validate(&self) -> Result<(), AxisValueError> {
        match self {
            AxisRange::Number(r) => r.validate(),
            AxisRange::Date(r) => r.validate(),
        }
    }

    pub fn min(&self) -> AxisScalar {
        match self {
            AxisRange::Number(r) => AxisScalar::Number(r.min),
            AxisRange::Date(r) => AxisScalar::Date(r.min),
        }
    }

    pub fn max(&self) -> AxisScalar {
        match self {
            AxisRange::Number(r) => AxisScalar::Number(r.max),
            AxisRange::Date(r) => AxisScalar::Date(r.max),
        }
    }

    pub fn as_number(&self) -> Option<&NumberRange> {
        match self {
            AxisRange::Number(r) => Some(r),
            AxisRange::Date(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateRange> {
        match self {
            AxisRange::Date(r) => Some(r),
            AxisRange::Number(_) => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, AxisRange::Date(_))
    }
}

impl From<NumberRange> for AxisRange {
    fn from(value: NumberRange) -> Self {
        AxisRange::Number(value)
    }
}

impl From<DateRange> for AxisRange {
    fn from(value: DateRange) -> Self {
        AxisRange::Date(value)
    }
}

/// A single coordinate on a numeric or date axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisScalar {
    Number(f64),
    Date(#[serde(with = "axis_value_serde")] DateTime<Utc>),
}

impl AxisScalar {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AxisScalar::Number(v) => Some(*v),
            AxisScalar::Date(_) => None,
        }
    }
}

// Numbers and dates are not ordered relative to each other
impl PartialOrd for AxisScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (AxisScalar::Number(a), AxisScalar::Number(b)) => a.partial_cmp(b),
            (AxisScalar::Date(a), AxisScalar::Date(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_validate() {
        assert!(NumberRange::new(0.0, 1.0).validate().is_ok());
        assert!(NumberRange::new(1.0, 1.0).validate().is_ok());
        assert!(matches!(
            NumberRange::new(2.0, 1.0).validate(),
            Err(AxisValueError::InvalidRange { .. })
        ));
        assert_eq!(
            NumberRange::new(f64::NAN, 1.0).validate(),
            Err(AxisValueError::NanBound)
        );
    }

    #[test]
    fn test_union_and_from_values() {
        let a = Some(NumberRange::new(0.0, 2.0));
        let b = Some(NumberRange::new(-1.0, 1.0));
        assert_eq!(
            NumberRange::union(a, b),
            Some(NumberRange::new(-1.0, 2.0))
        );
        assert_eq!(NumberRange::union(None, b), b);
        assert_eq!(NumberRange::union(None, None), None);

        let r = NumberRange::from_values([3.0, f64::NAN, -2.0, 7.5]).unwrap();
        assert_approx_eq!(f64, r.min, -2.0);
        assert_approx_eq!(f64, r.max, 7.5);
        assert_eq!(NumberRange::from_values(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_parse_dates() {
        let r = DateRange::parse("2020-01-01", "2020-01-08T00:00:00.000Z").unwrap();
        assert_eq!(r.min, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(r.span_hours(), 168);
        assert_eq!(to_iso_string(&r.max), "2020-01-08T00:00:00.000Z");

        assert!(matches!(
            DateRange::parse("yesterday", "2020-01-01"),
            Err(AxisValueError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_date_midpoint() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(
            DateTime::<Utc>::midpoint(start, end),
            Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_axis_range_serde() {
        let number: AxisRange = serde_json::from_str(r#"{"min": 0, "max": 100}"#).unwrap();
        assert_eq!(number, AxisRange::number(0.0, 100.0));

        let date: AxisRange = serde_json::from_str(
            r#"{"min": "2020-01-01T00:00:00Z", "max": "2020-01-08T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(date.is_date());
    }

    #[test]
    fn test_date_range_accepts_bare_dates() {
        let range: AxisRange =
            serde_json::from_str(r#"{"min": "2020-01-01", "max": "2020-01-08"}"#).unwrap();
        assert_eq!(
            range,
            AxisRange::date(
                Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2020, 1, 8, 0, 0, 0).unwrap(),
            )
        );

        let bad = serde_json::from_str::<AxisRange>(r#"{"min": "soon", "max": "2020-01-08"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_dates_serialize_with_milliseconds() {
        let range = AxisRange::parse_date("2020-01-01", "2020-01-08T08:00:00.000Z").unwrap();
        assert_eq!(
            serde_json::to_string(&range).unwrap(),
            r#"{"min":"2020-01-01T00:00:00.000Z","max":"2020-01-08T08:00:00.000Z"}"#
        );
        let back: AxisRange = serde_json::from_str(&serde_json::to_string(&range).unwrap()).unwrap();
        assert_eq!(back, range);

        let scalar = AxisScalar::Date(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap());
        assert_eq!(
            serde_json::to_string(&scalar).unwrap(),
            r#""2021-03-04T05:06:07.000Z""#
        );
        assert_eq!(serde_json::to_string(&AxisScalar::Number(2.5)).unwrap(), "2.5");
    }

    #[test]
    fn test_scalar_ordering() {
        let n = AxisScalar::Number(1.0);
        let d = AxisScalar::Date(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert!(AxisScalar::Number(0.5) < n);
        assert_eq!(n.partial_cmp(&d), None);
        assert!(!(n < d) && !(n > d));
    }
}

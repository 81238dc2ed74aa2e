use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

use crate::error::AxisValueError;

#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn parse(unit: &str) -> Result<Self, AxisValueError> {
        let trimmed = unit.trim().to_ascii_lowercase();
        // Accept the plural forms used in bin width labels ("days", "months")
        let singular = trimmed.strip_suffix('s').unwrap_or(&trimmed);
        singular
            .parse::<TimeUnit>()
            .map_err(|_| AxisValueError::UnknownTimeUnit(unit.to_string()))
    }
}

/// A duration with an explicit calendar unit, e.g. a histogram bin width of
/// `1 month` on a date axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDelta {
    pub value: f64,
    pub unit: TimeUnit,
}

impl TimeDelta {
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub fn days(value: f64) -> Self {
        Self::new(value, TimeUnit::Day)
    }

    pub fn hours(value: f64) -> Self {
        Self::new(value, TimeUnit::Hour)
    }

    /// Shift a timestamp forward by this delta.
    ///
    /// Months and years use calendar arithmetic and only whole steps; the
    /// fractional part of the value is dropped for them. Fixed-length units
    /// are applied at millisecond resolution.
    pub fn add_to(&self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.shift(date, 1)
    }

    /// Shift a timestamp backward by this delta
    pub fn subtract_from(&self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.shift(date, -1)
    }

    fn shift(&self, date: DateTime<Utc>, sign: i64) -> Option<DateTime<Utc>> {
        let millis_per_unit: f64 = match self.unit {
            TimeUnit::Millisecond => 1.0,
            TimeUnit::Second => 1_000.0,
            TimeUnit::Minute => 60_000.0,
            TimeUnit::Hour => 3_600_000.0,
            TimeUnit::Day => 86_400_000.0,
            TimeUnit::Week => 604_800_000.0,
            TimeUnit::Month => return shift_months(date, self.value.trunc() as i64 * sign),
            TimeUnit::Year => return shift_months(date, self.value.trunc() as i64 * 12 * sign),
        };
        let millis = (self.value * millis_per_unit).round() as i64 * sign;
        date.checked_add_signed(Duration::milliseconds(millis))
    }
}

fn shift_months(date: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let count = Months::new(months.unsigned_abs().try_into().ok()?);
    if months >= 0 {
        date.checked_add_months(count)
    } else {
        date.checked_sub_months(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_units() {
        assert_eq!(TimeUnit::parse("day").unwrap(), TimeUnit::Day);
        assert_eq!(TimeUnit::parse("Months").unwrap(), TimeUnit::Month);
        assert_eq!(TimeUnit::parse(" hour ").unwrap(), TimeUnit::Hour);
        assert!(matches!(
            TimeUnit::parse("fortnight"),
            Err(AxisValueError::UnknownTimeUnit(_))
        ));
    }

    #[test]
    fn test_fixed_length_units() {
        let date = Utc.with_ymd_and_hms(2020, 1, 8, 0, 0, 0).unwrap();
        assert_eq!(
            TimeDelta::hours(8.0).add_to(date),
            Some(Utc.with_ymd_and_hms(2020, 1, 8, 8, 0, 0).unwrap())
        );
        assert_eq!(
            TimeDelta::days(1.0).subtract_from(date),
            Some(Utc.with_ymd_and_hms(2020, 1, 7, 0, 0, 0).unwrap())
        );
        assert_eq!(
            TimeDelta::days(0.5).add_to(date),
            Some(Utc.with_ymd_and_hms(2020, 1, 8, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_calendar_units() {
        let date = Utc.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).unwrap();
        // Clamped to the end of February in a leap year
        assert_eq!(
            TimeDelta::new(1.0, TimeUnit::Month).add_to(date),
            Some(Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap())
        );
        assert_eq!(
            TimeDelta::new(1.0, TimeUnit::Year).subtract_from(date),
            Some(Utc.with_ymd_and_hms(2019, 1, 31, 0, 0, 0).unwrap())
        );
    }
}

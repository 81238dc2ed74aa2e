use plotaxes_common::range::NumberRange;

/// Tick spacing exponent used when nothing better can be computed
pub const DEFAULT_LOG_DTICK: f64 = 1.0;

/// Tick spacing for a log-scaled axis, as a power-of-ten exponent: a result
/// of `v` puts ticks every `10^v` units.
///
/// Ranges spanning less than a decade would show no ticks at all with whole
/// decades, so they fall back to `log10(2)` (ratio at least 2) or
/// `log10(1.1)`. These fractional spacings give odd tick values for very
/// narrow ranges, but the ticks stay visible.
///
/// Missing ranges and non-positive minimums get [`DEFAULT_LOG_DTICK`].
pub fn log_dtick(range: Option<&NumberRange>) -> f64 {
    let Some(range) = range else {
        return DEFAULT_LOG_DTICK;
    };
    if range.min.is_nan() || range.min <= 0.0 || range.max.is_nan() {
        return DEFAULT_LOG_DTICK;
    }

    let ratio = range.max / range.min;
    if ratio < 10.0 {
        if ratio >= 2.0 {
            2f64.log10()
        } else {
            1.1f64.log10()
        }
    } else {
        DEFAULT_LOG_DTICK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_sub_decade_fallbacks() {
        let narrow = NumberRange::new(5.0, 8.0);
        assert_approx_eq!(f64, log_dtick(Some(&narrow)), 1.1f64.log10());

        let medium = NumberRange::new(5.0, 40.0);
        assert_approx_eq!(f64, log_dtick(Some(&medium)), 2f64.log10());

        let exactly_double = NumberRange::new(3.0, 6.0);
        assert_approx_eq!(f64, log_dtick(Some(&exactly_double)), 2f64.log10());
    }

    #[test]
    fn test_full_decades() {
        assert_approx_eq!(f64, log_dtick(Some(&NumberRange::new(1.0, 100.0))), 1.0);
        assert_approx_eq!(f64, log_dtick(Some(&NumberRange::new(1.0, 10.0))), 1.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_approx_eq!(f64, log_dtick(None), 1.0);
        assert_approx_eq!(f64, log_dtick(Some(&NumberRange::new(0.0, 10.0))), 1.0);
        assert_approx_eq!(f64, log_dtick(Some(&NumberRange::new(-5.0, 10.0))), 1.0);
        assert_approx_eq!(f64, log_dtick(Some(&NumberRange::new(f64::NAN, 10.0))), 1.0);
        assert_approx_eq!(f64, log_dtick(Some(&NumberRange::new(1.0, f64::NAN))), 1.0);
    }
}

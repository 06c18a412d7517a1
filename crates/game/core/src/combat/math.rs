/// Clamps to `[0, 1]`. NaN becomes 0.
#[inline]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Rounds up to one decimal place.
///
/// The small epsilon keeps values like `0.30000000000000004` at `0.3` instead of
/// bumping them to `0.4`.
#[inline]
pub fn ceil_tenth(value: f64) -> f64 {
    // `+ 0.0` turns a negative zero into zero.
    ((value * 10.0) - 1e-9).ceil() / 10.0 + 0.0
}

/// Whole percent for display.
#[inline]
pub fn percent(probability: f64) -> i64 {
    (probability * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(0.42), 0.42);
    }

    #[test]
    fn ceil_tenth_absorbs_float_noise() {
        assert_eq!(ceil_tenth(0.1 + 0.2), 0.3);
        assert_eq!(ceil_tenth(2.01), 2.1);
        assert_eq!(ceil_tenth(4.0), 4.0);
        assert!(ceil_tenth(0.0).is_sign_positive());
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(0.57), 57);
        assert_eq!(percent(0.126), 13);
        assert_eq!(percent(1.0), 100);
    }
}

use crate::{CoreError, CoreResult};

/// Smallest argument passed to a floored logarithm.
pub const LOG_FLOOR: f64 = 1.0e-30;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// `log10(max(x, LOG_FLOOR))`. NaN is passed through.
#[inline]
pub fn floored_log10(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    x.max(LOG_FLOOR).log10()
}

/// `ln(max(x, LOG_FLOOR))`. NaN is passed through.
#[inline]
pub fn floored_ln(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    x.max(LOG_FLOOR).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn floored_logs_clamp_zero() {
        assert!((floored_log10(0.0) + 30.0).abs() < 1e-12);
        assert!(floored_ln(0.0).is_finite());
        assert!((floored_log10(100.0) - 2.0).abs() < 1e-12);
        assert!(floored_log10(f64::NAN).is_nan());
        assert_eq!(floored_log10(-5.0), floored_log10(0.0));
    }

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn floored_ln_matches_ln_above_floor(x in 1e-20f64..1e20) {
            prop_assert!((floored_ln(x) - x.ln()).abs() <= 1e-12 * x.ln().abs().max(1.0));
        }
    }
}

//! Marrone–Treanor thermal-nonequilibrium corrections for dissociation.
//!
//! The wrapped rate law supplies the equilibrium value k_eq; the correction
//! factor accounts for a vibrational temperature Tve that lags T.

use crate::arrhenius::TemperatureSource;

/// Q(T, D, θ) = (1 - exp(-D/T)) / (1 - exp(-θ/T)), D/θ in the limit of infinite T.
#[inline]
pub fn partition_ratio(t: f64, d: f64, theta: f64) -> f64 {
    if t.is_infinite() {
        return d / theta;
    }
    (-d / t).exp_m1() / (-theta / t).exp_m1()
}

/// Q(T)·Q(Γ) / (Q(Tve)·Q(-U)) with 1/Γ = 1/Tve - 1/T - 1/U.
#[inline]
fn correction(t: f64, t_ve: f64, u: f64, d: f64, theta: f64) -> f64 {
    let gamma = 1.0 / (1.0 / t_ve - 1.0 / t - 1.0 / u);
    partition_ratio(t, d, theta) * partition_ratio(gamma, d, theta)
        / (partition_ratio(t_ve, d, theta) * partition_ratio(-u, d, theta))
}

/// Constant preferential-dissociation temperature U.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarroneTreanor {
    /// U [K]
    pub u: f64,
    /// Dissociation energy D [K]
    pub d: f64,
    /// Characteristic vibrational temperature θ [K]
    pub theta: f64,
    /// Where Tve is read from.
    pub temperature: TemperatureSource,
}

impl MarroneTreanor {
    #[inline]
    pub fn correction(&self, t: f64, t_ve: f64) -> f64 {
        correction(t, t_ve, self.u, self.d, self.theta)
    }
}

/// Temperature-dependent U: 1/U = aU/T + 1/U★.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifiedMarroneTreanor {
    pub a_u: f64,
    /// U★ [K]
    pub u_star: f64,
    pub d: f64,
    pub theta: f64,
    pub temperature: TemperatureSource,
}

impl ModifiedMarroneTreanor {
    #[inline]
    pub fn u(&self, t: f64) -> f64 {
        1.0 / (self.a_u / t + 1.0 / self.u_star)
    }

    #[inline]
    pub fn correction(&self, t: f64, t_ve: f64) -> f64 {
        correction(t, t_ve, self.u(t), self.d, self.theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // N2 dissociation
    const D_N2: f64 = 113_200.0;
    const THETA_N2: f64 = 3393.0;

    fn n2(u: f64) -> MarroneTreanor {
        MarroneTreanor {
            u,
            d: D_N2,
            theta: THETA_N2,
            temperature: TemperatureSource::Mode(0),
        }
    }

    #[test]
    fn partition_ratio_limits() {
        // Low temperature: both exponentials vanish.
        assert!((partition_ratio(100.0, D_N2, THETA_N2) - 1.0).abs() < 1e-12);
        // High temperature: ratio tends to D/θ.
        let hot = partition_ratio(1.0e9, D_N2, THETA_N2);
        assert!((hot - D_N2 / THETA_N2).abs() / (D_N2 / THETA_N2) < 1e-3);
        assert_eq!(partition_ratio(f64::INFINITY, D_N2, THETA_N2), D_N2 / THETA_N2);
    }

    #[test]
    fn cold_vibration_slows_dissociation() {
        let mt = n2(D_N2 / 6.0);
        let c = mt.correction(10000.0, 4000.0);
        assert!(c > 0.0 && c < 1.0, "correction = {c}");
    }

    #[test]
    fn hot_vibration_speeds_dissociation() {
        let mt = n2(D_N2 / 6.0);
        assert!(mt.correction(6000.0, 9000.0) > 1.0);
    }

    #[test]
    fn modified_u_blends_between_limits() {
        let m = ModifiedMarroneTreanor {
            a_u: 1.5,
            u_star: 20000.0,
            d: D_N2,
            theta: THETA_N2,
            temperature: TemperatureSource::Mode(0),
        };
        let u = m.u(8000.0);
        assert!((1.0 / u - (1.5 / 8000.0 + 1.0 / 20000.0)).abs() < 1e-15);
        // aU = 0 recovers the constant-U form.
        let flat = ModifiedMarroneTreanor { a_u: 0.0, ..m };
        let c_flat = flat.correction(10000.0, 5000.0);
        let c_const = n2(20000.0).correction(10000.0, 5000.0);
        assert!((c_flat - c_const).abs() <= 1e-12 * c_const);
    }

    proptest! {
        #[test]
        fn unity_at_thermal_equilibrium(
            t in 300.0f64..30000.0,
            d in 5.0e4f64..2.0e5,
            theta in 500.0f64..5000.0,
            u_frac in 0.05f64..1.0,
        ) {
            let mt = MarroneTreanor {
                u: u_frac * d,
                d,
                theta,
                temperature: TemperatureSource::Mode(0),
            };
            let c = mt.correction(t, t);
            prop_assert!((c - 1.0).abs() < 1e-9, "correction {} at T = Tve = {}", c, t);
        }

        #[test]
        fn modified_unity_at_thermal_equilibrium(
            t in 300.0f64..30000.0,
            a_u in 0.0f64..3.0,
            u_star in 5.0e3f64..5.0e4,
        ) {
            let m = ModifiedMarroneTreanor {
                a_u,
                u_star,
                d: D_N2,
                theta: THETA_N2,
                temperature: TemperatureSource::Mode(0),
            };
            let c = m.correction(t, t);
            prop_assert!((c - 1.0).abs() < 1e-9);
        }
    }
}

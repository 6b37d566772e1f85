//! Pressure-dependent (falloff) rate constants.
//!
//! All falloff forms blend a low-pressure limit k0 (scaled by the collider
//! concentration M) and a high-pressure limit kInf through the reduced
//! pressure p_r = k0·M/kInf. Both limits are evaluated at T.

use crate::arrhenius::Arrhenius;
use crate::error::KineticsResult;
use crate::third_body::EfficiencyTable;
use tc_core::numeric::{floored_ln, floored_log10};
use tc_gas::GasState;

/// The two Arrhenius limits and the collider weights shared by every falloff form.
#[derive(Debug, Clone, PartialEq)]
pub struct Falloff {
    pub k_inf: Arrhenius,
    pub k0: Arrhenius,
    pub efficiencies: EfficiencyTable,
}

/// Limits evaluated at one state.
#[derive(Debug, Clone, Copy)]
pub struct FalloffLimits {
    pub k_inf: f64,
    pub k0: f64,
    /// Collider concentration [mol/m³].
    pub m: f64,
}

impl FalloffLimits {
    #[inline]
    pub fn reduced_pressure(&self) -> f64 {
        self.k0 * self.m / self.k_inf
    }

    /// Lindemann–Hinshelwood blend k0·kInf·M / (k0·M + kInf).
    #[inline]
    pub fn lindemann(&self) -> f64 {
        self.k0 * self.k_inf * self.m / (self.k0 * self.m + self.k_inf)
    }
}

impl Falloff {
    pub fn check_state(&self, gs: &GasState) -> KineticsResult<()> {
        self.efficiencies.check_state(gs)
    }

    #[inline]
    pub fn limits(&self, gs: &GasState) -> FalloffLimits {
        FalloffLimits {
            k_inf: self.k_inf.at(gs.t),
            k0: self.k0.at(gs.t),
            m: self.efficiencies.concentration(gs),
        }
    }

    pub fn lindemann_hinshelwood(&self, gs: &GasState) -> f64 {
        self.limits(gs).lindemann()
    }

    pub fn troe(&self, gs: &GasState, centering: &TroeCentering) -> f64 {
        let limits = self.limits(gs);
        let f = troe_broadening(limits.reduced_pressure(), centering.f_cent(gs.t));
        f * limits.lindemann()
    }

    /// kInf·(p_r/(1+p_r))·Fc·xt with Fc = a·exp(-b/T) + (1-a)·exp(-c/T)
    /// and xt = 1/(1 + ln(p_r)²).
    pub fn yungster_rabinowitz(&self, gs: &GasState, a: f64, b: f64, c: f64) -> f64 {
        let t = gs.t;
        let limits = self.limits(gs);
        let pr = limits.reduced_pressure();
        let fc = a * (-b / t).exp() + (1.0 - a) * (-c / t).exp();
        let ln_pr = floored_ln(pr);
        let xt = 1.0 / (1.0 + ln_pr * ln_pr);
        limits.k_inf * (pr / (1.0 + pr)) * fc * xt
    }
}

/// Source of the Troe centering factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TroeCentering {
    Constant(f64),
    /// (1-a)·exp(-T/T3) + a·exp(-T/T1) [+ exp(-T2/T)], recomputed at every evaluation.
    Computed {
        a: f64,
        t1: f64,
        t3: f64,
        t2: Option<f64>,
    },
}

impl TroeCentering {
    #[inline]
    pub fn f_cent(&self, t: f64) -> f64 {
        match *self {
            TroeCentering::Constant(f) => f,
            TroeCentering::Computed { a, t1, t3, t2 } => {
                let mut f = (1.0 - a) * (-t / t3).exp() + a * (-t / t1).exp();
                if let Some(t2) = t2 {
                    f += (-t2 / t).exp();
                }
                f
            }
        }
    }
}

/// Troe broadening factor F(p_r, Fcent).
pub fn troe_broadening(pr: f64, f_cent: f64) -> f64 {
    const D: f64 = 0.14;
    let log_fc = floored_log10(f_cent);
    let c = -0.4 - 0.67 * log_fc;
    let n = 0.75 - 1.27 * log_fc;
    let x = floored_log10(pr) + c;
    let f1 = x / (n - D * x);
    10f64.powf(log_fc / (1.0 + f1 * f1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::third_body::test_support::*;
    use proptest::prelude::*;

    fn falloff() -> Falloff {
        Falloff {
            k_inf: Arrhenius::new(1.0e8, 0.5, 2000.0),
            k0: Arrhenius::new(5.0e6, -1.0, 500.0),
            efficiencies: EfficiencyTable::uniform(&species()),
        }
    }

    #[test]
    fn lindemann_high_pressure_limit() {
        let f = falloff();
        let gs = state(1.0e9, 1500.0, 1500.0, [0.8, 0.2, 0.0]);
        let k_inf = f.k_inf.at(1500.0);
        let k = f.lindemann_hinshelwood(&gs);
        assert!((k - k_inf).abs() / k_inf < 1e-3, "k = {k}, kInf = {k_inf}");
    }

    #[test]
    fn lindemann_low_pressure_limit() {
        let f = falloff();
        let gs = state(1.0e-12, 1500.0, 1500.0, [0.8, 0.2, 0.0]);
        let m = f.efficiencies.concentration(&gs);
        let k0m = f.k0.at(1500.0) * m;
        let k = f.lindemann_hinshelwood(&gs);
        assert!((k - k0m).abs() / k0m < 1e-6);
    }

    #[test]
    fn lindemann_zero_concentration_gives_zero() {
        let f = falloff();
        let gs = state(0.0, 1500.0, 1500.0, [0.8, 0.2, 0.0]);
        assert_eq!(f.lindemann_hinshelwood(&gs), 0.0);
    }

    #[test]
    fn troe_constant_and_computed_agree() {
        let f = falloff();
        let computed = TroeCentering::Computed {
            a: 0.6,
            t1: 1200.0,
            t3: 90.0,
            t2: Some(5000.0),
        };
        for t in [500.0, 1500.0, 3000.0] {
            let gs = state(0.2, t, t, [0.8, 0.2, 0.0]);
            let constant = TroeCentering::Constant(computed.f_cent(t));
            let k_c = f.troe(&gs, &computed);
            let k_k = f.troe(&gs, &constant);
            assert!((k_c - k_k).abs() <= 1e-12 * k_k);
        }
    }

    #[test]
    fn troe_fcent_tracks_temperature() {
        let computed = TroeCentering::Computed {
            a: 0.5,
            t1: 1000.0,
            t3: 100.0,
            t2: None,
        };
        let expected = 0.5 * (-20.0f64).exp() + 0.5 * (-2.0f64).exp();
        assert!((computed.f_cent(2000.0) - expected).abs() < 1e-15);
        assert!(computed.f_cent(300.0) > computed.f_cent(2000.0));
    }

    #[test]
    fn troe_unit_fcent_is_lindemann() {
        let f = falloff();
        let gs = state(0.2, 1500.0, 1500.0, [0.8, 0.2, 0.0]);
        let k = f.troe(&gs, &TroeCentering::Constant(1.0));
        let k_lh = f.lindemann_hinshelwood(&gs);
        assert!((k - k_lh).abs() <= 1e-12 * k_lh);
    }

    #[test]
    fn troe_finite_at_zero_concentration() {
        let f = falloff();
        let gs = state(0.0, 1500.0, 1500.0, [0.8, 0.2, 0.0]);
        let k = f.troe(&gs, &TroeCentering::Constant(0.6));
        assert!(k.is_finite());
        assert_eq!(k, 0.0);
    }

    #[test]
    fn yungster_rabinowitz_formula() {
        let f = falloff();
        let gs = state(0.2, 1500.0, 1500.0, [0.8, 0.2, 0.0]);
        let limits = f.limits(&gs);
        let pr = limits.reduced_pressure();
        let fc = 0.3 * (-100.0f64 / 1500.0).exp() + 0.7 * (-3000.0f64 / 1500.0).exp();
        let expected = limits.k_inf * pr / (1.0 + pr) * fc / (1.0 + pr.ln().powi(2));
        let k = f.yungster_rabinowitz(&gs, 0.3, 100.0, 3000.0);
        assert!((k - expected).abs() <= 1e-12 * expected);
    }

    proptest! {
        #[test]
        fn troe_broadening_bounded(log_pr in -12.0f64..12.0, f_cent in 0.05f64..1.0) {
            let f = troe_broadening(10f64.powf(log_pr), f_cent);
            prop_assert!(f.is_finite());
            prop_assert!(f > 0.0);
            prop_assert!(f <= 1.0 + 1e-12);
            prop_assert!(f >= f_cent - 1e-12);
        }
    }
}

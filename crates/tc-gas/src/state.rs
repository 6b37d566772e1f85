//! Per-location gas state.

use crate::composition::validate_mass_fractions;
use crate::error::{GasError, GasResult};
use tc_core::constants::P_ATM;
use tc_core::units::{
    Density, DynVisc, Pressure, Temperature, ThermalCond, Velocity, kg_m3, mps, pa_s, w_mk,
};

/// Mass-fraction sum tolerance used by [`GasState::check`].
pub const MASSF_TOLERANCE: f64 = 1.0e-6;

/// Full thermochemical state of one fluid parcel.
///
/// Owned by whoever holds the parcel (flow cell, sample point). Models and
/// rate laws receive it by reference; the `update_thermo_*` operations of a
/// [`crate::GasModel`] rewrite the derived fields in place.
///
/// Index 0 of `t_modes`/`u_modes` is the vibro-electronic mode.
#[derive(Debug, Clone, PartialEq)]
pub struct GasState {
    /// Pressure [Pa]
    pub p: f64,
    /// Electron partial pressure [Pa] (zero without an electron species)
    pub p_e: f64,
    /// Density [kg/m³]
    pub rho: f64,
    /// Trans-rotational temperature [K]
    pub t: f64,
    /// Internal-mode temperatures [K]
    pub t_modes: Vec<f64>,
    /// Trans-rotational specific internal energy, including formation [J/kg]
    pub u: f64,
    /// Internal-mode specific energies [J/kg]
    pub u_modes: Vec<f64>,
    /// Mass fractions per species
    pub massf: Vec<f64>,
    /// Frozen sound speed [m/s]
    pub a: f64,
    /// Dynamic viscosity [Pa·s]
    pub mu: f64,
    /// Trans-rotational thermal conductivity [W/(m·K)]
    pub k: f64,
    /// Internal-mode thermal conductivities [W/(m·K)]
    pub k_modes: Vec<f64>,
}

impl GasState {
    /// Blank state at 1 atm, 300 K, all mass in the first species.
    pub fn new(n_species: usize, n_modes: usize) -> Self {
        let mut massf = vec![0.0; n_species];
        if let Some(first) = massf.first_mut() {
            *first = 1.0;
        }
        Self {
            p: P_ATM,
            p_e: 0.0,
            rho: 0.0,
            t: 300.0,
            t_modes: vec![300.0; n_modes],
            u: 0.0,
            u_modes: vec![0.0; n_modes],
            massf,
            a: 0.0,
            mu: 0.0,
            k: 0.0,
            k_modes: vec![0.0; n_modes],
        }
    }

    /// Create a two-temperature state from pressure, both temperatures and composition.
    ///
    /// Validates that pressure and temperatures are positive and finite and that
    /// the mass fractions are a valid composition. Derived fields are left for a
    /// model update to fill.
    pub fn with_pt(
        p: Pressure,
        t: Temperature,
        t_ve: Temperature,
        massf: Vec<f64>,
    ) -> GasResult<Self> {
        let p_val = p.value;
        if !p_val.is_finite() || p_val <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        validate_mass_fractions(&massf, MASSF_TOLERANCE)?;

        let mut gs = Self::new(massf.len(), 1);
        gs.p = p_val;
        gs.t = t.value;
        gs.t_modes[0] = t_ve.value;
        gs.massf = massf;
        gs.check_temperatures()?;
        Ok(gs)
    }

    /// Vibro-electronic temperature, falling back to T for single-temperature states.
    #[inline]
    pub fn t_ve(&self) -> f64 {
        self.t_modes.first().copied().unwrap_or(self.t)
    }

    /// Vibro-electronic energy, zero for single-temperature states.
    #[inline]
    pub fn u_ve(&self) -> f64 {
        self.u_modes.first().copied().unwrap_or(0.0)
    }

    /// Set T and, when present, every internal-mode temperature.
    pub fn set_temperatures(&mut self, t: f64, t_ve: f64) {
        self.t = t;
        for tm in &mut self.t_modes {
            *tm = t_ve;
        }
    }

    /// Check the state invariants: positive finite temperatures, valid composition.
    pub fn check(&self) -> GasResult<()> {
        self.check_temperatures()?;
        validate_mass_fractions(&self.massf, MASSF_TOLERANCE)
    }

    fn check_temperatures(&self) -> GasResult<()> {
        if !self.t.is_finite() || self.t <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if self.t_modes.iter().any(|t| !t.is_finite() || *t <= 0.0) {
            return Err(GasError::NonPhysical {
                what: "mode temperature must be positive and finite",
            });
        }
        Ok(())
    }

    pub fn pressure(&self) -> Pressure {
        tc_core::units::pa(self.p)
    }

    pub fn temperature(&self) -> Temperature {
        tc_core::units::k(self.t)
    }

    pub fn density(&self) -> Density {
        kg_m3(self.rho)
    }

    pub fn sound_speed(&self) -> Velocity {
        mps(self.a)
    }

    pub fn viscosity(&self) -> DynVisc {
        pa_s(self.mu)
    }

    pub fn conductivity(&self) -> ThermalCond {
        w_mk(self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::units::{k, pa};

    #[test]
    fn create_valid_state() {
        let gs = GasState::with_pt(pa(101325.0), k(300.0), k(400.0), vec![0.8, 0.2]).unwrap();
        assert_eq!(gs.pressure().value, 101325.0);
        assert_eq!(gs.temperature().value, 300.0);
        assert_eq!(gs.t_ve(), 400.0);
        assert_eq!(gs.t_modes.len(), 1);
        assert!(gs.check().is_ok());
    }

    #[test]
    fn reject_negative_pressure() {
        let result = GasState::with_pt(pa(-100.0), k(300.0), k(300.0), vec![1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_zero_temperature() {
        let result = GasState::with_pt(pa(101325.0), k(300.0), k(0.0), vec![1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_bad_composition() {
        let result = GasState::with_pt(pa(101325.0), k(300.0), k(300.0), vec![0.5, 0.2]);
        assert!(result.is_err());
        let result = GasState::with_pt(pa(f64::NAN), k(300.0), k(300.0), vec![1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn single_temperature_fallbacks() {
        let gs = GasState::new(2, 0);
        assert_eq!(gs.t_ve(), gs.t);
        assert_eq!(gs.u_ve(), 0.0);
        assert_eq!(gs.massf, vec![1.0, 0.0]);
    }

    #[test]
    fn set_temperatures_updates_modes() {
        let mut gs = GasState::new(1, 2);
        gs.set_temperatures(1000.0, 800.0);
        assert_eq!(gs.t, 1000.0);
        assert_eq!(gs.t_modes, vec![800.0, 800.0]);
    }
}

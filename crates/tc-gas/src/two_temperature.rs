//! Two-temperature thermodynamic model.
//!
//! Heavy species carry translational and rotational energy at T with a
//! constant (fully excited) heat capacity, so T follows from the
//! trans-rotational energy in closed form. Vibrational and electronic energy,
//! plus the translational energy of free electrons, are carried at Tve and
//! come from the species curve fits, so Tve needs a Newton iteration.
//!
//! Per-species energies, with h°_i the curve enthalpy and Δh_f,i the
//! formation enthalpy at T_ref:
//!
//! ```text
//! e_tr,i(T)    = (Cp_tr,i - R_i) T - Cp_tr,i T_ref + Δh_f,i        heavy species
//! e_ve,i(Tve)  = h°_i(Tve) - Cp_tr,i (Tve - T_ref) - Δh_f,i        heavy species
//! e_ve,e(Tve)  = h°_e(Tve) - R_e Tve                               electrons
//! p            = ρ (Σ_heavy y_i R_i T + y_e R_e Tve)
//! ```

use crate::error::{GasError, GasResult};
use crate::model::{EnergyMode, GasModel};
use crate::species::SpeciesTable;
use crate::state::GasState;
use tc_core::CoreError;
use tc_core::constants::{P_REF, T_REF};
use tc_core::numeric::floored_ln;
use tracing::{debug, trace, warn};

/// Settings for the bounded Newton iteration on Tve.
#[derive(Debug, Clone, Copy)]
pub struct TveSolverConfig {
    /// Maximum iterations before reporting a convergence failure
    pub max_iterations: usize,
    /// Converged when |e_ve(Tve) - u_ve| falls below this [J/kg]
    pub energy_tol: f64,
    /// Converged when the Newton step falls below this [K]
    pub temperature_tol: f64,
    /// Largest upward step, as a fraction of the current iterate
    pub max_rise: f64,
    /// Largest downward step, as a fraction of the current iterate
    pub max_drop: f64,
    /// Floor on the vibro-electronic heat capacity used as the derivative [J/(kg·K)]
    pub min_cv: f64,
    /// Iterates are kept inside [t_min, t_max] [K]
    pub t_min: f64,
    pub t_max: f64,
}

impl Default for TveSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            energy_tol: 1.0e-2,
            temperature_tol: 1.0e-6,
            max_rise: 1.0,
            max_drop: 0.5,
            min_cv: 1.0e-3,
            t_min: 10.0,
            t_max: 1.0e5,
        }
    }
}

/// Two-temperature gas model over a shared species arena.
#[derive(Debug, Clone)]
pub struct TwoTemperatureGas {
    species: SpeciesTable,
    r: Vec<f64>,
    cp_tr: Vec<f64>,
    hf: Vec<f64>,
    electron: Option<usize>,
    solver: TveSolverConfig,
}

impl TwoTemperatureGas {
    pub fn new(species: SpeciesTable) -> GasResult<Self> {
        Self::with_solver(species, TveSolverConfig::default())
    }

    pub fn with_solver(species: SpeciesTable, solver: TveSolverConfig) -> GasResult<Self> {
        if solver.max_iterations == 0 {
            return Err(GasError::InvalidArg {
                what: "max_iterations must be at least 1",
            });
        }
        if !(solver.energy_tol > 0.0 && solver.temperature_tol > 0.0) {
            return Err(GasError::InvalidArg {
                what: "solver tolerances must be positive",
            });
        }
        if !(solver.t_min > 0.0 && solver.t_max > solver.t_min) {
            return Err(GasError::InvalidArg {
                what: "solver temperature bounds must satisfy 0 < t_min < t_max",
            });
        }
        if species.iter().all(|s| s.is_electron()) {
            return Err(GasError::InvalidArg {
                what: "two-temperature model needs at least one heavy species",
            });
        }

        let r = species.iter().map(|s| s.gas_constant).collect();
        let cp_tr = species.iter().map(|s| s.trans_rot_cp()).collect();
        let hf = species.iter().map(|s| s.formation_enthalpy).collect();
        let electron = species.electron_index();
        debug!(
            n_species = species.len(),
            electron = ?electron,
            "two-temperature gas model built"
        );

        Ok(Self {
            species,
            r,
            cp_tr,
            hf,
            electron,
            solver,
        })
    }

    pub fn solver(&self) -> &TveSolverConfig {
        &self.solver
    }

    fn check_state(&self, gs: &GasState) -> GasResult<()> {
        if gs.massf.len() != self.r.len() {
            return Err(GasError::InvalidState {
                what: format!(
                    "{} mass fractions for {} species",
                    gs.massf.len(),
                    self.r.len()
                ),
            });
        }
        if gs.t_modes.is_empty() || gs.u_modes.is_empty() {
            return Err(GasError::InvalidState {
                what: "two-temperature state needs a vibro-electronic mode".to_string(),
            });
        }
        Ok(())
    }

    /// Rejects T or Tve at or below zero; NaN passes through to the results.
    fn check_temperatures(gs: &GasState) -> GasResult<()> {
        if gs.t <= 0.0 || gs.t_modes[0] <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "temperatures must be positive",
            });
        }
        Ok(())
    }

    fn check_index(&self, isp: usize) -> GasResult<()> {
        if isp >= self.r.len() {
            return Err(CoreError::IndexOob {
                what: "species",
                index: isp,
                len: self.r.len(),
            }
            .into());
        }
        Ok(())
    }

    #[inline]
    fn is_electron(&self, isp: usize) -> bool {
        self.electron == Some(isp)
    }

    /// Σ_heavy y_i R_i
    fn heavy_gas_constant(&self, massf: &[f64]) -> f64 {
        let mut sum = 0.0;
        for (isp, (y, r)) in massf.iter().zip(&self.r).enumerate() {
            if !self.is_electron(isp) {
                sum += y * r;
            }
        }
        sum
    }

    /// y_e R_e
    fn electron_gas_constant(&self, massf: &[f64]) -> f64 {
        self.electron.map_or(0.0, |ie| massf[ie] * self.r[ie])
    }

    fn species_trans_rot_energy(&self, isp: usize, t: f64) -> f64 {
        if self.is_electron(isp) {
            return 0.0;
        }
        (self.cp_tr[isp] - self.r[isp]) * t - self.cp_tr[isp] * T_REF + self.hf[isp]
    }

    fn trans_rot_energy(&self, massf: &[f64], t: f64) -> f64 {
        massf
            .iter()
            .enumerate()
            .map(|(isp, y)| y * self.species_trans_rot_energy(isp, t))
            .sum()
    }

    /// Closed-form inversion of the trans-rotational energy (linear in T).
    fn trans_rot_temperature(&self, massf: &[f64], u: f64) -> GasResult<f64> {
        let mut num = u;
        let mut den = 0.0;
        for (isp, y) in massf.iter().enumerate() {
            if self.is_electron(isp) {
                continue;
            }
            num += y * (self.cp_tr[isp] * T_REF - self.hf[isp]);
            den += y * (self.cp_tr[isp] - self.r[isp]);
        }
        if den <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "mixture has no trans-rotational heat capacity",
            });
        }
        let t = num / den;
        if t <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "trans-rotational temperature from energy is not positive",
            });
        }
        Ok(t)
    }

    fn species_ve_energy(&self, isp: usize, t_ve: f64) -> f64 {
        let h = self.species[isp].thermo.enthalpy(t_ve);
        if self.is_electron(isp) {
            h - self.r[isp] * t_ve
        } else {
            h - self.cp_tr[isp] * (t_ve - T_REF) - self.hf[isp]
        }
    }

    fn species_ve_cv(&self, isp: usize, t_ve: f64) -> f64 {
        let cp = self.species[isp].thermo.cp(t_ve);
        if self.is_electron(isp) {
            cp - self.r[isp]
        } else {
            cp - self.cp_tr[isp]
        }
    }

    fn ve_energy(&self, massf: &[f64], t_ve: f64) -> f64 {
        let mut sum = 0.0;
        for (isp, y) in massf.iter().enumerate() {
            if *y != 0.0 {
                sum += y * self.species_ve_energy(isp, t_ve);
            }
        }
        sum
    }

    fn ve_cv(&self, massf: &[f64], t_ve: f64) -> f64 {
        let mut sum = 0.0;
        for (isp, y) in massf.iter().enumerate() {
            if *y != 0.0 {
                sum += y * self.species_ve_cv(isp, t_ve);
            }
        }
        sum
    }

    fn trans_rot_cv(&self, massf: &[f64]) -> f64 {
        let mut sum = 0.0;
        for (isp, y) in massf.iter().enumerate() {
            if !self.is_electron(isp) {
                sum += y * (self.cp_tr[isp] - self.r[isp]);
            }
        }
        sum
    }

    /// Bounded Newton iteration for Tve, starting from the state's current Tve
    /// (or `fallback` when that is unusable). `gs` is not modified.
    fn solve_tve(&self, gs: &GasState, fallback: f64) -> GasResult<f64> {
        let cfg = &self.solver;
        let target = gs.u_modes[0];
        let mut t_ve = gs.t_modes[0];
        if !t_ve.is_finite() || t_ve <= 0.0 {
            t_ve = fallback;
        }
        t_ve = t_ve.clamp(cfg.t_min, cfg.t_max);

        let mut residual = f64::NAN;
        let mut iterations = 0;
        for iteration in 0..cfg.max_iterations {
            iterations = iteration + 1;
            residual = self.ve_energy(&gs.massf, t_ve) - target;
            let cv = self.ve_cv(&gs.massf, t_ve).max(cfg.min_cv);
            let step = (-residual / cv).clamp(-cfg.max_drop * t_ve, cfg.max_rise * t_ve);
            t_ve = (t_ve + step).clamp(cfg.t_min, cfg.t_max);
            trace!(iteration, t_ve, residual, "Tve Newton step");

            if !t_ve.is_finite() || !residual.is_finite() {
                break;
            }
            if residual.abs() < cfg.energy_tol || step.abs() < cfg.temperature_tol {
                return Ok(t_ve);
            }
        }

        warn!(t_ve, residual, iterations, "Tve iteration did not converge");
        Err(GasError::ConvergenceFailure {
            tve: t_ve,
            residual,
            iterations,
            state: Box::new(gs.clone()),
        })
    }

    /// p and p_e from ρ, T, Tve.
    fn set_pressures(&self, gs: &mut GasState) {
        let t_ve = gs.t_modes[0];
        gs.p_e = gs.rho * self.electron_gas_constant(&gs.massf) * t_ve;
        gs.p = gs.rho * self.heavy_gas_constant(&gs.massf) * gs.t + gs.p_e;
    }

    /// u and u_ve from T, Tve.
    fn set_energies(&self, gs: &mut GasState) {
        let t_ve = gs.t_modes[0];
        gs.u = self.trans_rot_energy(&gs.massf, gs.t);
        gs.u_modes[0] = self.ve_energy(&gs.massf, t_ve);
    }
}

impl GasModel for TwoTemperatureGas {
    fn name(&self) -> &str {
        "TwoTemperatureGas"
    }

    fn species(&self) -> &SpeciesTable {
        &self.species
    }

    fn n_modes(&self) -> usize {
        1
    }

    fn update_thermo_from_pt(&self, gs: &mut GasState) -> GasResult<()> {
        self.check_state(gs)?;
        Self::check_temperatures(gs)?;
        let t_ve = gs.t_modes[0];
        let denom = self.heavy_gas_constant(&gs.massf) * gs.t
            + self.electron_gas_constant(&gs.massf) * t_ve;
        if denom <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "mixture gas constant times temperature must be positive",
            });
        }
        gs.rho = gs.p / denom;
        gs.p_e = gs.rho * self.electron_gas_constant(&gs.massf) * t_ve;
        self.set_energies(gs);
        Ok(())
    }

    fn update_thermo_from_rhou(&self, gs: &mut GasState) -> GasResult<()> {
        self.check_state(gs)?;
        let t = self.trans_rot_temperature(&gs.massf, gs.u)?;
        let t_ve = self.solve_tve(gs, t)?;
        gs.t = t;
        gs.t_modes[0] = t_ve;
        self.set_pressures(gs);
        Ok(())
    }

    fn update_thermo_from_rhot(&self, gs: &mut GasState) -> GasResult<()> {
        self.check_state(gs)?;
        Self::check_temperatures(gs)?;
        self.set_pressures(gs);
        self.set_energies(gs);
        Ok(())
    }

    fn update_thermo_from_rhop(&self, gs: &mut GasState) -> GasResult<()> {
        self.check_state(gs)?;
        let r_heavy = self.heavy_gas_constant(&gs.massf);
        if r_heavy <= 0.0 || gs.rho <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "density and heavy-species gas constant must be positive",
            });
        }
        gs.p_e = gs.rho * self.electron_gas_constant(&gs.massf) * gs.t_modes[0];
        let t = (gs.p - gs.p_e) / (gs.rho * r_heavy);
        if t <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "heavy-species pressure must be positive",
            });
        }
        gs.t = t;
        self.set_energies(gs);
        Ok(())
    }

    fn update_thermo_from_ps(&self, _gs: &mut GasState, _s: f64) -> GasResult<()> {
        Err(GasError::NotImplemented {
            what: "two-temperature update from pressure and entropy",
        })
    }

    fn update_thermo_from_hs(&self, _gs: &mut GasState, _h: f64, _s: f64) -> GasResult<()> {
        Err(GasError::NotImplemented {
            what: "two-temperature update from enthalpy and entropy",
        })
    }

    fn update_sound_speed(&self, gs: &mut GasState) -> GasResult<()> {
        self.check_state(gs)?;
        if gs.rho <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "density must be positive for sound speed",
            });
        }
        let gamma = self.gamma(gs);
        gs.a = (gamma * gs.p / gs.rho).sqrt();
        Ok(())
    }

    fn cv(&self, gs: &GasState) -> f64 {
        self.trans_rot_cv(&gs.massf) + self.ve_cv(&gs.massf, gs.t_ve())
    }

    fn cp(&self, gs: &GasState) -> f64 {
        // Internal modes do no p-v work, so Cp exceeds Cv only by the gas constant.
        self.cv(gs) + self.gas_constant(gs)
    }

    fn gas_constant(&self, gs: &GasState) -> f64 {
        gs.massf.iter().zip(&self.r).map(|(y, r)| y * r).sum()
    }

    fn internal_energy(&self, gs: &GasState) -> f64 {
        gs.u + gs.u_ve()
    }

    fn enthalpy(&self, gs: &GasState) -> f64 {
        self.internal_energy(gs) + gs.p / gs.rho
    }

    fn entropy(&self, gs: &GasState) -> f64 {
        let mut s = 0.0;
        for (isp, y) in gs.massf.iter().enumerate() {
            if *y > 0.0 {
                s += y * self.species_entropy(gs, isp);
            }
        }
        s
    }

    fn enthalpy_species(&self, gs: &GasState, isp: usize) -> GasResult<f64> {
        self.check_index(isp)?;
        let t_ve = gs.t_ve();
        if self.is_electron(isp) {
            return Ok(self.species[isp].thermo.enthalpy(t_ve));
        }
        Ok(self.cp_tr[isp] * (gs.t - T_REF) + self.hf[isp] + self.species_ve_energy(isp, t_ve))
    }

    fn entropy_species(&self, gs: &GasState, isp: usize) -> GasResult<f64> {
        self.check_index(isp)?;
        Ok(self.species_entropy(gs, isp))
    }

    fn energy_per_species_in_mode(
        &self,
        gs: &GasState,
        isp: usize,
        mode: EnergyMode,
    ) -> GasResult<f64> {
        self.check_index(isp)?;
        Ok(match mode {
            EnergyMode::TransRotational => self.species_trans_rot_energy(isp, gs.t),
            EnergyMode::VibroElectronic => self.species_ve_energy(isp, gs.t_ve()),
        })
    }

    fn dpdrho_const_t(&self, gs: &GasState) -> f64 {
        self.heavy_gas_constant(&gs.massf) * gs.t
            + self.electron_gas_constant(&gs.massf) * gs.t_ve()
    }
}

impl TwoTemperatureGas {
    /// s_i = s°_i(Tve) + Cp_tr,i ln(T/Tve) - R_i ln(p_i/p_ref); electrons at Tve only.
    fn species_entropy(&self, gs: &GasState, isp: usize) -> f64 {
        let t_ve = gs.t_ve();
        let r = self.r[isp];
        let s0 = self.species[isp].thermo.entropy(t_ve);
        let t_i = if self.is_electron(isp) { t_ve } else { gs.t };
        let p_i = gs.rho * gs.massf[isp] * r * t_i;
        let mixing = r * floored_ln(p_i / P_REF);
        if self.is_electron(isp) {
            s0 - mixing
        } else {
            s0 + self.cp_tr[isp] * (gs.t / t_ve).ln() - mixing
        }
    }
}

//! Gas model trait.

use crate::error::GasResult;
use crate::species::SpeciesTable;
use crate::state::GasState;

/// Energy pool selector for per-species energy queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyMode {
    /// Translation + rotation, carried at T.
    TransRotational,
    /// Vibration + electronic excitation (and free-electron translation), carried at Tve.
    VibroElectronic,
}

/// Trait for thermodynamic gas models.
///
/// Implementations are immutable after construction and must be thread-safe
/// (Send + Sync): every worker can call into one shared model as long as it
/// updates its own [`GasState`].
pub trait GasModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Species arena this model was built on.
    fn species(&self) -> &SpeciesTable;

    fn n_species(&self) -> usize {
        self.species().len()
    }

    /// Number of internal-mode temperatures carried besides T.
    fn n_modes(&self) -> usize;

    /// A blank state sized for this model.
    fn new_state(&self) -> GasState {
        GasState::new(self.n_species(), self.n_modes())
    }

    /// Given p, T, Tve and composition: set density and energies.
    fn update_thermo_from_pt(&self, gs: &mut GasState) -> GasResult<()>;

    /// Given density and energies: set T, Tve and pressure.
    fn update_thermo_from_rhou(&self, gs: &mut GasState) -> GasResult<()>;

    /// Given density, T and Tve: set pressure and energies.
    fn update_thermo_from_rhot(&self, gs: &mut GasState) -> GasResult<()>;

    /// Given density, pressure and a valid Tve: set T and energies.
    fn update_thermo_from_rhop(&self, gs: &mut GasState) -> GasResult<()>;

    /// Given pressure and specific entropy.
    fn update_thermo_from_ps(&self, gs: &mut GasState, s: f64) -> GasResult<()>;

    /// Given specific enthalpy and specific entropy.
    fn update_thermo_from_hs(&self, gs: &mut GasState, h: f64, s: f64) -> GasResult<()>;

    /// Set the frozen sound speed from an otherwise complete state.
    fn update_sound_speed(&self, gs: &mut GasState) -> GasResult<()>;

    /// Mixture specific heat at constant volume [J/(kg·K)].
    fn cv(&self, gs: &GasState) -> f64;

    /// Mixture specific heat at constant pressure [J/(kg·K)].
    fn cp(&self, gs: &GasState) -> f64;

    /// Effective ratio of specific heats.
    fn gamma(&self, gs: &GasState) -> f64 {
        self.cp(gs) / self.cv(gs)
    }

    /// Mass-weighted gas constant [J/(kg·K)].
    fn gas_constant(&self, gs: &GasState) -> f64;

    /// Total specific internal energy, all modes [J/kg].
    fn internal_energy(&self, gs: &GasState) -> f64;

    /// Specific enthalpy [J/kg].
    fn enthalpy(&self, gs: &GasState) -> f64;

    /// Specific entropy [J/(kg·K)].
    fn entropy(&self, gs: &GasState) -> f64;

    /// Specific enthalpy of one species [J/kg].
    fn enthalpy_species(&self, gs: &GasState, isp: usize) -> GasResult<f64>;

    /// Specific entropy of one species at its partial pressure [J/(kg·K)].
    fn entropy_species(&self, gs: &GasState, isp: usize) -> GasResult<f64>;

    /// Specific energy of one species held in one energy pool [J/kg].
    fn energy_per_species_in_mode(
        &self,
        gs: &GasState,
        isp: usize,
        mode: EnergyMode,
    ) -> GasResult<f64>;

    /// (∂p/∂ρ) at constant temperatures [J/kg].
    fn dpdrho_const_t(&self, gs: &GasState) -> f64;
}

//! tc-gas: gas state and thermodynamic models for reacting-gas flows.
//!
//! Provides:
//! - Species descriptors loaded once into a shared, immutable arena
//! - Per-species thermodynamic curve evaluators (segmented NASA-9 fits)
//! - The per-location `GasState`
//! - Composition conversions (mass/mole fractions)
//! - `GasModel` trait for state updates
//! - A two-temperature model carrying trans-rotational energy at T and
//!   vibro-electronic energy at Tve
//!
//! # Example
//!
//! ```no_run
//! use tc_gas::{GasModel, SpeciesTable, TwoTemperatureGas};
//!
//! let source = std::fs::read_to_string("data/n2-o2.yaml").unwrap();
//! let species = SpeciesTable::from_yaml_str(&source).unwrap();
//! let model = TwoTemperatureGas::new(species).unwrap();
//!
//! let mut gs = model.new_state();
//! gs.p = 1.0e5;
//! gs.t = 3000.0;
//! gs.t_modes[0] = 2000.0;
//! gs.massf = vec![0.767, 0.233];
//! model.update_thermo_from_pt(&mut gs).unwrap();
//! println!("rho = {} kg/m³", gs.rho);
//! ```

pub mod composition;
pub mod curves;
pub mod error;
pub mod model;
pub mod species;
pub mod state;
pub mod two_temperature;

// Re-exports for ergonomics
pub use curves::{CeaSegmentDef, CeaThermo, ThermoCurve, ThermoCurveDef};
pub use error::{GasError, GasResult};
pub use model::{EnergyMode, GasModel};
pub use species::{
    CeaTransportSegmentDef, GasModelDef, ParticleType, Species, SpeciesRecord, SpeciesTable,
    TransportCurveDef, TransportDef,
};
pub use state::GasState;
pub use two_temperature::{TveSolverConfig, TwoTemperatureGas};

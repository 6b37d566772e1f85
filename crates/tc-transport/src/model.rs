//! Mixture transport model: one Wilke rule per property.

use crate::error::{TransportError, TransportResult};
use crate::laws::{TransportLaw, TransportProperty, law_from_def};
use crate::wilke::WilkeMixingRule;
use std::sync::Arc;
use tc_gas::{GasState, SpeciesTable};
use tracing::debug;

/// Viscosity and thermal-conductivity mixing rules for one species set.
///
/// Not reentrant; clone once per worker.
#[derive(Debug, Clone)]
pub struct TransportModel {
    viscosity: WilkeMixingRule,
    conductivity: WilkeMixingRule,
}

impl TransportModel {
    pub fn new(viscosity: WilkeMixingRule, conductivity: WilkeMixingRule) -> TransportResult<Self> {
        if viscosity.n_species() != conductivity.n_species() {
            return Err(TransportError::SizeMismatch {
                expected: viscosity.n_species(),
                found: conductivity.n_species(),
            });
        }
        Ok(Self {
            viscosity,
            conductivity,
        })
    }

    /// Build from the transport data attached to each species descriptor.
    pub fn from_species(species: &SpeciesTable) -> TransportResult<Self> {
        let mut mu_laws: Vec<Arc<dyn TransportLaw>> = Vec::with_capacity(species.len());
        let mut k_laws: Vec<Arc<dyn TransportLaw>> = Vec::with_capacity(species.len());
        for sp in species.iter() {
            let def = sp
                .transport
                .as_ref()
                .ok_or_else(|| TransportError::MissingTransport {
                    species: sp.name.clone(),
                })?;
            mu_laws.push(law_from_def(&def.viscosity, TransportProperty::Viscosity)?);
            k_laws.push(law_from_def(
                &def.thermal_conductivity,
                TransportProperty::ThermalConductivity,
            )?);
        }
        debug!(n_species = species.len(), "transport model built");

        let masses = species.molar_masses();
        Self::new(
            WilkeMixingRule::new(mu_laws, masses.clone())?,
            WilkeMixingRule::new(k_laws, masses)?,
        )
    }

    pub fn viscosity(&mut self, gs: &GasState) -> TransportResult<f64> {
        self.viscosity.eval(gs)
    }

    pub fn thermal_conductivity(&mut self, gs: &GasState) -> TransportResult<f64> {
        self.conductivity.eval(gs)
    }

    /// Write mixture viscosity and conductivity into the state.
    pub fn update_trans_coeffs(&mut self, gs: &mut GasState) -> TransportResult<()> {
        gs.mu = self.viscosity.eval(gs)?;
        gs.k = self.conductivity.eval(gs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laws::Sutherland;
    use std::sync::Arc;
    use tc_core::constants::R_UNIVERSAL;
    use tc_gas::{CeaSegmentDef, CeaThermo, ParticleType, Species, TransportCurveDef, TransportDef};

    fn species(with_transport: bool) -> SpeciesTable {
        let curve = Arc::new(
            CeaThermo::new(
                vec![CeaSegmentDef {
                    t_lo: 200.0,
                    t_hi: 6000.0,
                    coeffs: [0.0, 0.0, 3.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                }],
                0.0,
                R_UNIVERSAL / 0.028,
            )
            .unwrap(),
        );
        let mut n2 = Species::new("N2", ParticleType::LinearMolecule, 0.028, curve).unwrap();
        if with_transport {
            n2 = n2.with_transport(TransportDef {
                viscosity: TransportCurveDef::Sutherland {
                    ref_value: 1.663e-5,
                    t_ref: 273.0,
                    s: 107.0,
                },
                thermal_conductivity: TransportCurveDef::Sutherland {
                    ref_value: 0.0242,
                    t_ref: 273.0,
                    s: 150.0,
                },
            });
        }
        SpeciesTable::from_species(vec![n2]).unwrap()
    }

    #[test]
    fn update_writes_mu_and_k() {
        let mut model = TransportModel::from_species(&species(true)).unwrap();
        let mut gs = GasState::new(1, 1);
        gs.t = 300.0;
        model.update_trans_coeffs(&mut gs).unwrap();
        assert_eq!(gs.mu, Sutherland::new(1.663e-5, 273.0, 107.0).at(300.0));
        assert_eq!(gs.k, Sutherland::new(0.0242, 273.0, 150.0).at(300.0));
    }

    #[test]
    fn missing_transport_data() {
        let err = TransportModel::from_species(&species(false)).unwrap_err();
        assert!(matches!(err, TransportError::MissingTransport { ref species } if species == "N2"));
    }
}

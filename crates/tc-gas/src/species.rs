//! Species descriptors and the shared species arena.

use crate::curves::{CeaThermo, ThermoCurve, ThermoCurveDef};
use crate::error::{GasError, GasResult};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;
use tc_core::ConfigError;
use tc_core::constants::{R_UNIVERSAL, T_REF};
use tracing::debug;

/// Particle type, which fixes the (fully excited) trans-rotational heat capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleType {
    Atom,
    #[serde(alias = "linear")]
    LinearMolecule,
    #[serde(alias = "nonlinear")]
    NonlinearMolecule,
    Electron,
}

impl ParticleType {
    /// Trans-rotational Cp in units of the species gas constant.
    ///
    /// Electrons carry no trans-rotational mode; their translational energy
    /// lives in the vibro-electronic pool.
    pub fn trans_rot_cp_over_r(self) -> f64 {
        match self {
            ParticleType::Atom => 2.5,
            ParticleType::LinearMolecule => 3.5,
            ParticleType::NonlinearMolecule => 4.0,
            ParticleType::Electron => 0.0,
        }
    }
}

/// Elementary transport-law parameters carried by a species descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransportCurveDef {
    /// q = ref_value (T/t_ref)^1.5 (t_ref + s)/(T + s)
    Sutherland { ref_value: f64, t_ref: f64, s: f64 },
    /// ln q = A ln T + B/T + C/T² + D per temperature range (CEA units).
    #[serde(rename = "CEA")]
    Cea { segments: Vec<CeaTransportSegmentDef> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeaTransportSegmentDef {
    pub t_lo: f64,
    pub t_hi: f64,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportDef {
    pub viscosity: TransportCurveDef,
    pub thermal_conductivity: TransportCurveDef,
}

/// One species as written in a gas-model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub particle: ParticleType,
    /// Molar mass [kg/mol].
    pub molar_mass: f64,
    /// Formation enthalpy at 298.15 K [J/kg]. Defaults to the curve value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_enthalpy: Option<f64>,
    pub thermo: ThermoCurveDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportDef>,
}

/// Gas-model file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasModelDef {
    pub species: Vec<SpeciesRecord>,
}

/// Immutable species descriptor.
#[derive(Debug, Clone)]
pub struct Species {
    pub name: String,
    pub particle: ParticleType,
    /// Molar mass [kg/mol].
    pub molar_mass: f64,
    /// Specific gas constant R_i [J/(kg·K)].
    pub gas_constant: f64,
    /// Formation enthalpy at 298.15 K [J/kg].
    pub formation_enthalpy: f64,
    pub thermo: Arc<dyn ThermoCurve>,
    pub transport: Option<TransportDef>,
}

impl Species {
    /// Create a descriptor whose formation enthalpy is read off the curve at 298.15 K.
    pub fn new(
        name: impl Into<String>,
        particle: ParticleType,
        molar_mass: f64,
        thermo: Arc<dyn ThermoCurve>,
    ) -> GasResult<Self> {
        if !molar_mass.is_finite() || molar_mass <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "molar mass must be positive and finite",
            });
        }
        let formation_enthalpy = thermo.enthalpy(T_REF);
        Ok(Self {
            name: name.into(),
            particle,
            molar_mass,
            gas_constant: R_UNIVERSAL / molar_mass,
            formation_enthalpy,
            thermo,
            transport: None,
        })
    }

    pub fn with_formation_enthalpy(mut self, hf: f64) -> Self {
        self.formation_enthalpy = hf;
        self
    }

    pub fn with_transport(mut self, transport: TransportDef) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn from_record(record: &SpeciesRecord) -> GasResult<Self> {
        if !record.molar_mass.is_finite() || record.molar_mass <= 0.0 {
            return Err(ConfigError::invalid(
                "molar_mass",
                &format!("species {}", record.name),
                "must be positive",
            )
            .into());
        }
        let r = R_UNIVERSAL / record.molar_mass;
        let curve = CeaThermo::from_def(&record.thermo, r)?;
        let mut species = Self::new(
            record.name.clone(),
            record.particle,
            record.molar_mass,
            Arc::new(curve),
        )?;
        if let Some(hf) = record.formation_enthalpy {
            species = species.with_formation_enthalpy(hf);
        }
        species.transport = record.transport.clone();
        Ok(species)
    }

    /// Constant trans-rotational Cp [J/(kg·K)].
    pub fn trans_rot_cp(&self) -> f64 {
        self.particle.trans_rot_cp_over_r() * self.gas_constant
    }

    pub fn is_electron(&self) -> bool {
        self.particle == ParticleType::Electron
    }
}

/// Shared, immutable species arena built once per gas model.
///
/// Cloning is cheap: all clones refer to the same descriptors.
#[derive(Debug, Clone)]
pub struct SpeciesTable {
    species: Arc<[Species]>,
    electron: Option<usize>,
}

impl SpeciesTable {
    pub fn from_species(species: Vec<Species>) -> GasResult<Self> {
        const CONTEXT: &str = "species table";
        if species.is_empty() {
            return Err(ConfigError::missing("species", CONTEXT).into());
        }

        let mut electron = None;
        for (i, sp) in species.iter().enumerate() {
            if species[..i].iter().any(|other| other.name == sp.name) {
                return Err(ConfigError::invalid(
                    "species",
                    CONTEXT,
                    format!("duplicate species name {}", sp.name),
                )
                .into());
            }
            if sp.is_electron() {
                if electron.is_some() {
                    return Err(ConfigError::invalid(
                        "species",
                        CONTEXT,
                        "more than one electron species",
                    )
                    .into());
                }
                electron = Some(i);
            }
        }

        debug!(
            n_species = species.len(),
            has_electrons = electron.is_some(),
            "species table built"
        );
        Ok(Self {
            species: species.into(),
            electron,
        })
    }

    pub fn from_records(records: &[SpeciesRecord]) -> GasResult<Self> {
        let species = records
            .iter()
            .map(Species::from_record)
            .collect::<GasResult<Vec<_>>>()?;
        Self::from_species(species)
    }

    /// Load from a YAML gas-model file body.
    pub fn from_yaml_str(source: &str) -> GasResult<Self> {
        let def: GasModelDef = serde_yaml::from_str(source).map_err(ConfigError::from)?;
        Self::from_records(&def.species)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Species> {
        self.species.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> + '_ {
        self.species.iter()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn molar_masses(&self) -> Vec<f64> {
        self.species.iter().map(|s| s.molar_mass).collect()
    }

    /// Index of the electron species, if the mixture has one.
    pub fn electron_index(&self) -> Option<usize> {
        self.electron
    }
}

impl Index<usize> for SpeciesTable {
    type Output = Species;

    fn index(&self, index: usize) -> &Species {
        &self.species[index]
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    const GAS_FILE: &str = r#"
species:
  - name: N2
    type: linear
    molar_mass: 0.0280134
    thermo:
      type: CEA
      segments:
        - t_lo: 200.0
          t_hi: 1000.0
          coeffs: [2.210371497e4, -3.818461820e2, 6.082738360, -8.530914410e-3,
                   1.384646189e-5, -9.625793620e-9, 2.519705809e-12,
                   7.108460860e2, -1.076003744e1]
    transport:
      viscosity: { type: Sutherland, ref_value: 1.663e-5, t_ref: 273.0, s: 107.0 }
      thermal_conductivity: { type: Sutherland, ref_value: 0.0242, t_ref: 273.0, s: 150.0 }
  - name: e-
    type: electron
    molar_mass: 5.4858e-7
    formation_enthalpy: 0.0
    thermo:
      type: CEA
      segments:
        - t_lo: 200.0
          t_hi: 20000.0
          coeffs: [0.0, 0.0, 2.5, 0.0, 0.0, 0.0, 0.0, -745.375, -11.72081224]
"#;

    #[test]
    fn load_from_yaml() {
        let table = SpeciesTable::from_yaml_str(GAS_FILE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of("N2"), Some(0));
        assert_eq!(table.electron_index(), Some(1));
        assert_eq!(table[0].particle, ParticleType::LinearMolecule);
        assert!(table[0].formation_enthalpy.abs() < 1.0);
        assert!(table[0].transport.is_some());
        assert!(table[1].transport.is_none());
    }

    #[test]
    fn trans_rot_cp_by_particle_type() {
        let table = air_table();
        let n2 = &table[0];
        assert!((n2.trans_rot_cp() - 3.5 * R_UNIVERSAL / M_N2).abs() < 1e-9);
        assert_eq!(ParticleType::Atom.trans_rot_cp_over_r(), 2.5);
        assert_eq!(ParticleType::NonlinearMolecule.trans_rot_cp_over_r(), 4.0);
        assert_eq!(ParticleType::Electron.trans_rot_cp_over_r(), 0.0);
    }

    #[test]
    fn clones_share_descriptors() {
        let table = air_table();
        let clone = table.clone();
        assert!(std::ptr::eq(&table[0], &clone[0]));
    }

    #[test]
    fn reject_duplicates_and_bad_mass() {
        let table = air_table();
        let dup = vec![table[0].clone(), table[0].clone()];
        assert!(SpeciesTable::from_species(dup).is_err());
        assert!(SpeciesTable::from_species(Vec::new()).is_err());

        let curve = table[0].thermo.clone();
        assert!(Species::new("X", ParticleType::Atom, 0.0, curve).is_err());
    }

    #[test]
    fn unknown_particle_type_is_config_error() {
        let bad = GAS_FILE.replace("type: linear", "type: plasma");
        let err = SpeciesTable::from_yaml_str(&bad).unwrap_err();
        assert!(matches!(err, GasError::Config(_)));
    }
}

//! Third-body collision efficiencies and the effective collider concentration.

use crate::error::{KineticsError, KineticsResult};
use std::sync::Arc;
use tc_core::{ConfigError, ConfigTable};
use tc_gas::{GasState, SpeciesTable};

/// One species that takes part as a third body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub index: usize,
    pub efficiency: f64,
    /// Molar mass [kg/mol], copied from the species arena.
    pub molar_mass: f64,
}

/// Per-reaction third-body efficiencies. Only nonzero entries are stored.
///
/// Cloning shares the entries.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyTable {
    colliders: Arc<[Collider]>,
    n_species: usize,
}

impl EfficiencyTable {
    /// Every species with unit efficiency.
    pub fn uniform(species: &SpeciesTable) -> Self {
        let colliders: Vec<Collider> = species
            .iter()
            .enumerate()
            .map(|(index, sp)| Collider {
                index,
                efficiency: 1.0,
                molar_mass: sp.molar_mass,
            })
            .collect();
        Self {
            colliders: colliders.into(),
            n_species: species.len(),
        }
    }

    /// Build from `(species index, efficiency)` pairs. Unlisted species get zero.
    pub fn from_pairs(pairs: &[(usize, f64)], species: &SpeciesTable) -> KineticsResult<Self> {
        let mut colliders = Vec::with_capacity(pairs.len());
        for &(index, efficiency) in pairs {
            let sp = species.get(index).ok_or_else(|| {
                ConfigError::invalid(
                    "efficiencies",
                    "third-body table",
                    format!("species index {index} out of range"),
                )
            })?;
            push_collider(&mut colliders, index, efficiency, sp.molar_mass)?;
        }
        Ok(Self {
            colliders: colliders.into(),
            n_species: species.len(),
        })
    }

    /// Build from an `efficiencies` table keyed by species name or decimal index.
    ///
    /// Species that are not listed keep unit efficiency; listing a species with
    /// zero removes it.
    pub fn from_config(table: &ConfigTable, species: &SpeciesTable) -> KineticsResult<Self> {
        const CONTEXT: &str = "efficiencies";
        let mut efficiency = vec![1.0; species.len()];
        for (key, value) in table.iter() {
            let index = species
                .index_of(key)
                .or_else(|| key.parse::<usize>().ok().filter(|i| *i < species.len()))
                .ok_or_else(|| {
                    ConfigError::invalid(key, CONTEXT, "not a species name or index")
                })?;
            efficiency[index] = value.as_number().ok_or_else(|| ConfigError::WrongType {
                field: key.to_string(),
                context: CONTEXT.to_string(),
                expected: "number",
            })?;
        }

        let mut colliders = Vec::with_capacity(species.len());
        for (index, sp) in species.iter().enumerate() {
            push_collider(&mut colliders, index, efficiency[index], sp.molar_mass)?;
        }
        Ok(Self {
            colliders: colliders.into(),
            n_species: species.len(),
        })
    }

    /// Rejects a state carrying a different number of species.
    pub fn check_state(&self, gs: &GasState) -> KineticsResult<()> {
        if gs.massf.len() != self.n_species {
            return Err(KineticsError::SizeMismatch {
                expected: self.n_species,
                found: gs.massf.len(),
            });
        }
        Ok(())
    }

    /// M = Σ eff_i · y_i ρ / M_i [mol/m³]
    #[inline]
    pub fn concentration(&self, gs: &GasState) -> f64 {
        self.colliders
            .iter()
            .map(|c| c.efficiency * gs.massf[c.index] * gs.rho / c.molar_mass)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collider> + '_ {
        self.colliders.iter()
    }

    /// Efficiency of one species (zero when not a collider).
    pub fn efficiency(&self, index: usize) -> f64 {
        self.colliders
            .iter()
            .find(|c| c.index == index)
            .map_or(0.0, |c| c.efficiency)
    }
}

fn push_collider(
    colliders: &mut Vec<Collider>,
    index: usize,
    efficiency: f64,
    molar_mass: f64,
) -> KineticsResult<()> {
    if !efficiency.is_finite() || efficiency < 0.0 {
        return Err(ConfigError::invalid(
            "efficiencies",
            "third-body table",
            format!("efficiency {efficiency} for species {index} must be finite and non-negative"),
        )
        .into());
    }
    if efficiency != 0.0 {
        colliders.push(Collider {
            index,
            efficiency,
            molar_mass,
        });
    }
    Ok(())
}

//! Reaction rate schemes: ordered forward/backward rate laws.

use crate::error::{KineticsError, KineticsResult};
use crate::rate_law::RateLaw;
use tc_core::{ConfigError, ConfigTable};
use tc_gas::{GasState, SpeciesTable};
use tracing::{debug, info};

/// One reaction's rate laws.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub label: String,
    pub forward: RateLaw,
    /// Absent for irreversible reactions.
    pub backward: Option<RateLaw>,
}

/// An ordered list of reactions sharing one species arena.
#[derive(Debug, Clone)]
pub struct RateScheme {
    species: SpeciesTable,
    reactions: Vec<Reaction>,
}

impl RateScheme {
    pub fn new(species: SpeciesTable, reactions: Vec<Reaction>) -> Self {
        Self { species, reactions }
    }

    /// Parse a `reactions` list. Each entry has a `forward` rate-law table,
    /// an optional `backward` table and an optional `label`.
    pub fn from_config(table: &ConfigTable, species: SpeciesTable) -> KineticsResult<Self> {
        const CONTEXT: &str = "reaction scheme";
        let entries = table.list("reactions", CONTEXT)?;
        let mut reactions = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let context = format!("reaction {i}");
            let entry = entry.as_table().ok_or_else(|| ConfigError::WrongType {
                field: "reactions".to_string(),
                context: context.clone(),
                expected: "table",
            })?;
            let label = match entry.get("label") {
                Some(_) => entry.text("label", &context)?.to_string(),
                None => format!("r{i}"),
            };
            let forward = RateLaw::from_config(entry.table("forward", &context)?, &species)?;
            let backward = entry
                .optional_table("backward", &context)?
                .map(|t| RateLaw::from_config(t, &species))
                .transpose()?;
            debug!(
                reaction = %label,
                forward = forward.model_name(),
                backward = backward.as_ref().map(RateLaw::model_name),
                "reaction parsed"
            );
            reactions.push(Reaction {
                label,
                forward,
                backward,
            });
        }

        info!(n_reactions = reactions.len(), "rate scheme loaded");
        Ok(Self { species, reactions })
    }

    pub fn from_yaml_str(source: &str, species: SpeciesTable) -> KineticsResult<Self> {
        let table = ConfigTable::from_yaml_str(source)?;
        Self::from_config(&table, species)
    }

    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn get(&self, index: usize) -> Option<&Reaction> {
        self.reactions.get(index)
    }

    /// Forward rate constants into `out`, one per reaction.
    pub fn eval_forward(&self, gs: &GasState, out: &mut [f64]) -> KineticsResult<()> {
        self.check_len(out)?;
        for (k, reaction) in out.iter_mut().zip(&self.reactions) {
            *k = reaction.forward.eval(gs)?;
        }
        Ok(())
    }

    /// Backward rate constants into `out`; irreversible reactions give 0.
    pub fn eval_backward(&self, gs: &GasState, out: &mut [f64]) -> KineticsResult<()> {
        self.check_len(out)?;
        for (k, reaction) in out.iter_mut().zip(&self.reactions) {
            *k = match &reaction.backward {
                Some(law) => law.eval(gs)?,
                None => 0.0,
            };
        }
        Ok(())
    }

    fn check_len(&self, out: &[f64]) -> KineticsResult<()> {
        if out.len() != self.reactions.len() {
            return Err(KineticsError::SizeMismatch {
                expected: self.reactions.len(),
                found: out.len(),
            });
        }
        Ok(())
    }
}

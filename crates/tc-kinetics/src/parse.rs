//! Recursive construction of rate laws from a configuration tree.
//!
//! Each rate-law table carries a `model` discriminator. Falloff forms hold
//! `kInf` and `k0` sub-tables and an optional `efficiencies` table;
//! nonequilibrium wrappers hold a nested `rate` table parsed the same way.
//!
//! ```yaml
//! model: Marrone-Treanor
//! U: 18867.0
//! D: 113200.0
//! theta: 3393.0
//! rate: { model: Arrhenius, A: 7.0e15, n: -1.6, C: 113200.0 }
//! ```

use crate::arrhenius::{Arrhenius, TemperatureSource};
use crate::error::KineticsResult;
use crate::falloff::{Falloff, TroeCentering};
use crate::nonequilibrium::{MarroneTreanor, ModifiedMarroneTreanor};
use crate::rate_law::RateLaw;
use crate::third_body::EfficiencyTable;
use tc_core::{ConfigError, ConfigTable};
use tc_gas::SpeciesTable;

impl RateLaw {
    /// Build a rate law from its configuration table.
    ///
    /// Unknown `model` values and missing fields are configuration errors.
    pub fn from_config(table: &ConfigTable, species: &SpeciesTable) -> KineticsResult<Self> {
        let model = table.text("model", "rate law")?;
        match model {
            "Arrhenius" => Ok(RateLaw::Arrhenius {
                rate: Arrhenius::from_config(table, model)?,
                temperature: TemperatureSource::from_config(
                    table,
                    TemperatureSource::TransRotational,
                    model,
                )?,
            }),
            "Arrhenius-log-form" => Ok(RateLaw::ArrheniusLogForm {
                log_a: table.number("logA", model)?,
                b: table.number("B", model)?,
                c: table.number("C", model)?,
            }),
            "Lindemann-Hinshelwood" => Ok(RateLaw::LindemannHinshelwood(parse_falloff(
                table, species, model,
            )?)),
            "Troe" => Ok(RateLaw::Troe {
                falloff: parse_falloff(table, species, model)?,
                centering: parse_troe_centering(table)?,
            }),
            "Yungster-Rabinowitz" => Ok(RateLaw::YungsterRabinowitz {
                falloff: parse_falloff(table, species, model)?,
                a: table.number("a", model)?,
                b: table.number("b", model)?,
                c: table.number("c", model)?,
            }),
            "Park" => Ok(RateLaw::Park {
                rate: Arrhenius::from_config(table, model)?,
                s: table.number("s", model)?,
                vibration: TemperatureSource::from_config(table, TemperatureSource::Mode(0), model)?,
            }),
            "Marrone-Treanor" => Ok(RateLaw::MarroneTreanor {
                inner: Box::new(parse_inner(table, species, model)?),
                coupling: MarroneTreanor {
                    u: table.number("U", model)?,
                    d: positive(table, "D", model)?,
                    theta: positive(table, "theta", model)?,
                    temperature: TemperatureSource::from_config(
                        table,
                        TemperatureSource::Mode(0),
                        model,
                    )?,
                },
            }),
            "Modified-Marrone-Treanor" => Ok(RateLaw::ModifiedMarroneTreanor {
                inner: Box::new(parse_inner(table, species, model)?),
                coupling: ModifiedMarroneTreanor {
                    a_u: table.number("aU", model)?,
                    u_star: table.number("Ustar", model)?,
                    d: positive(table, "D", model)?,
                    theta: positive(table, "theta", model)?,
                    temperature: TemperatureSource::from_config(
                        table,
                        TemperatureSource::Mode(0),
                        model,
                    )?,
                },
            }),
            "fromEqConst" => Ok(RateLaw::FromEqConst),
            other => Err(ConfigError::UnknownDiscriminator {
                field: "model".to_string(),
                value: other.to_string(),
                context: "rate law".to_string(),
            }
            .into()),
        }
    }
}

fn parse_falloff(
    table: &ConfigTable,
    species: &SpeciesTable,
    context: &str,
) -> KineticsResult<Falloff> {
    let k_inf = Arrhenius::from_config(table.table("kInf", context)?, "kInf")?;
    let k0 = Arrhenius::from_config(table.table("k0", context)?, "k0")?;
    let efficiencies = match table.optional_table("efficiencies", context)? {
        Some(eff) => EfficiencyTable::from_config(eff, species)?,
        None => EfficiencyTable::uniform(species),
    };
    Ok(Falloff {
        k_inf,
        k0,
        efficiencies,
    })
}

/// `F_cent` directly, or `a`, `T1`, `T3` and optional `T2`; not both.
fn parse_troe_centering(table: &ConfigTable) -> KineticsResult<TroeCentering> {
    const CONTEXT: &str = "Troe";
    let has_params = ["a", "T1", "T3", "T2"].iter().any(|k| table.contains(k));
    match table.optional_number("F_cent", CONTEXT)? {
        Some(_) if has_params => Err(ConfigError::invalid(
            "F_cent",
            CONTEXT,
            "give either F_cent or a/T1/T3, not both",
        )
        .into()),
        Some(f) if f > 0.0 => Ok(TroeCentering::Constant(f)),
        Some(f) => Err(ConfigError::invalid("F_cent", CONTEXT, format!("{f} must be positive")).into()),
        None => Ok(TroeCentering::Computed {
            a: table.number("a", CONTEXT)?,
            t1: positive(table, "T1", CONTEXT)?,
            t3: positive(table, "T3", CONTEXT)?,
            t2: table.optional_number("T2", CONTEXT)?,
        }),
    }
}

fn parse_inner(
    table: &ConfigTable,
    species: &SpeciesTable,
    context: &str,
) -> KineticsResult<RateLaw> {
    RateLaw::from_config(table.table("rate", context)?, species)
}

fn positive(table: &ConfigTable, key: &str, context: &str) -> KineticsResult<f64> {
    let v = table.number(key, context)?;
    if v.is_nan() || v <= 0.0 {
        return Err(ConfigError::invalid(key, context, format!("{v} must be positive")).into());
    }
    Ok(v)
}

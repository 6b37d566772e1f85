//! The closed family of rate-constant correlations.

use crate::arrhenius::{Arrhenius, TemperatureSource};
use crate::error::{KineticsError, KineticsResult};
use crate::falloff::{Falloff, TroeCentering};
use crate::nonequilibrium::{MarroneTreanor, ModifiedMarroneTreanor};
use tc_gas::GasState;

/// One rate-constant correlation.
///
/// Rate laws are immutable after construction; `clone` gives an independent
/// copy (efficiency tables are shared, nested laws are deep-copied).
#[derive(Debug, Clone, PartialEq)]
pub enum RateLaw {
    /// k = A Tⁿ exp(-C/T), T taken from `temperature`.
    Arrhenius {
        rate: Arrhenius,
        temperature: TemperatureSource,
    },
    /// k = exp(logA + B·T - C/T)
    ArrheniusLogForm { log_a: f64, b: f64, c: f64 },
    LindemannHinshelwood(Falloff),
    Troe {
        falloff: Falloff,
        centering: TroeCentering,
    },
    YungsterRabinowitz {
        falloff: Falloff,
        a: f64,
        b: f64,
        c: f64,
    },
    /// Arrhenius at Teff = Tˢ·Tve^(1-s).
    Park {
        rate: Arrhenius,
        s: f64,
        vibration: TemperatureSource,
    },
    MarroneTreanor {
        inner: Box<RateLaw>,
        coupling: MarroneTreanor,
    },
    ModifiedMarroneTreanor {
        inner: Box<RateLaw>,
        coupling: ModifiedMarroneTreanor,
    },
    /// Reverse rate from an equilibrium constant. Evaluation is not supported.
    FromEqConst,
}

impl RateLaw {
    /// Rate constant at the given state.
    pub fn eval(&self, gs: &GasState) -> KineticsResult<f64> {
        match self {
            RateLaw::Arrhenius { rate, temperature } => Ok(rate.at(temperature.temperature(gs)?)),
            RateLaw::ArrheniusLogForm { log_a, b, c } => {
                let t = gs.t;
                Ok((log_a + b * t - c / t).exp())
            }
            RateLaw::LindemannHinshelwood(falloff) => {
                falloff.check_state(gs)?;
                Ok(falloff.lindemann_hinshelwood(gs))
            }
            RateLaw::Troe { falloff, centering } => {
                falloff.check_state(gs)?;
                Ok(falloff.troe(gs, centering))
            }
            RateLaw::YungsterRabinowitz { falloff, a, b, c } => {
                falloff.check_state(gs)?;
                Ok(falloff.yungster_rabinowitz(gs, *a, *b, *c))
            }
            RateLaw::Park { rate, s, vibration } => {
                let t_ve = vibration.temperature(gs)?;
                let t_eff = gs.t.powf(*s) * t_ve.powf(1.0 - s);
                Ok(rate.at(t_eff))
            }
            RateLaw::MarroneTreanor { inner, coupling } => {
                let t_ve = coupling.temperature.temperature(gs)?;
                Ok(inner.eval(gs)? * coupling.correction(gs.t, t_ve))
            }
            RateLaw::ModifiedMarroneTreanor { inner, coupling } => {
                let t_ve = coupling.temperature.temperature(gs)?;
                Ok(inner.eval(gs)? * coupling.correction(gs.t, t_ve))
            }
            RateLaw::FromEqConst => Err(KineticsError::NotImplemented {
                what: "rate constant from equilibrium constant",
            }),
        }
    }

    /// Configuration discriminator for this variant.
    pub fn model_name(&self) -> &'static str {
        match self {
            RateLaw::Arrhenius { .. } => "Arrhenius",
            RateLaw::ArrheniusLogForm { .. } => "Arrhenius-log-form",
            RateLaw::LindemannHinshelwood(_) => "Lindemann-Hinshelwood",
            RateLaw::Troe { .. } => "Troe",
            RateLaw::YungsterRabinowitz { .. } => "Yungster-Rabinowitz",
            RateLaw::Park { .. } => "Park",
            RateLaw::MarroneTreanor { .. } => "Marrone-Treanor",
            RateLaw::ModifiedMarroneTreanor { .. } => "Modified-Marrone-Treanor",
            RateLaw::FromEqConst => "fromEqConst",
        }
    }
}

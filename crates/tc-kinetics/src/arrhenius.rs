//! Modified Arrhenius rate constants and temperature selection.

use crate::error::{KineticsError, KineticsResult};
use tc_core::{ConfigError, ConfigTable};
use tc_gas::GasState;

/// Which temperature of a gas state a rate expression reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureSource {
    TransRotational,
    /// Index into the internal-mode temperatures (0 is Tve).
    Mode(usize),
}

impl TemperatureSource {
    /// Configuration convention: -1 selects T, non-negative values select a mode.
    pub fn from_mode_index(mode: i64, context: &str) -> KineticsResult<Self> {
        match mode {
            -1 => Ok(Self::TransRotational),
            m if m >= 0 => Ok(Self::Mode(m as usize)),
            m => Err(ConfigError::invalid("mode", context, format!("{m} is not -1 or a mode index"))
                .into()),
        }
    }

    /// Read `mode` from a table, falling back to `default` when absent.
    pub fn from_config(table: &ConfigTable, default: Self, context: &str) -> KineticsResult<Self> {
        if !table.contains("mode") {
            return Ok(default);
        }
        Self::from_mode_index(table.integer("mode", context)?, context)
    }

    #[inline]
    pub fn temperature(self, gs: &GasState) -> KineticsResult<f64> {
        match self {
            Self::TransRotational => Ok(gs.t),
            Self::Mode(i) => gs.t_modes.get(i).copied().ok_or(KineticsError::InvalidMode {
                mode: i,
                n_modes: gs.t_modes.len(),
            }),
        }
    }
}

/// k = A Tⁿ exp(-C/T), C an activation temperature [K].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrhenius {
    pub a: f64,
    pub n: f64,
    pub c: f64,
}

impl Arrhenius {
    pub fn new(a: f64, n: f64, c: f64) -> Self {
        Self { a, n, c }
    }

    /// Reads `A`, `n`, `C`. A negative pre-exponential factor is rejected.
    pub fn from_config(table: &ConfigTable, context: &str) -> KineticsResult<Self> {
        let a = table.number("A", context)?;
        if a.is_nan() || a < 0.0 {
            return Err(ConfigError::invalid("A", context, format!("{a} must be non-negative")).into());
        }
        Ok(Self {
            a,
            n: table.number("n", context)?,
            c: table.number("C", context)?,
        })
    }

    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        self.a * t.powf(self.n) * (-self.c / t).exp()
    }
}

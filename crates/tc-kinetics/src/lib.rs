//! tc-kinetics: reaction rate coefficients for reacting-gas flows.
//!
//! Provides:
//! - Third-body efficiency tables and collider concentration
//! - The closed [`RateLaw`] family: Arrhenius forms, falloff forms and
//!   thermal-nonequilibrium wrappers, evaluated against a [`tc_gas::GasState`]
//! - Recursive construction of rate laws from a configuration tree
//! - [`RateScheme`]: an ordered list of forward/backward rate laws
//!
//! Rate laws are immutable once built and can be evaluated from any number
//! of threads at once.

pub mod arrhenius;
pub mod error;
pub mod falloff;
pub mod nonequilibrium;
pub mod parse;
pub mod rate_law;
pub mod scheme;
pub mod third_body;

pub use arrhenius::{Arrhenius, TemperatureSource};
pub use error::{KineticsError, KineticsResult};
pub use falloff::{Falloff, TroeCentering};
pub use nonequilibrium::{MarroneTreanor, ModifiedMarroneTreanor};
pub use rate_law::RateLaw;
pub use scheme::{RateScheme, Reaction};
pub use third_body::{Collider, EfficiencyTable};

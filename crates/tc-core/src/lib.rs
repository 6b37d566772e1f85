//! tc-core: stable foundation for the thermochemistry crates.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (tolerances + float helpers + logarithm floors)
//! - config (syntax-independent configuration tree)
//! - error (shared error types)

pub mod config;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use config::{ConfigTable, ConfigValue};
pub use error::{ConfigError, ConfigResult, CoreError, CoreResult};
pub use numeric::*;
pub use units::*;

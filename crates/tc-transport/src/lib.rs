//! tc-transport: mixture viscosity and thermal conductivity.
//!
//! Provides:
//! - Per-species elementary transport laws (Sutherland, CEA curve fits)
//! - The Wilke mixing rule
//! - `TransportModel`, which writes mixture viscosity and conductivity into a gas state
//!
//! Mixing rules own scratch buffers and are not reentrant. Give each worker
//! thread its own clone; clones share the per-species laws.

pub mod error;
pub mod laws;
pub mod model;
pub mod wilke;

pub use error::{TransportError, TransportResult};
pub use laws::{CeaTransportCurve, Sutherland, TransportLaw, TransportProperty};
pub use model::TransportModel;
pub use wilke::WilkeMixingRule;

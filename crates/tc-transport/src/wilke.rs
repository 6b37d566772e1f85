//! Wilke's mixing rule for mixture viscosity and thermal conductivity.
//!
//! ```text
//! φ_ij = (1 + sqrt(q_i/q_j)·(M_j/M_i)^¼)² / sqrt(8·(1 + M_i/M_j))
//! q    = Σ_i x_i q_i / Σ_j x_j φ_ij
//! ```

use crate::error::{TransportError, TransportResult};
use crate::laws::TransportLaw;
use nalgebra::DMatrix;
use std::sync::Arc;
use tc_gas::GasState;
use tc_gas::composition::mass_to_mole_fractions;

/// Species whose mole fraction is below this are left out of both sums.
pub const MOLE_FRACTION_SKIP: f64 = 1.0e-15;

/// Wilke mixing rule over per-species laws.
///
/// Holds scratch buffers that every `eval` overwrites, so one instance must
/// not be shared between threads. `clone` copies the buffers and shares the
/// laws and molar masses.
#[derive(Debug, Clone)]
pub struct WilkeMixingRule {
    laws: Arc<[Arc<dyn TransportLaw>]>,
    molar_masses: Arc<[f64]>,
    x: Vec<f64>,
    props: Vec<f64>,
    phi: DMatrix<f64>,
}

impl WilkeMixingRule {
    pub fn new(laws: Vec<Arc<dyn TransportLaw>>, molar_masses: Vec<f64>) -> TransportResult<Self> {
        if laws.is_empty() {
            return Err(TransportError::InvalidArg {
                what: "mixing rule needs at least one species",
            });
        }
        if laws.len() != molar_masses.len() {
            return Err(TransportError::SizeMismatch {
                expected: laws.len(),
                found: molar_masses.len(),
            });
        }
        if molar_masses.iter().any(|m| !(m.is_finite() && *m > 0.0)) {
            return Err(TransportError::InvalidArg {
                what: "molar masses must be positive and finite",
            });
        }
        let n = laws.len();
        Ok(Self {
            laws: laws.into(),
            molar_masses: molar_masses.into(),
            x: vec![0.0; n],
            props: vec![0.0; n],
            phi: DMatrix::zeros(n, n),
        })
    }

    pub fn n_species(&self) -> usize {
        self.laws.len()
    }

    /// Mixture property at the given state.
    pub fn eval(&mut self, gs: &GasState) -> TransportResult<f64> {
        let n = self.laws.len();
        if gs.massf.len() != n {
            return Err(TransportError::SizeMismatch {
                expected: n,
                found: gs.massf.len(),
            });
        }

        mass_to_mole_fractions(&gs.massf, &self.molar_masses, &mut self.x);
        for (prop, law) in self.props.iter_mut().zip(self.laws.iter()) {
            *prop = law.eval(gs);
        }

        let m = &self.molar_masses;
        for i in 0..n {
            for j in 0..n {
                let num = 1.0 + (self.props[i] / self.props[j]).sqrt() * (m[j] / m[i]).powf(0.25);
                self.phi[(i, j)] = num * num / (8.0 * (1.0 + m[i] / m[j])).sqrt();
            }
        }

        let mut mix = 0.0;
        for i in 0..n {
            if self.x[i] < MOLE_FRACTION_SKIP {
                continue;
            }
            let mut denom = 0.0;
            for j in 0..n {
                if self.x[j] < MOLE_FRACTION_SKIP {
                    continue;
                }
                denom += self.x[j] * self.phi[(i, j)];
            }
            mix += self.props[i] * self.x[i] / denom;
        }
        Ok(mix)
    }
}

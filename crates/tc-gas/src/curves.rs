//! Per-species thermodynamic curve evaluators.
//!
//! The thermodynamic model only ever talks to [`ThermoCurve`]; [`CeaThermo`]
//! is the segmented NASA-9 polynomial fit used by the gas-model files, but
//! any evaluator (analytic oscillators in tests, tabulated data) can be
//! plugged into a [`crate::Species`].

use crate::error::{GasError, GasResult};
use serde::{Deserialize, Serialize};
use tc_core::ConfigError;
use tc_core::numeric::ensure_finite;

/// Mass-specific thermodynamic properties of one species as functions of
/// temperature. Enthalpy includes the formation enthalpy; entropy is at the
/// 1 bar standard-state pressure.
pub trait ThermoCurve: Send + Sync + std::fmt::Debug {
    /// Specific heat at constant pressure [J/(kg·K)].
    fn cp(&self, t: f64) -> f64;

    /// Specific enthalpy [J/kg].
    fn enthalpy(&self, t: f64) -> f64;

    /// Standard-state specific entropy [J/(kg·K)].
    fn entropy(&self, t: f64) -> f64;
}

/// Curve-fit description as it appears in a gas-model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ThermoCurveDef {
    #[serde(rename = "CEA")]
    Cea {
        segments: Vec<CeaSegmentDef>,
        /// Width of the linear blend centred on each interior breakpoint [K].
        #[serde(default)]
        blend_width: f64,
    },
}

/// One temperature range of a NASA-9 fit: `a0..a6, b1, b2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeaSegmentDef {
    pub t_lo: f64,
    pub t_hi: f64,
    pub coeffs: [f64; 9],
}

/// Segmented NASA-9 polynomial evaluator.
///
/// Outside the fitted range the heat capacity is held at its end-point value.
#[derive(Debug, Clone)]
pub struct CeaThermo {
    segments: Vec<CeaSegmentDef>,
    half_blend: f64,
    r: f64,
}

impl CeaThermo {
    /// Build from segment definitions and the species gas constant R_i [J/(kg·K)].
    pub fn new(segments: Vec<CeaSegmentDef>, blend_width: f64, r: f64) -> GasResult<Self> {
        const CONTEXT: &str = "CEA thermo curve";
        if segments.is_empty() {
            return Err(ConfigError::missing("segments", CONTEXT).into());
        }
        if !(r > 0.0) {
            return Err(GasError::NonPhysical {
                what: "gas constant must be positive",
            });
        }
        if !(blend_width >= 0.0) {
            return Err(ConfigError::invalid("blend_width", CONTEXT, "must be non-negative").into());
        }
        for seg in &segments {
            if !(seg.t_lo > 0.0 && seg.t_hi > seg.t_lo) {
                return Err(ConfigError::invalid(
                    "segments",
                    CONTEXT,
                    format!("bad range [{}, {}]", seg.t_lo, seg.t_hi),
                )
                .into());
            }
            if blend_width >= seg.t_hi - seg.t_lo {
                return Err(ConfigError::invalid(
                    "blend_width",
                    CONTEXT,
                    "wider than a segment",
                )
                .into());
            }
            for c in &seg.coeffs {
                ensure_finite(*c, "CEA coefficient")?;
            }
        }
        for pair in segments.windows(2) {
            if (pair[0].t_hi - pair[1].t_lo).abs() > 1e-9 * pair[0].t_hi {
                return Err(ConfigError::invalid(
                    "segments",
                    CONTEXT,
                    format!("gap between {} K and {} K", pair[0].t_hi, pair[1].t_lo),
                )
                .into());
            }
        }
        Ok(Self {
            segments,
            half_blend: 0.5 * blend_width,
            r,
        })
    }

    pub fn from_def(def: &ThermoCurveDef, r: f64) -> GasResult<Self> {
        match def {
            ThermoCurveDef::Cea {
                segments,
                blend_width,
            } => Self::new(segments.clone(), *blend_width, r),
        }
    }

    /// Lowest fitted temperature [K].
    pub fn t_min(&self) -> f64 {
        self.segments[0].t_lo
    }

    /// Highest fitted temperature [K].
    pub fn t_max(&self) -> f64 {
        self.segments[self.segments.len() - 1].t_hi
    }

    /// Evaluate `f` at `t` (inside the fitted range), blending across breakpoints.
    fn eval_blended(&self, t: f64, f: impl Fn(&[f64; 9], f64) -> f64) -> f64 {
        let n = self.segments.len();
        let idx = self
            .segments
            .iter()
            .position(|s| t <= s.t_hi)
            .unwrap_or(n - 1);

        if self.half_blend > 0.0 {
            // Blend with the neighbour whose shared breakpoint is within reach.
            if idx + 1 < n {
                let tb = self.segments[idx].t_hi;
                if t > tb - self.half_blend {
                    let w = (t - (tb - self.half_blend)) / (2.0 * self.half_blend);
                    return (1.0 - w) * f(&self.segments[idx].coeffs, t)
                        + w * f(&self.segments[idx + 1].coeffs, t);
                }
            }
            if idx > 0 {
                let tb = self.segments[idx].t_lo;
                if t < tb + self.half_blend {
                    let w = (t - (tb - self.half_blend)) / (2.0 * self.half_blend);
                    return (1.0 - w) * f(&self.segments[idx - 1].coeffs, t)
                        + w * f(&self.segments[idx].coeffs, t);
                }
            }
        }
        f(&self.segments[idx].coeffs, t)
    }

    fn cp_over_r(&self, t: f64) -> f64 {
        self.eval_blended(t.clamp(self.t_min(), self.t_max()), cp_over_r)
    }

    fn h_over_r(&self, t: f64) -> f64 {
        let tc = t.clamp(self.t_min(), self.t_max());
        let h = self.eval_blended(tc, h_over_r);
        h + self.cp_over_r(tc) * (t - tc)
    }

    fn s_over_r(&self, t: f64) -> f64 {
        let tc = t.clamp(self.t_min(), self.t_max());
        let s = self.eval_blended(tc, s_over_r);
        s + self.cp_over_r(tc) * (t / tc).ln()
    }
}

impl ThermoCurve for CeaThermo {
    fn cp(&self, t: f64) -> f64 {
        self.r * self.cp_over_r(t)
    }

    fn enthalpy(&self, t: f64) -> f64 {
        self.r * self.h_over_r(t)
    }

    fn entropy(&self, t: f64) -> f64 {
        self.r * self.s_over_r(t)
    }
}

fn cp_over_r(a: &[f64; 9], t: f64) -> f64 {
    a[0] / (t * t) + a[1] / t + a[2] + t * (a[3] + t * (a[4] + t * (a[5] + t * a[6])))
}

/// h/R in kelvin (the NASA-9 form gives h/(RT)).
fn h_over_r(a: &[f64; 9], t: f64) -> f64 {
    -a[0] / t
        + a[1] * t.ln()
        + t * (a[2] + t * (a[3] / 2.0 + t * (a[4] / 3.0 + t * (a[5] / 4.0 + t * a[6] / 5.0))))
        + a[7]
}

fn s_over_r(a: &[f64; 9], t: f64) -> f64 {
    -a[0] / (2.0 * t * t) - a[1] / t
        + a[2] * t.ln()
        + t * (a[3] + t * (a[4] / 2.0 + t * (a[5] / 3.0 + t * a[6] / 4.0)))
        + a[8]
}

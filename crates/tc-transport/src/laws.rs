//! Elementary (single-species) transport laws.

use crate::error::{TransportError, TransportResult};
use std::sync::Arc;
use tc_core::ConfigError;
use tc_gas::{CeaTransportSegmentDef, GasState, TransportCurveDef};

/// A single-species transport property evaluated at a gas state.
pub trait TransportLaw: Send + Sync + std::fmt::Debug {
    fn eval(&self, gs: &GasState) -> f64;
}

/// Which property a curve fit describes; fixes the unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportProperty {
    Viscosity,
    ThermalConductivity,
}

impl TransportProperty {
    /// CEA fits give μP for viscosity and μW/(cm·K) for conductivity.
    fn cea_scale(self) -> f64 {
        match self {
            TransportProperty::Viscosity => 1.0e-7,
            TransportProperty::ThermalConductivity => 1.0e-4,
        }
    }
}

/// q = q_ref (T/T_ref)^{3/2} (T_ref + S)/(T + S)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sutherland {
    pub ref_value: f64,
    pub t_ref: f64,
    pub s: f64,
}

impl Sutherland {
    pub fn new(ref_value: f64, t_ref: f64, s: f64) -> Self {
        Self {
            ref_value,
            t_ref,
            s,
        }
    }

    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        self.ref_value * (t / self.t_ref).powf(1.5) * (self.t_ref + self.s) / (t + self.s)
    }
}

impl TransportLaw for Sutherland {
    fn eval(&self, gs: &GasState) -> f64 {
        self.at(gs.t)
    }
}

/// Segmented CEA transport fit, ln q = A ln T + B/T + C/T² + D, converted to SI.
///
/// Outside the fitted range the nearest segment is extrapolated.
#[derive(Debug, Clone)]
pub struct CeaTransportCurve {
    segments: Vec<CeaTransportSegmentDef>,
    scale: f64,
}

impl CeaTransportCurve {
    pub fn new(
        segments: Vec<CeaTransportSegmentDef>,
        property: TransportProperty,
    ) -> TransportResult<Self> {
        const CONTEXT: &str = "CEA transport curve";
        if segments.is_empty() {
            return Err(ConfigError::missing("segments", CONTEXT).into());
        }
        for (i, seg) in segments.iter().enumerate() {
            if !(seg.t_lo > 0.0 && seg.t_hi > seg.t_lo) {
                return Err(ConfigError::invalid(
                    "segments",
                    CONTEXT,
                    format!("segment {i} has an invalid range [{}, {}]", seg.t_lo, seg.t_hi),
                )
                .into());
            }
            if i > 0 && seg.t_lo < segments[i - 1].t_hi {
                return Err(
                    ConfigError::invalid("segments", CONTEXT, "segments overlap or are unordered")
                        .into(),
                );
            }
        }
        Ok(Self {
            segments,
            scale: property.cea_scale(),
        })
    }

    fn segment(&self, t: f64) -> &CeaTransportSegmentDef {
        self.segments
            .iter()
            .find(|seg| t <= seg.t_hi)
            .unwrap_or(&self.segments[self.segments.len() - 1])
    }

    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        let seg = self.segment(t);
        let ln_q = seg.a * t.ln() + seg.b / t + seg.c / (t * t) + seg.d;
        self.scale * ln_q.exp()
    }
}

impl TransportLaw for CeaTransportCurve {
    fn eval(&self, gs: &GasState) -> f64 {
        self.at(gs.t)
    }
}

/// Build the evaluator for one species property from its file description.
pub fn law_from_def(
    def: &TransportCurveDef,
    property: TransportProperty,
) -> TransportResult<Arc<dyn TransportLaw>> {
    match def {
        TransportCurveDef::Sutherland { ref_value, t_ref, s } => {
            if !(*ref_value > 0.0 && *t_ref > 0.0) {
                return Err(TransportError::InvalidArg {
                    what: "Sutherland reference value and temperature must be positive",
                });
            }
            Ok(Arc::new(Sutherland::new(*ref_value, *t_ref, *s)))
        }
        TransportCurveDef::Cea { segments } => {
            Ok(Arc::new(CeaTransportCurve::new(segments.clone(), property)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n2_cea_viscosity() -> CeaTransportCurve {
        CeaTransportCurve::new(
            vec![
                CeaTransportSegmentDef {
                    t_lo: 200.0,
                    t_hi: 1000.0,
                    a: 0.62526577,
                    b: -31.779652,
                    c: -1640.7983,
                    d: 1.7454992,
                },
                CeaTransportSegmentDef {
                    t_lo: 1000.0,
                    t_hi: 5000.0,
                    a: 0.87395209,
                    b: 561.52222,
                    c: -173948.09,
                    d: -0.39335958,
                },
            ],
            TransportProperty::Viscosity,
        )
        .unwrap()
    }

    #[test]
    fn sutherland_reference_point() {
        let law = Sutherland::new(1.716e-5, 273.15, 110.4);
        assert!((law.at(273.15) - 1.716e-5).abs() < 1e-20);
        assert!(law.at(600.0) > law.at(300.0));
    }

    #[test]
    fn sutherland_n2_at_300k() {
        let mu = Sutherland::new(1.663e-5, 273.0, 107.0).at(300.0);
        assert!((mu - 1.78863e-5).abs() / 1.78863e-5 < 1e-5, "mu = {mu}");
    }

    #[test]
    fn cea_viscosity_in_si_units() {
        let curve = n2_cea_viscosity();
        let mu = curve.at(300.0);
        assert!(mu > 1.7e-5 && mu < 1.9e-5, "mu = {mu}");
        // Segments join closely at the breakpoint.
        let lo = curve.at(1000.0 - 1e-9);
        let hi = curve.at(1000.0 + 1e-9);
        assert!((lo - hi).abs() / lo < 1e-2);
    }

    #[test]
    fn cea_extrapolates_with_end_segments() {
        let curve = n2_cea_viscosity();
        assert!(curve.at(100.0).is_finite());
        assert!(curve.at(8000.0) > curve.at(5000.0));
    }

    #[test]
    fn cea_rejects_bad_segments() {
        let seg = CeaTransportSegmentDef {
            t_lo: 1000.0,
            t_hi: 500.0,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        };
        assert!(CeaTransportCurve::new(vec![seg], TransportProperty::Viscosity).is_err());
        assert!(CeaTransportCurve::new(Vec::new(), TransportProperty::Viscosity).is_err());
    }

    #[test]
    fn build_from_definition() {
        let def = TransportCurveDef::Sutherland {
            ref_value: 0.0242,
            t_ref: 273.0,
            s: 150.0,
        };
        let law = law_from_def(&def, TransportProperty::ThermalConductivity).unwrap();
        let mut gs = GasState::new(1, 1);
        gs.t = 273.0;
        assert!((law.eval(&gs) - 0.0242).abs() < 1e-15);

        let bad = TransportCurveDef::Sutherland {
            ref_value: -1.0,
            t_ref: 273.0,
            s: 150.0,
        };
        assert!(law_from_def(&bad, TransportProperty::Viscosity).is_err());
    }
}

//! Mass/mole fraction conversions and composition checks.

use crate::error::{GasError, GasResult};

/// Convert mass fractions to mole fractions, writing into `molef`.
///
/// x_i = (y_i / M_i) / Σ_j (y_j / M_j). A composition with no moles
/// yields all-zero mole fractions.
pub fn mass_to_mole_fractions(massf: &[f64], molar_masses: &[f64], molef: &mut [f64]) {
    debug_assert_eq!(massf.len(), molar_masses.len());
    debug_assert_eq!(massf.len(), molef.len());

    let mut total = 0.0;
    for ((x, y), m) in molef.iter_mut().zip(massf).zip(molar_masses) {
        *x = y / m;
        total += *x;
    }
    if total > 0.0 {
        for x in molef.iter_mut() {
            *x /= total;
        }
    } else {
        molef.fill(0.0);
    }
}

/// Convert mole fractions to mass fractions, writing into `massf`.
pub fn mole_to_mass_fractions(molef: &[f64], molar_masses: &[f64], massf: &mut [f64]) {
    debug_assert_eq!(molef.len(), molar_masses.len());
    debug_assert_eq!(molef.len(), massf.len());

    let mut total = 0.0;
    for ((y, x), m) in massf.iter_mut().zip(molef).zip(molar_masses) {
        *y = x * m;
        total += *y;
    }
    if total > 0.0 {
        for y in massf.iter_mut() {
            *y /= total;
        }
    } else {
        massf.fill(0.0);
    }
}

/// Mixture molar mass [kg/mol]: 1 / Σ (y_i / M_i).
pub fn mixture_molar_mass(massf: &[f64], molar_masses: &[f64]) -> f64 {
    let moles: f64 = massf.iter().zip(molar_masses).map(|(y, m)| y / m).sum();
    1.0 / moles
}

/// Validate that mass fractions lie in [0, 1] and sum to one within `tol`.
pub fn validate_mass_fractions(massf: &[f64], tol: f64) -> GasResult<()> {
    if massf.is_empty() {
        return Err(GasError::InvalidArg {
            what: "empty composition",
        });
    }
    let mut sum = 0.0;
    for y in massf {
        if !y.is_finite() {
            return Err(GasError::NonPhysical {
                what: "non-finite mass fraction",
            });
        }
        if *y < -tol || *y > 1.0 + tol {
            return Err(GasError::NonPhysical {
                what: "mass fraction outside [0, 1]",
            });
        }
        sum += y;
    }
    if (sum - 1.0).abs() > tol {
        return Err(GasError::NonPhysical {
            what: "mass fractions do not sum to one",
        });
    }
    Ok(())
}

/// Clamp small negative mass fractions to zero and renormalise.
///
/// Fails if the composition is further than `tol` from summing to one, or
/// if any fraction is more negative than `-tol`.
pub fn scale_mass_fractions(massf: &mut [f64], tol: f64) -> GasResult<()> {
    let mut sum = 0.0;
    for y in massf.iter_mut() {
        if !y.is_finite() || *y < -tol {
            return Err(GasError::NonPhysical {
                what: "mass fraction not scalable",
            });
        }
        *y = y.max(0.0);
        sum += *y;
    }
    if (sum - 1.0).abs() > tol || sum <= 0.0 {
        return Err(GasError::NonPhysical {
            what: "mass fractions too far from summing to one",
        });
    }
    for y in massf.iter_mut() {
        *y /= sum;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::numeric::{Tolerances, nearly_equal};

    const TOL: Tolerances = Tolerances {
        abs: 1e-12,
        rel: 1e-10,
    };

    #[test]
    fn air_mass_to_mole() {
        let massf = [0.8, 0.2];
        let m = [28e-3, 32e-3];
        let mut molef = [0.0; 2];
        mass_to_mole_fractions(&massf, &m, &mut molef);
        assert!(nearly_equal(molef[0], 32.0 / 39.0, TOL));
        assert!(nearly_equal(molef[1], 7.0 / 39.0, TOL));
    }

    #[test]
    fn mole_to_mass_inverts() {
        let m = [28e-3, 32e-3, 4e-3];
        let massf = [0.5, 0.3, 0.2];
        let mut molef = [0.0; 3];
        let mut back = [0.0; 3];
        mass_to_mole_fractions(&massf, &m, &mut molef);
        mole_to_mass_fractions(&molef, &m, &mut back);
        for (a, b) in massf.iter().zip(&back) {
            assert!(nearly_equal(*a, *b, TOL));
        }
    }

    #[test]
    fn zero_composition_gives_zero_mole_fractions() {
        let mut molef = [1.0; 2];
        mass_to_mole_fractions(&[0.0, 0.0], &[1.0, 2.0], &mut molef);
        assert_eq!(molef, [0.0, 0.0]);
    }

    #[test]
    fn molar_mass_of_mixture() {
        let mm = mixture_molar_mass(&[0.5, 0.5], &[28e-3, 28e-3]);
        assert!(nearly_equal(mm, 28e-3, TOL));
    }

    #[test]
    fn validation_rules() {
        assert!(validate_mass_fractions(&[0.7, 0.3], 1e-6).is_ok());
        assert!(validate_mass_fractions(&[0.7, 0.2], 1e-6).is_err());
        assert!(validate_mass_fractions(&[1.2, -0.2], 1e-6).is_err());
        assert!(validate_mass_fractions(&[f64::NAN, 1.0], 1e-6).is_err());
        assert!(validate_mass_fractions(&[], 1e-6).is_err());
    }

    #[test]
    fn scaling_clamps_and_normalises() {
        let mut massf = [0.7, 0.3000005, -1e-8];
        scale_mass_fractions(&mut massf, 1e-6).unwrap();
        assert_eq!(massf[2], 0.0);
        let sum: f64 = massf.iter().sum();
        assert!(nearly_equal(sum, 1.0, TOL));

        let mut bad = [0.5, 0.2];
        assert!(scale_mass_fractions(&mut bad, 1e-6).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use tc_core::numeric::{Tolerances, nearly_equal};

    proptest! {
        #[test]
        fn mole_fractions_sum_to_one(
            fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..6),
            masses in prop::collection::vec(1e-3_f64..0.2_f64, 6),
        ) {
            let n = fracs.len();
            let total: f64 = fracs.iter().sum();
            prop_assume!(total > 1e-6);
            let massf: Vec<f64> = fracs.iter().map(|f| f / total).collect();
            let mut molef = vec![0.0; n];
            mass_to_mole_fractions(&massf, &masses[..n], &mut molef);
            let sum: f64 = molef.iter().sum();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(sum, 1.0, tol));
            prop_assert!(molef.iter().all(|x| *x >= 0.0 && *x <= 1.0 + 1e-12));
        }
    }
}

//! Stochastic energy resolution modelling
//!
//! A calorimeter compartment measures an energy E with a standard deviation
//! described by the classic three-term parameterization
//!
//! ```text
//! sigma = sqrt((constant * E)^2 + stochastic^2 * E + noise^2)
//! ```
//!
//! with coefficients that depend on where the tower sits in pseudorapidity.
//! The smeared measurement itself is drawn from a log-normal distribution
//! matched to the true energy and this sigma, which keeps every sampled
//! energy non-negative no matter how large sigma is configured.

use crate::{numeric::functions::sqr, numeric::Float, random::RandomGenerator};
use prefix_num_ops::real::*;
use serde::Deserialize;

/// One pseudorapidity slice of a resolution formula
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ResolutionTerm {
    /// Lower |eta| bound of the slice
    #[serde(default)]
    pub eta_min: Float,

    /// Upper |eta| bound of the slice
    pub eta_max: Float,

    /// Stochastic (sampling) coefficient, in sqrt(energy) units
    #[serde(default)]
    pub stochastic: Float,

    /// Constant coefficient, relative to the energy
    #[serde(default)]
    pub constant: Float,

    /// Noise coefficient, in energy units
    #[serde(default)]
    pub noise: Float,
}

/// Piecewise-in-|eta| energy resolution formula
///
/// An empty formula evaluates to sigma = 0 everywhere, i.e. no smearing.
///
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ResolutionFormula {
    terms: Vec<ResolutionTerm>,
}
//
impl ResolutionFormula {
    /// Build a formula from its pseudorapidity slices
    pub fn new(terms: Vec<ResolutionTerm>) -> Self {
        Self { terms }
    }

    /// Evaluate the resolution at a given pseudorapidity and energy
    ///
    /// The first term whose [eta_min, eta_max) range contains |eta| wins;
    /// towers outside every configured range are measured perfectly.
    ///
    pub fn eval(&self, eta: Float, energy: Float) -> Float {
        let abs_eta = abs(eta);
        self.terms
            .iter()
            .find(|term| abs_eta >= term.eta_min && abs_eta < term.eta_max)
            .map_or(0., |term| {
                sqrt(sqr(term.constant * energy) + sqr(term.stochastic) * energy + sqr(term.noise))
            })
    }
}

/// Draw a log-normally distributed energy with the given mean and sigma
///
/// The distribution parameters are chosen so that the sample has the
/// requested mean and standard deviation. A non-positive mean yields exactly
/// 0 without consuming a random draw.
///
pub fn log_normal(mean: Float, sigma: Float, rng: &mut RandomGenerator) -> Float {
    if mean > 0. {
        let b = sqrt(ln(1. + sqr(sigma / mean)));
        let a = ln(mean) - sqr(b) / 2.;
        exp(a + b * rng.normal())
    } else {
        0.
    }
}

/// Clamp an energy to 0 unless it passes its detection floors
///
/// An energy below the absolute floor, or below `significance_min` standard
/// deviations, is considered undetected.
///
pub fn apply_floors(energy: Float, sigma: Float, energy_min: Float, significance_min: Float) -> Float {
    if energy < energy_min || energy < significance_min * sigma {
        0.
    } else {
        energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_formula_is_a_perfect_measurement() {
        assert_eq!(ResolutionFormula::default().eval(1.0, 100.), 0.);
    }

    #[test]
    fn terms_select_on_absolute_pseudorapidity() {
        let formula = ResolutionFormula::new(vec![
            ResolutionTerm {
                eta_min: 0.,
                eta_max: 1.5,
                stochastic: 0.,
                constant: 0.01,
                noise: 0.,
            },
            ResolutionTerm {
                eta_min: 1.5,
                eta_max: 3.,
                stochastic: 0.,
                constant: 0.05,
                noise: 0.,
            },
        ]);
        assert_relative_eq!(formula.eval(-1.0, 100.), 1.);
        assert_relative_eq!(formula.eval(2.0, 100.), 5.);
        assert_eq!(formula.eval(4.0, 100.), 0.);
    }

    #[test]
    fn quadrature_sum_of_the_three_terms() {
        let formula = ResolutionFormula::new(vec![ResolutionTerm {
            eta_min: 0.,
            eta_max: 5.,
            stochastic: 0.5,
            constant: 0.03,
            noise: 2.,
        }]);
        let energy = 100.;
        let expected = (sqr(0.03 * energy) + sqr(0.5) * energy + sqr(2.)).sqrt();
        assert_relative_eq!(formula.eval(0.5, energy), expected, max_relative = 1e-12);
    }

    #[test]
    fn log_normal_of_zero_mean_is_zero() {
        let mut rng = RandomGenerator::new(1);
        assert_eq!(log_normal(0., 5., &mut rng), 0.);
        assert_eq!(log_normal(-1., 5., &mut rng), 0.);
    }

    #[test]
    fn log_normal_is_non_negative_and_exact_at_zero_sigma() {
        let mut rng = RandomGenerator::new(2);
        for _ in 0..1000 {
            assert!(log_normal(10., 30., &mut rng) >= 0.);
        }
        assert_relative_eq!(log_normal(10., 0., &mut rng), 10., max_relative = 1e-12);
    }

    #[test]
    fn floors_clamp_to_zero() {
        assert_eq!(apply_floors(1., 0., 2., 0.), 0.);
        assert_eq!(apply_floors(1., 1., 0., 2.), 0.);
        assert_eq!(apply_floors(3., 1., 2., 2.), 3.);
    }
}

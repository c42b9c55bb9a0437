//! Bernoulli distribution utilities on the logit scale.

use crate::math::log1pexp;
use hl_core::{Error, Result};

/// Log-PMF of a Bernoulli distribution at `k ∈ {0, 1}` with success
/// probability `sigmoid(eta)`, evaluated on the logit scale:
///
/// `log p(k | eta) = k*eta - log(1 + exp(eta))`
///
/// Stable for arbitrarily large `|eta|`: never forms `sigmoid(eta)` and never
/// takes `ln` of a quantity that can underflow to 0.
pub fn logpmf_logit(k: u8, eta: f64) -> Result<f64> {
    if !eta.is_finite() {
        return Err(Error::Validation(format!("eta must be finite, got {}", eta)));
    }
    match k {
        0 => Ok(-log1pexp(eta)),
        1 => Ok(eta - log1pexp(eta)),
        _ => Err(Error::Validation(format!("k must be 0 or 1, got {}", k))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_probability_scale_moderate_eta() {
        for eta in [-3.0, -0.5, 0.0, 0.5, 3.0] {
            let p = 1.0 / (1.0 + (-eta as f64).exp());
            assert!((logpmf_logit(1, eta).unwrap() - p.ln()).abs() < 1e-12);
            assert!((logpmf_logit(0, eta).unwrap() - (1.0 - p).ln()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_finite_at_extreme_eta() {
        for eta in [-750.0, -50.0, 50.0, 750.0] {
            assert!(logpmf_logit(0, eta).unwrap().is_finite(), "eta={}", eta);
            assert!(logpmf_logit(1, eta).unwrap().is_finite(), "eta={}", eta);
        }
        // log p(1 | eta) -> 0 as eta -> +inf, -> eta as eta -> -inf
        assert!(logpmf_logit(1, 750.0).unwrap().abs() < 1e-12);
        assert!((logpmf_logit(1, -750.0).unwrap() + 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(logpmf_logit(2, 0.0).is_err());
        assert!(logpmf_logit(0, f64::NAN).is_err());
        assert!(logpmf_logit(1, f64::INFINITY).is_err());
    }

    #[test]
    fn test_at_zero_eta() {
        let half = 0.5f64.ln();
        assert!((logpmf_logit(0, 0.0).unwrap() - half).abs() < 1e-15);
        assert!((logpmf_logit(1, 0.0).unwrap() - half).abs() < 1e-15);
    }
}

//! Prior over the hyperparameter block `phi`.
//!
//! The original experiment passes the prior around in natural (precision)
//! form, so the density is a quadratic form with no per-call inversion.
//! Whether the normalizing constant is carried is a configuration choice:
//! relative densities suffice for MCMC, while normalized densities are needed
//! if the sampler's output feeds model comparison.

use hl_core::{Error, Result};
use hl_prob::MvNormalPrec;

/// Multivariate normal prior on `phi`, parameterized by precision.
#[derive(Debug, Clone)]
pub struct HyperPrior {
    mvn: MvNormalPrec,
    include_constants: bool,
}

impl HyperPrior {
    /// Create from a mean vector and a row-wise precision matrix.
    ///
    /// The precision must be symmetric positive-definite; this is validated
    /// once here via Cholesky. Normalizing constants default to off.
    pub fn new(mean: Vec<f64>, precision: Vec<Vec<f64>>) -> Result<Self> {
        let mvn = MvNormalPrec::new(mean, precision)?;
        Ok(Self { mvn, include_constants: false })
    }

    /// Toggle the normalizing constants of the whole prior stage.
    ///
    /// Applies to this multivariate normal *and* (via the model) to the
    /// standard-normal offset priors, so the choice is consistent.
    pub fn with_normalizing_constants(mut self, include: bool) -> Self {
        self.include_constants = include;
        self
    }

    /// Whether normalizing constants are carried.
    pub fn includes_constants(&self) -> bool {
        self.include_constants
    }

    /// Dimension of `phi` this prior expects (`2D + 2`).
    pub fn dim(&self) -> usize {
        self.mvn.dim()
    }

    /// Prior mean of `phi`.
    pub fn mean(&self) -> &[f64] {
        self.mvn.mean()
    }

    /// Log-density of `phi` under the prior (kernel or normalized, per
    /// configuration).
    pub fn log_density(&self, phi: &[f64]) -> Result<f64> {
        if self.include_constants {
            self.mvn.logpdf(phi)
        } else {
            self.mvn.log_kernel(phi)
        }
    }

    /// Accumulate the gradient of the log-prior into `out[i] += ...`.
    pub fn accumulate_grad(&self, phi: &[f64], out: &mut [f64]) -> Result<()> {
        self.mvn.accumulate_grad_log(phi, out)
    }

    /// Validate that this prior matches a model with `n_features` covariates.
    pub fn check_features(&self, n_features: usize) -> Result<()> {
        let expected = 2 * n_features + 2;
        if self.dim() != expected {
            return Err(Error::Validation(format!(
                "prior dimension must be 2D+2={} for D={} covariates, got {}",
                expected,
                n_features,
                self.dim()
            )));
        }
        Ok(())
    }
}

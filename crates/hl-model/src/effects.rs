//! Transform stage: derived per-group coefficients.
//!
//! Deterministic, side-effect-free map from the sampled vector to the
//! interpretable group-level intercepts and slopes via the non-centered
//! parameterization:
//!
//! ```text
//! alpha[j]   = mu_alpha   + eta[j]     * exp(log_sigma_alpha)
//! beta[j][d] = mu_beta[d] + z[j][d]    * exp(log_sigma_beta[d])
//! ```
//!
//! Sampling the standardized offsets independently of the scales avoids the
//! funnel geometry that centered hierarchical parameterizations expose to
//! gradient-based samplers. The prior is declared on the sampled vector, so
//! this transform carries no Jacobian term; it is recomputed on every density
//! query and never cached.

use crate::params::ParamLayout;

/// Per-group intercepts and slopes derived from one parameter vector.
#[derive(Debug, Clone)]
pub struct GroupEffects {
    n_features: usize,
    alpha: Vec<f64>,      // length J
    beta: Vec<f64>,       // length J*D, row-major by group
}

impl GroupEffects {
    /// Compute the effects from split parameter views.
    ///
    /// `phi`, `eta`, `z` must come from [`ParamLayout::split`].
    pub fn from_params(layout: &ParamLayout, phi: &[f64], eta: &[f64], z: &[f64]) -> Self {
        let d = layout.n_features;
        let j_n = layout.n_groups;
        let sigma_alpha = phi[ParamLayout::LOG_SIGMA_ALPHA].exp();
        let mu_alpha = phi[ParamLayout::MU_ALPHA];

        let mut alpha = Vec::with_capacity(j_n);
        for j in 0..j_n {
            alpha.push(mu_alpha + eta[j] * sigma_alpha);
        }

        let mut sigma_beta = Vec::with_capacity(d);
        for k in 0..d {
            sigma_beta.push(phi[layout.log_sigma_beta(k)].exp());
        }

        let mut beta = Vec::with_capacity(j_n * d);
        for j in 0..j_n {
            for k in 0..d {
                beta.push(phi[layout.mu_beta(k)] + z[j * d + k] * sigma_beta[k]);
            }
        }

        Self { n_features: d, alpha, beta }
    }

    /// Group intercepts `alpha[0..J]`.
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Slope vector of group `j`.
    #[inline]
    pub fn beta_row(&self, j: usize) -> &[f64] {
        let start = j * self.n_features;
        &self.beta[start..start + self.n_features]
    }
}

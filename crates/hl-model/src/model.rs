//! Hierarchical Bernoulli-logit model with group-varying intercepts and slopes.
//!
//! Model (non-centered parameterization):
//!
//! ```text
//! y_n ~ BernoulliLogit(alpha_{g(n)} + x_n · beta_{g(n)})
//! alpha_j   = mu_alpha   + eta_j    * exp(log_sigma_alpha)
//! beta_j[d] = mu_beta[d] + z_j[d]   * exp(log_sigma_beta[d])
//! phi = [mu_alpha, log_sigma_alpha, mu_beta, log_sigma_beta] ~ N(m, P⁻¹)
//! eta_j ~ N(0,1),  z_j[d] ~ N(0,1)
//! ```
//!
//! The whole parameter vector lives in unconstrained space, so a sampler
//! needs no constraint transforms of its own. The density and its analytic
//! gradient are pure functions of the parameter vector: one forward pass of
//! prior → transform → likelihood, recomputed per call.

use hl_core::traits::{LogDensityModel, PreparedModelRef};
use hl_core::{Error, Result};
use hl_prob::bernoulli::logpmf_logit;
use hl_prob::math::{log1pexp_and_sigmoid, sigmoid};
use hl_prob::normal::{std_log_kernel, LN_SQRT_2PI};

use crate::data::GroupedDataset;
use crate::effects::GroupEffects;
use crate::params::ParamLayout;
use crate::prior::HyperPrior;

#[inline]
fn row_dot(x_row: &[f64], beta: &[f64]) -> f64 {
    debug_assert_eq!(x_row.len(), beta.len());
    x_row.iter().zip(beta).map(|(&x, &b)| x * b).sum()
}

/// Hierarchical logistic regression posterior over `(phi, eta, z_beta)`.
#[derive(Debug, Clone)]
pub struct HierLogitModel {
    data: GroupedDataset,
    prior: HyperPrior,
    layout: ParamLayout,
}

impl HierLogitModel {
    /// Create a model from an immutable dataset and a hyperprior.
    ///
    /// The prior dimension must be `2D+2` for the dataset's `D` covariates.
    /// All fixed-input validation happened when `data` and `prior` were
    /// constructed; evaluations assume those invariants.
    pub fn new(data: GroupedDataset, prior: HyperPrior) -> Result<Self> {
        prior.check_features(data.n_features())?;
        let layout = ParamLayout {
            n_features: data.n_features(),
            n_groups: data.n_groups(),
        };
        Ok(Self { data, prior, layout })
    }

    /// Parameter-vector layout of this model.
    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    #[inline]
    fn check_params(&self, params: &[f64]) -> Result<()> {
        if params.len() != self.layout.dim() {
            return Err(Error::Validation(format!(
                "expected {} parameters, got {}",
                self.layout.dim(),
                params.len()
            )));
        }
        if params.iter().any(|v| !v.is_finite()) {
            return Err(Error::Validation("params must contain only finite values".to_string()));
        }
        Ok(())
    }

    /// Derived per-group intercepts and slopes at `params` (transform stage).
    pub fn group_effects(&self, params: &[f64]) -> Result<GroupEffects> {
        self.check_params(params)?;
        let (phi, eta, z) = self.layout.split(params);
        Ok(GroupEffects::from_params(&self.layout, phi, eta, z))
    }

    /// Prior stage: MVN on `phi` plus standard-normal offsets.
    fn log_prior(&self, phi: &[f64], eta: &[f64], z: &[f64]) -> Result<f64> {
        let mut lp = self.prior.log_density(phi)?;
        for &e in eta {
            lp += std_log_kernel(e);
        }
        for &v in z {
            lp += std_log_kernel(v);
        }
        if self.prior.includes_constants() {
            lp -= ((eta.len() + z.len()) as f64) * LN_SQRT_2PI;
        }
        Ok(lp)
    }

    /// Likelihood stage: Bernoulli-logit over all observations.
    fn log_likelihood(&self, fx: &GroupEffects) -> Result<f64> {
        let mut ll = 0.0;
        for i in 0..self.data.n_obs() {
            let j = self.data.group_idx()[i];
            let f = fx.alpha()[j] + row_dot(self.data.row(i), fx.beta_row(j));
            ll += logpmf_logit(self.data.y()[i], f)?;
        }
        Ok(ll)
    }

    /// Shared gradient accumulation; `value` receives the log-density when
    /// the caller wants the fused pass.
    fn accumulate(&self, params: &[f64], mut value: Option<&mut f64>) -> Result<Vec<f64>> {
        let (phi, eta, z) = self.layout.split(params);
        let l = &self.layout;
        let d = l.n_features;

        let mut grad = vec![0.0; l.dim()];

        // Prior stage.
        self.prior.accumulate_grad(phi, &mut grad[..l.dim_phi()])?;
        for (j, &e) in eta.iter().enumerate() {
            grad[l.eta(j)] -= e;
        }
        for j in 0..l.n_groups {
            for k in 0..d {
                grad[l.z_beta(j, k)] -= z[j * d + k];
            }
        }
        if let Some(v) = value.as_deref_mut() {
            *v = self.log_prior(phi, eta, z)?;
        }

        // Transform stage, shared by every observation of a group.
        let sigma_alpha = phi[ParamLayout::LOG_SIGMA_ALPHA].exp();
        let mut sigma_beta = Vec::with_capacity(d);
        for k in 0..d {
            sigma_beta.push(phi[l.log_sigma_beta(k)].exp());
        }
        let fx = GroupEffects::from_params(l, phi, eta, z);

        // Likelihood stage: chain rule through the non-centered transform.
        for i in 0..self.data.n_obs() {
            let j = self.data.group_idx()[i];
            let row = self.data.row(i);
            let f = fx.alpha()[j] + row_dot(row, fx.beta_row(j));
            let yi = self.data.y()[i] as f64;

            let err = match value.as_deref_mut() {
                Some(v) => {
                    let (lse, mu) = log1pexp_and_sigmoid(f);
                    *v += yi * f - lse;
                    yi - mu
                }
                None => yi - sigmoid(f),
            };

            grad[ParamLayout::MU_ALPHA] += err;
            grad[ParamLayout::LOG_SIGMA_ALPHA] += err * eta[j] * sigma_alpha;
            grad[l.eta(j)] += err * sigma_alpha;
            for k in 0..d {
                let xv = row[k];
                grad[l.mu_beta(k)] += err * xv;
                grad[l.log_sigma_beta(k)] += err * xv * z[j * d + k] * sigma_beta[k];
                grad[l.z_beta(j, k)] += err * xv * sigma_beta[k];
            }
        }

        Ok(grad)
    }
}

impl LogDensityModel for HierLogitModel {
    type Prepared<'a>
        = PreparedModelRef<'a, Self>
    where
        Self: 'a;

    fn dim(&self) -> usize {
        self.layout.dim()
    }

    fn parameter_names(&self) -> Vec<String> {
        self.layout.names()
    }

    fn parameter_bounds(&self) -> Vec<(f64, f64)> {
        vec![(f64::NEG_INFINITY, f64::INFINITY); self.layout.dim()]
    }

    fn parameter_init(&self) -> Vec<f64> {
        // Zeros sit at the offset-prior mode with unit scales (log-scale 0).
        vec![0.0; self.layout.dim()]
    }

    fn log_density(&self, params: &[f64]) -> Result<f64> {
        self.check_params(params)?;
        let (phi, eta, z) = self.layout.split(params);
        let fx = GroupEffects::from_params(&self.layout, phi, eta, z);
        Ok(self.log_prior(phi, eta, z)? + self.log_likelihood(&fx)?)
    }

    fn grad_log_density(&self, params: &[f64]) -> Result<Vec<f64>> {
        self.check_params(params)?;
        self.accumulate(params, None)
    }

    fn prepared(&self) -> Self::Prepared<'_> {
        PreparedModelRef::new(self)
    }

    fn prefer_fused_eval_grad(&self) -> bool {
        true
    }

    fn log_density_grad_prepared(
        &self,
        _prepared: &Self::Prepared<'_>,
        params: &[f64],
    ) -> Result<(f64, Vec<f64>)> {
        self.check_params(params)?;
        let mut value = 0.0;
        let grad = self.accumulate(params, Some(&mut value))?;
        Ok((value, grad))
    }
}

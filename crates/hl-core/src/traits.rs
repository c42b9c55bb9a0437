//! Core traits for hierlogit
//!
//! This module defines the boundary between model code and generic
//! gradient-based samplers: a sampler sees only [`LogDensityModel`],
//! never a concrete model type.

use crate::Result;

/// Prepared log-density evaluator.
///
/// Some models can precompute constants (observations, Cholesky factors, etc.)
/// to speed up repeated density evaluations. Samplers should prefer
/// `prepared().log_density(...)` when evaluating many points.
pub trait PreparedLogDensity: Send + Sync {
    /// Unnormalized log-density at `params`.
    fn log_density(&self, params: &[f64]) -> Result<f64>;
}

/// Default prepared wrapper that forwards to the model's `log_density`.
#[derive(Debug, Clone, Copy)]
pub struct PreparedModelRef<'a, M: LogDensityModel + ?Sized> {
    model: &'a M,
}

impl<'a, M: LogDensityModel + ?Sized> PreparedModelRef<'a, M> {
    /// Create a new prepared wrapper that forwards `log_density` to the model.
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }
}

impl<M: LogDensityModel + ?Sized> PreparedLogDensity for PreparedModelRef<'_, M> {
    fn log_density(&self, params: &[f64]) -> Result<f64> {
        self.model.log_density(params)
    }
}

/// Universal model interface for gradient-based samplers.
///
/// A model is a pure function over an unconstrained parameter vector: it reads
/// only its immutable fixed inputs plus the `params` slice passed in, so any
/// number of chains may evaluate it concurrently without synchronization.
pub trait LogDensityModel: Send + Sync {
    /// Prepared evaluator type (can cache constants).
    ///
    /// If a model has nothing to cache, use:
    /// `type Prepared<'a> = PreparedModelRef<'a, Self> where Self: 'a;`
    type Prepared<'a>: PreparedLogDensity + 'a
    where
        Self: 'a;

    /// Number of parameters.
    fn dim(&self) -> usize;

    /// Parameter names (stable order).
    fn parameter_names(&self) -> Vec<String>;

    /// Parameter bounds (min, max) (stable order).
    fn parameter_bounds(&self) -> Vec<(f64, f64)>;

    /// Suggested initial values (stable order).
    fn parameter_init(&self) -> Vec<f64>;

    /// Unnormalized log-density.
    fn log_density(&self, params: &[f64]) -> Result<f64>;

    /// Gradient of the log-density.
    fn grad_log_density(&self, params: &[f64]) -> Result<Vec<f64>>;

    /// Create a prepared evaluator.
    fn prepared(&self) -> Self::Prepared<'_>;

    /// Hint: prefer evaluating density and gradient together in one call.
    ///
    /// Some models can compute `log_density` and `grad_log_density` in a single
    /// fused pass (e.g. per-observation likelihoods where the link function and
    /// its derivative share an exponential). When this returns `true`, a sampler
    /// should call [`Self::log_density_grad_prepared`] at each integrator step.
    ///
    /// Default is `false` for conservative performance (avoid computing
    /// gradients on density-only evaluations).
    fn prefer_fused_eval_grad(&self) -> bool {
        false
    }

    /// Compute log-density and gradient, optionally using prepared caches.
    ///
    /// The default implementation uses `prepared.log_density(params)` and
    /// `self.grad_log_density(params)`. Models that can compute both in a
    /// fused pass should override this.
    fn log_density_grad_prepared(
        &self,
        prepared: &Self::Prepared<'_>,
        params: &[f64],
    ) -> Result<(f64, Vec<f64>)> {
        Ok((prepared.log_density(params)?, self.grad_log_density(params)?))
    }
}

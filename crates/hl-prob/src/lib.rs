//! Probability building blocks for hierlogit.
//!
//! This crate hosts reusable probability math used by the model layer:
//! - small numeric helpers (stable log/exp/sigmoid primitives)
//! - Bernoulli log-PMF on the logit scale
//! - normal log-densities, including a precision-parameterized
//!   multivariate normal

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bernoulli;
pub mod math;
pub mod mvn;
pub mod normal;

pub use mvn::MvNormalPrec;

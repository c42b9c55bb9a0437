//! # hl-model
//!
//! Hierarchical Bayesian logistic regression with group-varying intercepts
//! and slopes, exposed as an unnormalized log-posterior density (and analytic
//! gradient) through the [`hl_core::LogDensityModel`] trait.
//!
//! This crate deliberately ends at the density boundary: samplers, data
//! loading, and posterior summarization are external collaborators that query
//! [`HierLogitModel`] through the trait, potentially from many chains in
//! parallel: every evaluation is a pure function of the parameter vector.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod effects;
pub mod model;
pub mod params;
pub mod prior;

pub use data::GroupedDataset;
pub use effects::GroupEffects;
pub use model::HierLogitModel;
pub use params::ParamLayout;
pub use prior::HyperPrior;

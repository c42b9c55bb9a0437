//! # hl-core
//!
//! Core types and traits for hierlogit.
//!
//! This crate provides:
//! - Common error types
//! - The [`LogDensityModel`] trait boundary between models and samplers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{LogDensityModel, PreparedLogDensity, PreparedModelRef};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

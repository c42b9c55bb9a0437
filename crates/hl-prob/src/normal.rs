//! Normal distribution utilities.

use hl_core::{Error, Result};

/// Natural log of `sqrt(2π)`.
///
/// `ln(sqrt(2π)) = 0.5*ln(2π)` (precomputed to keep this crate const-friendly).
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Log-PDF of a Normal distribution `N(mu, sigma)` at `x`.
///
/// `log p(x) = -0.5 * ((x-mu)/sigma)^2 - ln(sigma) - ln(sqrt(2π))`
pub fn logpdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::Validation(format!("sigma must be finite and > 0, got {}", sigma)));
    }
    let z = (x - mu) / sigma;
    Ok(-0.5 * z * z - sigma.ln() - LN_SQRT_2PI)
}

/// Log-PDF of a standard Normal at `x`, without the `-ln(sqrt(2π))` constant.
///
/// Summed over a vector of standardized offsets this is the kernel of their
/// joint prior; callers that need the normalized density add `LN_SQRT_2PI`
/// per component.
#[inline]
pub fn std_log_kernel(x: f64) -> f64 {
    -0.5 * x * x
}

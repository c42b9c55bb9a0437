//! Multivariate normal parameterized directly by its precision matrix.
//!
//! The precision (inverse-covariance) form evaluates the log-density as a
//! quadratic form `-½ (x-m)ᵀ P (x-m)` without any matrix inversion per call.
//! The Cholesky factorization is computed once at construction; it both
//! validates positive-definiteness and yields the log-determinant needed for
//! the normalizing constant.

use hl_core::{Error, Result};
use nalgebra::{Cholesky, DMatrix};

use crate::normal::LN_SQRT_2PI;

/// Relative asymmetry tolerated before a precision matrix is rejected.
const SYMMETRY_RTOL: f64 = 1e-10;

/// Multivariate normal distribution `N(mean, P⁻¹)` with precision matrix `P`.
#[derive(Debug, Clone)]
pub struct MvNormalPrec {
    mean: Vec<f64>,
    prec: DMatrix<f64>,
    /// `½ log det P`, from the Cholesky factor at construction.
    half_logdet: f64,
}

impl MvNormalPrec {
    /// Create from a mean vector and a row-wise precision matrix.
    ///
    /// Validates dimensions, finiteness, symmetry, and positive-definiteness
    /// (via Cholesky). These checks run once at setup; per-call evaluation
    /// assumes they hold.
    pub fn new(mean: Vec<f64>, precision: Vec<Vec<f64>>) -> Result<Self> {
        let k = mean.len();
        if k == 0 {
            return Err(Error::Validation("mean must be non-empty".to_string()));
        }
        if mean.iter().any(|v| !v.is_finite()) {
            return Err(Error::Validation("mean must contain only finite values".to_string()));
        }
        if precision.len() != k {
            return Err(Error::Validation(format!(
                "precision has wrong row count: expected {}, got {}",
                k,
                precision.len()
            )));
        }
        let mut flat = Vec::with_capacity(k * k);
        for (i, row) in precision.iter().enumerate() {
            if row.len() != k {
                return Err(Error::Validation(format!(
                    "precision row {} has len {}, expected {}",
                    i,
                    row.len(),
                    k
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::Validation(
                    "precision must contain only finite values".to_string(),
                ));
            }
            flat.extend_from_slice(row);
        }

        let prec = DMatrix::from_row_slice(k, k, &flat);
        let max_abs = prec.iter().fold(0.0f64, |a, &v| a.max(v.abs())).max(1.0);
        for i in 0..k {
            for j in (i + 1)..k {
                if (prec[(i, j)] - prec[(j, i)]).abs() > SYMMETRY_RTOL * max_abs {
                    return Err(Error::Validation(format!(
                        "precision must be symmetric: P[{},{}]={} vs P[{},{}]={}",
                        i,
                        j,
                        prec[(i, j)],
                        j,
                        i,
                        prec[(j, i)]
                    )));
                }
            }
        }

        let chol = Cholesky::new(prec.clone()).ok_or_else(|| {
            Error::Validation("precision matrix is not positive definite".to_string())
        })?;
        let l = chol.l();
        let mut half_logdet = 0.0;
        let mut min_diag = f64::INFINITY;
        let mut max_diag = 0.0f64;
        for i in 0..k {
            let d = l[(i, i)];
            half_logdet += d.ln();
            min_diag = min_diag.min(d);
            max_diag = max_diag.max(d);
        }
        if min_diag < max_diag * 1e-8 {
            log::warn!(
                "precision matrix is severely ill-conditioned (Cholesky diag range {:e}..{:e})",
                min_diag,
                max_diag
            );
        }

        Ok(Self { mean, prec, half_logdet })
    }

    /// Dimension of the distribution.
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// Mean vector.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// `½ log det P` (the data-independent part of the normalizing constant).
    pub fn half_logdet(&self) -> f64 {
        self.half_logdet
    }

    /// Log-density kernel `-½ (x-m)ᵀ P (x-m)`, dropping the normalizing
    /// constant. This is what relative-density samplers need.
    pub fn log_kernel(&self, x: &[f64]) -> Result<f64> {
        let k = self.dim();
        if x.len() != k {
            return Err(Error::Validation(format!(
                "expected {} components, got {}",
                k,
                x.len()
            )));
        }
        // Symmetric quadratic form over the row-major precision.
        let mut quad = 0.0;
        for i in 0..k {
            let di = x[i] - self.mean[i];
            let mut acc = 0.0;
            for j in 0..k {
                acc += self.prec[(i, j)] * (x[j] - self.mean[j]);
            }
            quad += di * acc;
        }
        Ok(-0.5 * quad)
    }

    /// Normalized log-density: `log_kernel + ½ log det P - k/2 · ln(2π)`.
    pub fn logpdf(&self, x: &[f64]) -> Result<f64> {
        Ok(self.log_kernel(x)? + self.half_logdet - (self.dim() as f64) * LN_SQRT_2PI)
    }

    /// Accumulate the gradient of the log-density into `out`:
    /// `out[i] += -(P (x-m))[i]`.
    ///
    /// Identical for the kernel and the normalized density (the constant has
    /// zero gradient).
    pub fn accumulate_grad_log(&self, x: &[f64], out: &mut [f64]) -> Result<()> {
        let k = self.dim();
        if x.len() != k || out.len() != k {
            return Err(Error::Validation(format!(
                "expected {} components, got x={} out={}",
                k,
                x.len(),
                out.len()
            )));
        }
        for i in 0..k {
            let mut acc = 0.0;
            for j in 0..k {
                acc += self.prec[(i, j)] * (x[j] - self.mean[j]);
            }
            out[i] -= acc;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> MvNormalPrec {
        MvNormalPrec::new(
            vec![0.5, -1.0],
            vec![vec![2.0, 0.3], vec![0.3, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_kernel_zero_at_mean() {
        let d = example();
        let lk = d.log_kernel(&[0.5, -1.0]).unwrap();
        assert!(lk.abs() < 1e-15);
    }

    #[test]
    fn test_logpdf_standard_matches_scalar() {
        let d = MvNormalPrec::new(vec![0.0], vec![vec![1.0]]).unwrap();
        let lp = d.logpdf(&[1.3]).unwrap();
        let scalar = crate::normal::logpdf(1.3, 0.0, 1.0).unwrap();
        assert!((lp - scalar).abs() < 1e-12);
    }

    #[test]
    fn test_half_logdet_diagonal() {
        let d = MvNormalPrec::new(
            vec![0.0, 0.0],
            vec![vec![4.0, 0.0], vec![0.0, 9.0]],
        )
        .unwrap();
        // det P = 36, half log det = 0.5 ln 36
        assert!((d.half_logdet() - 0.5 * 36.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_grad_matches_finite_diff() {
        let d = example();
        let x = [1.2, 0.4];
        let mut g = vec![0.0; 2];
        d.accumulate_grad_log(&x, &mut g).unwrap();
        let eps = 1e-6;
        for i in 0..2 {
            let mut x1 = x;
            let mut x2 = x;
            x1[i] += eps;
            x2[i] -= eps;
            let fd = (d.log_kernel(&x1).unwrap() - d.log_kernel(&x2).unwrap()) / (2.0 * eps);
            assert!((fd - g[i]).abs() < 1e-8, "i={}: {} vs {}", i, fd, g[i]);
        }
    }

    #[test]
    fn test_rejects_non_pd() {
        let r = MvNormalPrec::new(
            vec![0.0, 0.0],
            vec![vec![1.0, 2.0], vec![2.0, 1.0]],
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_rejects_asymmetric() {
        let r = MvNormalPrec::new(
            vec![0.0, 0.0],
            vec![vec![1.0, 0.5], vec![0.2, 1.0]],
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(MvNormalPrec::new(vec![], vec![]).is_err());
        assert!(MvNormalPrec::new(vec![0.0], vec![vec![1.0, 0.0]]).is_err());
        assert!(MvNormalPrec::new(vec![0.0, 0.0], vec![vec![1.0, 0.0]]).is_err());
        assert!(MvNormalPrec::new(vec![0.0], vec![vec![f64::NAN]]).is_err());
    }
}

//! Layout of the flat unconstrained parameter vector.
//!
//! A sampler proposes one flat vector; this module fixes where each block
//! lives. For `D` covariates and `J` groups the order is:
//!
//! ```text
//! [ phi (2D+2) | eta (J) | z_beta (J·D, row-major by group) ]
//! ```
//!
//! with the hyperparameter block `phi` itself laid out as:
//!
//! ```text
//! [ mu_alpha, log_sigma_alpha, mu_beta (D), log_sigma_beta (D) ]
//! ```
//!
//! Every component is a free real; positivity of the scales is achieved by
//! exponentiation in the transform stage, never by bounds.

/// Index arithmetic for the flat parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLayout {
    /// Number of covariates `D`.
    pub n_features: usize,
    /// Number of groups `J`.
    pub n_groups: usize,
}

impl ParamLayout {
    /// Index of the group-intercept location `mu_alpha` within `phi`.
    pub const MU_ALPHA: usize = 0;
    /// Index of the log group-intercept scale within `phi`.
    pub const LOG_SIGMA_ALPHA: usize = 1;

    /// Length of the hyperparameter block `phi`: `2D + 2`.
    #[inline]
    pub fn dim_phi(&self) -> usize {
        2 * self.n_features + 2
    }

    /// Total parameter count: `2D+2 + J + J·D`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim_phi() + self.n_groups + self.n_groups * self.n_features
    }

    /// Index of `mu_beta[d]` within the flat vector.
    #[inline]
    pub fn mu_beta(&self, d: usize) -> usize {
        2 + d
    }

    /// Index of `log_sigma_beta[d]` within the flat vector.
    #[inline]
    pub fn log_sigma_beta(&self, d: usize) -> usize {
        2 + self.n_features + d
    }

    /// Index of the standardized intercept offset `eta[j]`.
    #[inline]
    pub fn eta(&self, j: usize) -> usize {
        self.dim_phi() + j
    }

    /// Index of the standardized slope offset `z_beta[j][d]`.
    #[inline]
    pub fn z_beta(&self, j: usize, d: usize) -> usize {
        self.dim_phi() + self.n_groups + j * self.n_features + d
    }

    /// Split a flat parameter slice into `(phi, eta, z_beta)` views.
    ///
    /// `z_beta` is the J×D offset matrix flattened row-major by group.
    /// Callers must have checked `params.len() == self.dim()`.
    #[inline]
    pub fn split<'a>(&self, params: &'a [f64]) -> (&'a [f64], &'a [f64], &'a [f64]) {
        debug_assert_eq!(params.len(), self.dim());
        let (phi, rest) = params.split_at(self.dim_phi());
        let (eta, z) = rest.split_at(self.n_groups);
        (phi, eta, z)
    }

    /// Parameter names in flat-vector order (stable, 1-based display indices).
    pub fn names(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.dim());
        out.push("mu_alpha".to_string());
        out.push("log_sigma_alpha".to_string());
        for d in 0..self.n_features {
            out.push(format!("mu_beta{}", d + 1));
        }
        for d in 0..self.n_features {
            out.push(format!("log_sigma_beta{}", d + 1));
        }
        for j in 0..self.n_groups {
            out.push(format!("eta{}", j + 1));
        }
        for j in 0..self.n_groups {
            for d in 0..self.n_features {
                out.push(format!("z_beta[{},{}]", j + 1, d + 1));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims() {
        let l = ParamLayout { n_features: 3, n_groups: 4 };
        assert_eq!(l.dim_phi(), 8);
        assert_eq!(l.dim(), 8 + 4 + 12);
    }

    #[test]
    fn test_indices_are_contiguous_and_disjoint() {
        let l = ParamLayout { n_features: 2, n_groups: 3 };
        let mut seen = vec![false; l.dim()];
        let mut mark = |i: usize| {
            assert!(!seen[i], "index {} assigned twice", i);
            seen[i] = true;
        };
        mark(ParamLayout::MU_ALPHA);
        mark(ParamLayout::LOG_SIGMA_ALPHA);
        for d in 0..2 {
            mark(l.mu_beta(d));
            mark(l.log_sigma_beta(d));
        }
        for j in 0..3 {
            mark(l.eta(j));
            for d in 0..2 {
                mark(l.z_beta(j, d));
            }
        }
        assert!(seen.iter().all(|&b| b), "layout must cover every index");
    }

    #[test]
    fn test_split_matches_indices() {
        let l = ParamLayout { n_features: 2, n_groups: 2 };
        let params: Vec<f64> = (0..l.dim()).map(|i| i as f64).collect();
        let (phi, eta, z) = l.split(&params);
        assert_eq!(phi.len(), l.dim_phi());
        assert_eq!(eta.len(), 2);
        assert_eq!(z.len(), 4);
        assert_eq!(eta[1], params[l.eta(1)]);
        assert_eq!(z[1 * 2 + 0], params[l.z_beta(1, 0)]);
    }

    #[test]
    fn test_names_order() {
        let l = ParamLayout { n_features: 1, n_groups: 2 };
        let names = l.names();
        assert_eq!(names.len(), l.dim());
        assert_eq!(names[0], "mu_alpha");
        assert_eq!(names[1], "log_sigma_alpha");
        assert_eq!(names[2], "mu_beta1");
        assert_eq!(names[3], "log_sigma_beta1");
        assert_eq!(names[l.eta(0)], "eta1");
        assert_eq!(names[l.z_beta(1, 0)], "z_beta[2,1]");
    }
}

//! Immutable grouped dataset: fixed inputs of the density.
//!
//! All validation happens once here, at setup time. Density evaluations
//! assume these invariants hold and never re-check the data.

use hl_core::{Error, Result};

/// Fixed observations for a grouped binary-outcome regression.
///
/// Covariates are stored as a dense row-major `n × d` matrix so the
/// per-observation gather in the likelihood stays cache-friendly.
#[derive(Debug, Clone)]
pub struct GroupedDataset {
    n: usize,
    d: usize,
    x: Vec<f64>, // length n*d, row-major
    y: Vec<u8>,  // 0/1
    group_idx: Vec<usize>,
    n_groups: usize,
}

impl GroupedDataset {
    /// Create a dataset from row-wise covariates, binary outcomes, and group
    /// assignments (`group_idx[i]` in `[0, n_groups)` selects the group of
    /// observation `i`).
    pub fn new(
        x: Vec<Vec<f64>>,
        y: Vec<u8>,
        group_idx: Vec<usize>,
        n_groups: usize,
    ) -> Result<Self> {
        let n = x.len();
        let d = x.first().map(|r| r.len()).unwrap_or(0);
        if n == 0 {
            return Err(Error::Validation("X must be non-empty (n>0)".to_string()));
        }
        if d == 0 {
            return Err(Error::Validation("X must have at least 1 feature column".to_string()));
        }
        let mut data = Vec::with_capacity(n * d);
        for (i, row) in x.into_iter().enumerate() {
            if row.len() != d {
                return Err(Error::Validation(format!(
                    "X must be rectangular: row {} has len {}, expected {}",
                    i,
                    row.len(),
                    d
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::Validation("X must contain only finite values".to_string()));
            }
            data.extend_from_slice(&row);
        }
        if y.len() != n {
            return Err(Error::Validation(format!(
                "y has wrong length: expected n={}, got {}",
                n,
                y.len()
            )));
        }
        if y.iter().any(|&v| v > 1) {
            return Err(Error::Validation("y must contain only 0/1 values".to_string()));
        }
        if n_groups == 0 {
            return Err(Error::Validation("n_groups must be > 0".to_string()));
        }
        if group_idx.len() != n {
            return Err(Error::Validation(format!(
                "group_idx has wrong length: expected n={}, got {}",
                n,
                group_idx.len()
            )));
        }
        if group_idx.iter().any(|&g| g >= n_groups) {
            return Err(Error::Validation("group_idx must be in [0, n_groups)".to_string()));
        }
        Ok(Self { n, d, x: data, y, group_idx, n_groups })
    }

    /// Number of observations.
    pub fn n_obs(&self) -> usize {
        self.n
    }

    /// Number of covariates per observation.
    pub fn n_features(&self) -> usize {
        self.d
    }

    /// Number of groups.
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Covariate row of observation `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.d;
        &self.x[start..start + self.d]
    }

    /// Binary outcomes.
    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// Group assignments.
    pub fn group_idx(&self) -> &[usize] {
        &self.group_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_construction() {
        let ds = GroupedDataset::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![0, 1],
            vec![0, 1],
            2,
        )
        .unwrap();
        assert_eq!(ds.n_obs(), 2);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.n_groups(), 2);
        assert_eq!(ds.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        assert!(GroupedDataset::new(vec![], vec![], vec![], 1).is_err());
        assert!(GroupedDataset::new(vec![vec![]], vec![0], vec![0], 1).is_err());
        assert!(GroupedDataset::new(
            vec![vec![1.0, 2.0], vec![3.0]],
            vec![0, 1],
            vec![0, 0],
            1
        )
        .is_err());
    }

    #[test]
    fn test_rejects_bad_y() {
        assert!(GroupedDataset::new(vec![vec![1.0]], vec![2], vec![0], 1).is_err());
        assert!(GroupedDataset::new(vec![vec![1.0]], vec![0, 1], vec![0], 1).is_err());
    }

    #[test]
    fn test_rejects_bad_groups() {
        assert!(GroupedDataset::new(vec![vec![1.0]], vec![0], vec![1], 1).is_err());
        assert!(GroupedDataset::new(vec![vec![1.0]], vec![0], vec![0], 0).is_err());
        assert!(GroupedDataset::new(vec![vec![1.0]], vec![0], vec![0, 0], 1).is_err());
    }

    #[test]
    fn test_rejects_non_finite_x() {
        assert!(GroupedDataset::new(vec![vec![f64::NAN]], vec![0], vec![0], 1).is_err());
    }
}

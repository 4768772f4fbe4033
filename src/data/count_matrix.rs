//! Sparse count matrix for sampled read counts.

use crate::error::{SimError, Result};
use sprs::{CsMat, TriMat};

/// A sparse count matrix of observed reads.
///
/// Rows represent samples and columns represent features, matching the
/// layout of [`LabeledTable`](super::LabeledTable). Uses CSR (Compressed
/// Sparse Row) format so per-sample totals are cheap.
#[derive(Debug, Clone)]
pub struct CountMatrix {
    /// Sparse matrix in CSR format (samples × features)
    data: CsMat<u64>,
    /// Sample identifiers (row names)
    sample_ids: Vec<String>,
    /// Feature identifiers (column names)
    feature_ids: Vec<String>,
}

impl CountMatrix {
    /// Create a new CountMatrix from a sparse matrix and identifiers.
    pub fn new(
        data: CsMat<u64>,
        sample_ids: Vec<String>,
        feature_ids: Vec<String>,
    ) -> Result<Self> {
        let (nrows, ncols) = data.shape();
        if nrows != sample_ids.len() {
            return Err(SimError::DimensionMismatch {
                expected: nrows,
                actual: sample_ids.len(),
            });
        }
        if ncols != feature_ids.len() {
            return Err(SimError::DimensionMismatch {
                expected: ncols,
                actual: feature_ids.len(),
            });
        }
        Ok(Self {
            data,
            sample_ids,
            feature_ids,
        })
    }

    /// Build from dense rows of counts, storing only non-zero entries.
    pub fn from_rows(
        rows: &[Vec<u64>],
        sample_ids: Vec<String>,
        feature_ids: Vec<String>,
    ) -> Result<Self> {
        let n_features = feature_ids.len();
        let mut tri_mat = TriMat::new((rows.len(), n_features));
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n_features {
                return Err(SimError::DimensionMismatch {
                    expected: n_features,
                    actual: values.len(),
                });
            }
            for (col, &val) in values.iter().enumerate() {
                if val > 0 {
                    tri_mat.add_triplet(row, col, val);
                }
            }
        }
        Self::new(tri_mat.to_csr(), sample_ids, feature_ids)
    }

    /// Get the value at (row, col), returning 0 for missing entries.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.data.get(row, col).copied().unwrap_or(0)
    }

    /// Number of samples (rows).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.rows()
    }

    /// Number of features (columns).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.data.cols()
    }

    /// Sample identifiers.
    #[inline]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Feature identifiers.
    #[inline]
    pub fn feature_ids(&self) -> &[String] {
        &self.feature_ids
    }

    /// Get a dense vector for a specific row (sample).
    pub fn row_dense(&self, row: usize) -> Vec<u64> {
        let mut dense = vec![0u64; self.n_features()];
        if let Some(row_vec) = self.data.outer_view(row) {
            for (col, &val) in row_vec.iter() {
                dense[col] = val;
            }
        }
        dense
    }

    /// Compute row sums (library sizes per sample).
    pub fn row_sums(&self) -> Vec<u64> {
        self.data
            .outer_iterator()
            .map(|v| v.iter().map(|(_, &val)| val).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_matrix() -> CountMatrix {
        // 2 samples × 3 features
        let rows = vec![vec![10, 0, 5], vec![100, 200, 0]];
        let sample_ids = vec!["S0".to_string(), "S1".to_string()];
        let feature_ids = vec!["F0".to_string(), "F1".to_string(), "X0".to_string()];
        CountMatrix::from_rows(&rows, sample_ids, feature_ids).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let mat = create_test_matrix();
        assert_eq!(mat.n_samples(), 2);
        assert_eq!(mat.n_features(), 3);
    }

    #[test]
    fn test_get_values() {
        let mat = create_test_matrix();
        assert_eq!(mat.get(0, 0), 10);
        assert_eq!(mat.get(0, 1), 0);
        assert_eq!(mat.get(1, 1), 200);
    }

    #[test]
    fn test_row_dense() {
        let mat = create_test_matrix();
        assert_eq!(mat.row_dense(1), vec![100, 200, 0]);
    }

    #[test]
    fn test_sums() {
        let mat = create_test_matrix();
        assert_eq!(mat.row_sums(), vec![15, 300]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = CountMatrix::from_rows(
            &[vec![1, 2]],
            vec!["S0".to_string()],
            vec!["F0".to_string(), "F1".to_string(), "F2".to_string()],
        );
        assert!(matches!(result, Err(SimError::DimensionMismatch { .. })));
    }
}

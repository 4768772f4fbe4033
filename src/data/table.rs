//! Labeled dense table of relative abundances.

use crate::error::{SimError, Result};
use nalgebra::DMatrix;

/// A dense abundance table with row (sample) and column (feature) labels.
///
/// Rows are samples and columns are features. Generated tables are closed,
/// so every row is a composition summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    /// Dense values (samples × features).
    data: DMatrix<f64>,
    /// Sample identifiers (row names).
    sample_ids: Vec<String>,
    /// Feature identifiers (column names).
    feature_ids: Vec<String>,
}

impl LabeledTable {
    /// Create a new table from a dense matrix and identifiers.
    pub fn new(
        data: DMatrix<f64>,
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

    /// Get the value at (sample, feature).
    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f64 {
        self.data[(sample, feature)]
    }

    /// Number of samples (rows).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of features (columns).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.data.ncols()
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

    /// Get reference to the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Get a row (sample) as a vector.
    pub fn row(&self, sample: usize) -> Vec<f64> {
        self.data.row(sample).iter().copied().collect()
    }

    /// Get all values of a feature by its identifier.
    pub fn column_by_id(&self, feature_id: &str) -> Option<Vec<f64>> {
        let idx = self.feature_ids.iter().position(|f| f == feature_id)?;
        Some(self.data.column(idx).iter().copied().collect())
    }

    /// Row totals, one per sample.
    pub fn row_sums(&self) -> Vec<f64> {
        self.data.row_iter().map(|r| r.sum()).collect()
    }

    /// Whether every row sums to 1 within `tol` and no entry is negative.
    pub fn is_closed(&self, tol: f64) -> bool {
        self.data.iter().all(|&v| v >= 0.0)
            && self.row_sums().iter().all(|s| (s - 1.0).abs() <= tol)
    }

    /// Compare with another table: identical labels and element-wise values
    /// within an absolute tolerance.
    pub fn approx_eq(&self, other: &LabeledTable, tol: f64) -> bool {
        self.sample_ids == other.sample_ids
            && self.feature_ids == other.feature_ids
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

/// Sequential identifiers `{prefix}0..{prefix}{n-1}`.
pub fn labels(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect()
}

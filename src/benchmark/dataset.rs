//! One generated dataset point and the sample metadata that describes it.

use crate::data::{labels, LabeledTable, Metadata, Variable};
use crate::error::{SimError, Result};

/// Library size recorded for every generated sample unless configured otherwise.
pub const DEFAULT_LIBRARY_SIZE: u64 = 10_000;

/// Prefix of sample identifiers (`S0`, `S1`, ...).
pub const SAMPLE_PREFIX: &str = "S";
/// Prefix of causal/differential feature identifiers (`F0`, `F1`, ...).
pub const FEATURE_PREFIX: &str = "F";
/// Prefix of contaminant feature identifiers (`X0`, `X1`, ...).
pub const CONTAMINANT_PREFIX: &str = "X";

/// A generated table with its sample metadata and ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Closed relative abundances (samples × features).
    pub table: LabeledTable,
    /// Per-sample covariates, rows aligned with `table`.
    pub metadata: Metadata,
    /// Feature IDs that are truly differential or gradient-causal, in
    /// feature-axis order.
    pub truth: Vec<String>,
}

impl Dataset {
    /// Split into the `(table, metadata, truth)` triple.
    pub fn into_parts(self) -> (LabeledTable, Metadata, Vec<String>) {
        (self.table, self.metadata, self.truth)
    }

    /// Check that every row of the table is a composition within `tol`.
    pub fn check_closed(&self, tol: f64) -> Result<()> {
        for (i, total) in self.table.row_sums().into_iter().enumerate() {
            if (total - 1.0).abs() > tol {
                return Err(SimError::Numerical(format!(
                    "Sample {} sums to {}, not 1",
                    self.table.sample_ids()[i],
                    total
                )));
            }
        }
        Ok(())
    }
}

/// Metadata for a two-group design: `reps` samples of group 0 followed by
/// `reps` samples of group 1.
///
/// `n_diff` is written as given; callers pass the number of differing
/// features counted over both sides of the perturbation.
pub(crate) fn group_metadata(
    reps: usize,
    n_diff: usize,
    effect_size: f64,
    library_size: u64,
) -> Result<Metadata> {
    let n_samples = 2 * reps;
    let group = (0..n_samples)
        .map(|i| Variable::Categorical(if i < reps { "0" } else { "1" }.to_string()))
        .collect();

    Metadata::from_columns(
        labels(SAMPLE_PREFIX, n_samples),
        vec![
            ("group".to_string(), group),
            (
                "n_diff".to_string(),
                vec![ordinal("n_diff", n_diff as u64)?; n_samples],
            ),
            (
                "effect_size".to_string(),
                vec![Variable::Continuous(effect_size); n_samples],
            ),
            (
                "library_size".to_string(),
                vec![ordinal("library_size", library_size)?; n_samples],
            ),
        ],
    )
}

/// Metadata for samples placed along a gradient.
pub(crate) fn gradient_metadata(
    gradient: &[f64],
    n_diff: usize,
    library_size: u64,
) -> Result<Metadata> {
    let n_samples = gradient.len();
    Metadata::from_columns(
        labels(SAMPLE_PREFIX, n_samples),
        vec![
            (
                "gradient".to_string(),
                gradient.iter().map(|&g| Variable::Continuous(g)).collect(),
            ),
            (
                "n_diff".to_string(),
                vec![ordinal("n_diff", n_diff as u64)?; n_samples],
            ),
            (
                "library_size".to_string(),
                vec![ordinal("library_size", library_size)?; n_samples],
            ),
        ],
    )
}

fn ordinal(name: &str, value: u64) -> Result<Variable> {
    i64::try_from(value)
        .map(Variable::Ordinal)
        .map_err(|_| SimError::invalid(name, format!("{} does not fit ordinal metadata", value)))
}

/// Identifiers of the first `n` and last `n` of `n_features` features.
pub(crate) fn edge_truth(n: usize, n_features: usize) -> Vec<String> {
    (0..n)
        .chain(n_features - n..n_features)
        .map(|i| format!("{}{}", FEATURE_PREFIX, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[test]
    fn test_group_metadata() {
        let md = group_metadata(3, 4, 2.0, DEFAULT_LIBRARY_SIZE).unwrap();

        assert_eq!(md.sample_ids(), &["S0", "S1", "S2", "S3", "S4", "S5"]);
        assert_eq!(
            md.column_names(),
            &["group", "n_diff", "effect_size", "library_size"]
        );
        assert_eq!(md.levels("group").unwrap(), vec!["0", "1"]);
        assert_eq!(md.get("S2", "group").unwrap().as_categorical(), Some("0"));
        assert_eq!(md.get("S3", "group").unwrap().as_categorical(), Some("1"));
        assert_eq!(md.get("S5", "n_diff").unwrap().as_ordinal(), Some(4));
        assert_eq!(md.column_f64("library_size").unwrap(), vec![10000.0; 6]);
    }

    #[test]
    fn test_gradient_metadata() {
        let md = gradient_metadata(&[0.0, 2.5, 5.0], 5, 500).unwrap();

        assert_eq!(md.column_f64("gradient").unwrap(), vec![0.0, 2.5, 5.0]);
        assert_eq!(md.get("S1", "n_diff").unwrap().as_ordinal(), Some(5));
        assert!(!md.has_column("group"));
    }

    #[test]
    fn test_oversized_library_size_rejected() {
        let err = gradient_metadata(&[0.0, 1.0], 2, u64::MAX).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { ref name, .. } if name == "library_size"));

        let md = group_metadata(1, 2, 1.0, i64::MAX as u64).unwrap();
        assert_eq!(md.get("S0", "library_size").unwrap().as_ordinal(), Some(i64::MAX));
    }

    #[test]
    fn test_edge_truth() {
        assert_eq!(edge_truth(1, 5), vec!["F0", "F4"]);
        assert_eq!(edge_truth(2, 5), vec!["F0", "F1", "F3", "F4"]);
        assert!(edge_truth(0, 5).is_empty());
    }

    #[test]
    fn test_check_closed() {
        let table = LabeledTable::new(
            DMatrix::from_row_slice(2, 2, &[0.5, 0.5, 0.9, 0.3]),
            labels("S", 2),
            labels("F", 2),
        )
        .unwrap();
        let dataset = Dataset {
            table,
            metadata: gradient_metadata(&[0.0, 1.0], 2, 1).unwrap(),
            truth: vec![],
        };

        let err = dataset.check_closed(1e-6).unwrap_err();
        assert!(err.to_string().contains("S1"));
    }
}

//! Variable-feature sweep: fixed fold change, growing number of changed features.
//!
//! At each position `k` features at the low end of the feature axis are
//! multiplied by `fold_change` in group 0 and `k` features at the high end in
//! group 1. `k` runs from 0 (null dataset) to `max_changing` over `intervals`
//! datasets, and the truth set grows with it.

use super::baseline::uniform;
use super::dataset::{edge_truth, group_metadata, Dataset, DEFAULT_LIBRARY_SIZE, FEATURE_PREFIX, SAMPLE_PREFIX};
use super::sweep::{impl_dataset_iterator, stepped_count, DatasetGenerator, Sweep};
use super::validate::{require_fits_both_ends, require_nonzero, require_positive, require_recordable};
use crate::data::{labels, LabeledTable};
use crate::error::Result;
use crate::simplex::closure_rows;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters of a variable-feature sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableFeaturesParams {
    /// Most features changed at each end of the feature axis.
    pub max_changing: usize,
    /// Multiplicative change applied to every changed feature.
    pub fold_change: f64,
    /// Samples per group.
    pub reps: usize,
    /// Number of datasets in the sweep.
    pub intervals: usize,
    /// Number of features.
    pub n_species: usize,
    /// Library size recorded in metadata.
    pub library_size: u64,
}

impl Default for VariableFeaturesParams {
    fn default() -> Self {
        Self {
            max_changing: 10,
            fold_change: 2.0,
            reps: 10,
            intervals: 11,
            n_species: 100,
            library_size: DEFAULT_LIBRARY_SIZE,
        }
    }
}

impl VariableFeaturesParams {
    pub fn new(
        max_changing: usize,
        fold_change: f64,
        reps: usize,
        intervals: usize,
        n_species: usize,
    ) -> Self {
        Self {
            max_changing,
            fold_change,
            reps,
            intervals,
            n_species,
            ..Default::default()
        }
    }

    /// Set the library size recorded in metadata.
    pub fn with_library_size(mut self, library_size: u64) -> Self {
        self.library_size = library_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("fold_change", self.fold_change)?;
        require_nonzero("reps", self.reps as u64)?;
        require_nonzero("intervals", self.intervals as u64)?;
        require_nonzero("n_species", self.n_species as u64)?;
        require_nonzero("library_size", self.library_size)?;
        require_recordable("library_size", self.library_size)?;
        require_fits_both_ends("max_changing", self.max_changing, self.n_species)
    }

    /// Features changed at each end of the axis at a sweep position.
    pub fn changing_at(&self, position: usize) -> usize {
        stepped_count(0, self.max_changing, position, self.intervals)
    }
}

/// Lazy sweep over the number of changed features.
#[derive(Debug, Clone)]
pub struct VariableFeaturesGenerator {
    params: VariableFeaturesParams,
    sweep: Sweep,
}

impl VariableFeaturesGenerator {
    /// Validate parameters and position the sweep at zero changed features.
    pub fn new(params: VariableFeaturesParams) -> Result<Self> {
        params.validate()?;
        debug!(
            intervals = params.intervals,
            max_changing = params.max_changing,
            fold_change = params.fold_change,
            "variable features generator created"
        );
        Ok(Self {
            sweep: Sweep::new(params.intervals),
            params,
        })
    }

    pub fn params(&self) -> &VariableFeaturesParams {
        &self.params
    }
}

impl DatasetGenerator for VariableFeaturesGenerator {
    fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    fn sweep_mut(&mut self) -> &mut Sweep {
        &mut self.sweep
    }

    fn dataset_at(&self, position: usize) -> Result<Dataset> {
        self.sweep.check(position)?;
        let p = &self.params;
        let changing = p.changing_at(position);

        let mut low = uniform(p.n_species);
        let mut high = uniform(p.n_species);
        low[..changing].iter_mut().for_each(|v| *v *= p.fold_change);
        high[p.n_species - changing..]
            .iter_mut()
            .for_each(|v| *v *= p.fold_change);

        let n_samples = 2 * p.reps;
        let raw = DMatrix::from_fn(n_samples, p.n_species, |i, j| {
            if i < p.reps {
                low[j]
            } else {
                high[j]
            }
        });
        let table = LabeledTable::new(
            closure_rows(&raw)?,
            labels(SAMPLE_PREFIX, n_samples),
            labels(FEATURE_PREFIX, p.n_species),
        )?;

        let metadata = group_metadata(p.reps, 2 * changing, p.fold_change, p.library_size)?;
        let truth = edge_truth(changing, p.n_species);

        debug!(position, changing, "variable features dataset generated");
        Ok(Dataset {
            table,
            metadata,
            truth,
        })
    }
}

impl_dataset_iterator!(VariableFeaturesGenerator);

/// Build a variable-feature sweep from the named parameters.
pub fn compositional_variable_features_generator(
    max_changing: usize,
    fold_change: f64,
    reps: usize,
    intervals: usize,
    n_species: usize,
) -> Result<VariableFeaturesGenerator> {
    VariableFeaturesGenerator::new(VariableFeaturesParams::new(
        max_changing,
        fold_change,
        reps,
        intervals,
        n_species,
    ))
}

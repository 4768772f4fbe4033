//! Effect-size sweep: fixed differential features, growing perturbation.
//!
//! Two groups of `reps` samples start from a flat profile. Group 0 has its
//! first `n_diff` features multiplied by alpha, group 1 its last `n_diff`
//! features, so `2 * n_diff` features differ between the groups. Alpha is
//! log-spaced from 1 (no effect) to `10^max_alpha` over `intervals` datasets.

use super::baseline::uniform;
use super::dataset::{edge_truth, group_metadata, Dataset, DEFAULT_LIBRARY_SIZE, FEATURE_PREFIX, SAMPLE_PREFIX};
use super::sweep::{impl_dataset_iterator, DatasetGenerator, Sweep};
use super::validate::{require_finite, require_fits_both_ends, require_nonzero, require_recordable};
use crate::data::{labels, LabeledTable};
use crate::error::{SimError, Result};
use crate::simplex::closure_rows;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters of an effect-size sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSizeParams {
    /// Base-10 exponent of the largest alpha.
    pub max_alpha: f64,
    /// Samples per group.
    pub reps: usize,
    /// Number of datasets in the sweep.
    pub intervals: usize,
    /// Number of features.
    pub n_species: usize,
    /// Features perturbed at each end of the feature axis.
    pub n_diff: usize,
    /// Library size recorded in metadata.
    pub library_size: u64,
}

impl Default for EffectSizeParams {
    fn default() -> Self {
        Self {
            max_alpha: 1.0,
            reps: 10,
            intervals: 10,
            n_species: 100,
            n_diff: 10,
            library_size: DEFAULT_LIBRARY_SIZE,
        }
    }
}

impl EffectSizeParams {
    pub fn new(max_alpha: f64, reps: usize, intervals: usize, n_species: usize, n_diff: usize) -> Self {
        Self {
            max_alpha,
            reps,
            intervals,
            n_species,
            n_diff,
            ..Default::default()
        }
    }

    /// Set the library size recorded in metadata.
    pub fn with_library_size(mut self, library_size: u64) -> Self {
        self.library_size = library_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("max_alpha", self.max_alpha)?;
        require_nonzero("reps", self.reps as u64)?;
        require_nonzero("intervals", self.intervals as u64)?;
        require_nonzero("n_species", self.n_species as u64)?;
        require_nonzero("library_size", self.library_size)?;
        require_recordable("library_size", self.library_size)?;
        require_fits_both_ends("n_diff", self.n_diff, self.n_species)?;

        let largest = 10f64.powf(self.max_alpha);
        if !largest.is_finite() || largest <= 0.0 {
            return Err(SimError::invalid(
                "max_alpha",
                format!("10^{} is not representable", self.max_alpha),
            ));
        }
        Ok(())
    }

    /// Multiplicative effect at a sweep position.
    pub fn alpha_at(&self, position: usize) -> f64 {
        if self.intervals <= 1 {
            return 1.0;
        }
        let exponent = self.max_alpha * position as f64 / (self.intervals - 1) as f64;
        10f64.powf(exponent)
    }
}

/// Lazy sweep over effect sizes.
#[derive(Debug, Clone)]
pub struct EffectSizeGenerator {
    params: EffectSizeParams,
    sweep: Sweep,
}

impl EffectSizeGenerator {
    /// Validate parameters and position the sweep at alpha = 1.
    pub fn new(params: EffectSizeParams) -> Result<Self> {
        params.validate()?;
        debug!(
            intervals = params.intervals,
            n_species = params.n_species,
            n_diff = params.n_diff,
            "effect size generator created"
        );
        Ok(Self {
            sweep: Sweep::new(params.intervals),
            params,
        })
    }

    pub fn params(&self) -> &EffectSizeParams {
        &self.params
    }
}

impl DatasetGenerator for EffectSizeGenerator {
    fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    fn sweep_mut(&mut self) -> &mut Sweep {
        &mut self.sweep
    }

    fn dataset_at(&self, position: usize) -> Result<Dataset> {
        self.sweep.check(position)?;
        let p = &self.params;
        let alpha = p.alpha_at(position);

        let mut low = uniform(p.n_species);
        let mut high = uniform(p.n_species);
        for j in 0..p.n_diff {
            low[j] *= alpha;
            high[p.n_species - 1 - j] *= alpha;
        }

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

        // Both ends of the perturbation are counted.
        let metadata = group_metadata(p.reps, 2 * p.n_diff, alpha, p.library_size)?;
        let truth = edge_truth(p.n_diff, p.n_species);

        debug!(position, alpha, "effect size dataset generated");
        Ok(Dataset {
            table,
            metadata,
            truth,
        })
    }
}

impl_dataset_iterator!(EffectSizeGenerator);

/// Build an effect-size sweep from the named parameters.
pub fn compositional_effect_size_generator(
    max_alpha: f64,
    reps: usize,
    intervals: usize,
    n_species: usize,
    n_diff: usize,
) -> Result<EffectSizeGenerator> {
    EffectSizeGenerator::new(EffectSizeParams::new(max_alpha, reps, intervals, n_species, n_diff))
}

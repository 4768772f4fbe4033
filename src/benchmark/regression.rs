//! Regression-prefilter sweep: gradient-causal curves plus growing contaminants.
//!
//! Samples sit at evenly spaced positions along a gradient. Each causal
//! feature `F{j}` follows a Gaussian response curve peaking at its own point
//! on the gradient. Contaminant features `X{k}` carry exponentially decaying
//! weights that ignore the gradient entirely. The causal block and the
//! contaminant block are each closed and then share every row equally, so the
//! causal values do not depend on how many contaminants are appended.

use super::baseline::{exponential_decay, gaussian_response};
use super::dataset::{
    gradient_metadata, Dataset, CONTAMINANT_PREFIX, DEFAULT_LIBRARY_SIZE, FEATURE_PREFIX,
    SAMPLE_PREFIX,
};
use super::sweep::{impl_dataset_iterator, linspace, stepped_count, DatasetGenerator, Sweep};
use super::validate::{require_nonzero, require_positive, require_recordable};
use crate::data::{labels, LabeledTable};
use crate::error::{SimError, Result};
use crate::simplex::{closure, closure_rows};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fewest contaminants any dataset in the sweep carries.
pub const MIN_CONTAMINANTS: usize = 2;

/// Parameters of a regression-prefilter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionPrefilterParams {
    /// Upper end of the gradient; samples span [0, max_gradient].
    pub max_gradient: f64,
    /// Number of samples along the gradient.
    pub gradient_intervals: usize,
    /// Standard deviation of every response curve.
    pub sigma: f64,
    /// Number of causal features.
    pub n_species: usize,
    /// Decay scale of the contaminant weights.
    pub lam: f64,
    /// Contaminants in the last dataset of the sweep.
    pub max_contaminants: usize,
    /// Number of datasets in the sweep.
    pub contaminant_intervals: usize,
    /// Library size recorded in metadata.
    pub library_size: u64,
}

impl Default for RegressionPrefilterParams {
    fn default() -> Self {
        Self {
            max_gradient: 10.0,
            gradient_intervals: 50,
            sigma: 1.0,
            n_species: 20,
            lam: 0.1,
            max_contaminants: 20,
            contaminant_intervals: 10,
            library_size: DEFAULT_LIBRARY_SIZE,
        }
    }
}

impl RegressionPrefilterParams {
    pub fn new(
        max_gradient: f64,
        gradient_intervals: usize,
        sigma: f64,
        n_species: usize,
        lam: f64,
        max_contaminants: usize,
        contaminant_intervals: usize,
    ) -> Self {
        Self {
            max_gradient,
            gradient_intervals,
            sigma,
            n_species,
            lam,
            max_contaminants,
            contaminant_intervals,
            ..Default::default()
        }
    }

    /// Set the library size recorded in metadata.
    pub fn with_library_size(mut self, library_size: u64) -> Self {
        self.library_size = library_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("max_gradient", self.max_gradient)?;
        require_nonzero("gradient_intervals", self.gradient_intervals as u64)?;
        require_positive("sigma", self.sigma)?;
        require_nonzero("n_species", self.n_species as u64)?;
        require_positive("lam", self.lam)?;
        require_nonzero("contaminant_intervals", self.contaminant_intervals as u64)?;
        require_nonzero("library_size", self.library_size)?;
        require_recordable("library_size", self.library_size)?;
        if self.max_contaminants < MIN_CONTAMINANTS {
            return Err(SimError::invalid(
                "max_contaminants",
                format!(
                    "must be at least {}, got {}",
                    MIN_CONTAMINANTS, self.max_contaminants
                ),
            ));
        }
        Ok(())
    }

    /// Sample positions along the gradient.
    pub fn gradient(&self) -> Vec<f64> {
        linspace(0.0, self.max_gradient, self.gradient_intervals)
    }

    /// Peak position of each causal feature.
    pub fn centers(&self) -> Vec<f64> {
        linspace(0.0, self.max_gradient, self.n_species)
    }

    /// Contaminants appended at a sweep position.
    pub fn contaminants_at(&self, position: usize) -> usize {
        stepped_count(
            MIN_CONTAMINANTS,
            self.max_contaminants,
            position,
            self.contaminant_intervals,
        )
    }
}

/// Lazy sweep over the number of contaminant features.
#[derive(Debug, Clone)]
pub struct RegressionPrefilterGenerator {
    params: RegressionPrefilterParams,
    sweep: Sweep,
    gradient: Vec<f64>,
    /// Closed causal response curves (samples × causal features).
    causal: DMatrix<f64>,
}

impl RegressionPrefilterGenerator {
    /// Validate parameters and build the causal response curves.
    ///
    /// # Errors
    /// Besides parameter validation, fails with `SimError::Numerical` when a
    /// sample lies so far from every peak that all of its causal densities
    /// underflow to zero.
    pub fn new(params: RegressionPrefilterParams) -> Result<Self> {
        params.validate()?;
        let gradient = params.gradient();
        let causal = closure_rows(&gaussian_response(&gradient, &params.centers(), params.sigma)?)?;

        debug!(
            samples = params.gradient_intervals,
            n_species = params.n_species,
            contaminant_intervals = params.contaminant_intervals,
            "regression prefilter generator created"
        );
        Ok(Self {
            sweep: Sweep::new(params.contaminant_intervals),
            params,
            gradient,
            causal,
        })
    }

    pub fn params(&self) -> &RegressionPrefilterParams {
        &self.params
    }

    /// Sample positions along the gradient.
    pub fn gradient(&self) -> &[f64] {
        &self.gradient
    }
}

impl DatasetGenerator for RegressionPrefilterGenerator {
    fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    fn sweep_mut(&mut self) -> &mut Sweep {
        &mut self.sweep
    }

    fn dataset_at(&self, position: usize) -> Result<Dataset> {
        self.sweep.check(position)?;
        let p = &self.params;
        let n_contaminants = p.contaminants_at(position);
        let weights = closure(&exponential_decay(n_contaminants, p.lam))?;

        let n_samples = self.gradient.len();
        let raw = DMatrix::from_fn(n_samples, p.n_species + n_contaminants, |i, j| {
            if j < p.n_species {
                self.causal[(i, j)]
            } else {
                weights[j - p.n_species]
            }
        });

        let mut feature_ids = labels(FEATURE_PREFIX, p.n_species);
        feature_ids.extend(labels(CONTAMINANT_PREFIX, n_contaminants));
        let table = LabeledTable::new(
            closure_rows(&raw)?,
            labels(SAMPLE_PREFIX, n_samples),
            feature_ids,
        )?;

        let metadata = gradient_metadata(&self.gradient, p.n_species, p.library_size)?;
        let truth = labels(FEATURE_PREFIX, p.n_species);

        debug!(position, n_contaminants, "regression prefilter dataset generated");
        Ok(Dataset {
            table,
            metadata,
            truth,
        })
    }
}

impl_dataset_iterator!(RegressionPrefilterGenerator);

/// Build a regression-prefilter sweep from the named parameters.
pub fn compositional_regression_prefilter_generator(
    max_gradient: f64,
    gradient_intervals: usize,
    sigma: f64,
    n_species: usize,
    lam: f64,
    max_contaminants: usize,
    contaminant_intervals: usize,
) -> Result<RegressionPrefilterGenerator> {
    RegressionPrefilterGenerator::new(RegressionPrefilterParams::new(
        max_gradient,
        gradient_intervals,
        sigma,
        n_species,
        lam,
        max_contaminants,
        contaminant_intervals,
    ))
}

//! Turning compositions into read counts.
//!
//! Generated tables are relative abundances. Methods that expect counts can
//! either use the deterministic expectation (`expected_counts`) or draw
//! multinomial reads per sample with an explicit random number generator.

use super::dataset::Dataset;
use super::validate::{require_nonzero, require_positive};
use crate::data::{CountMatrix, LabeledTable};
use crate::error::{SimError, Result};
use nalgebra::DMatrix;
use rand::Rng;
use rand_distr::{Binomial, Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest library size a variable draw can produce.
const MIN_VARIABLE_LIBRARY_SIZE: u64 = 1000;

/// How per-sample library sizes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibrarySize {
    /// Every sample gets the same number of reads.
    Fixed(u64),
    /// `mean * (1 + N(0, cv))`, with the factor floored at 0.1 and the
    /// result floored at 1000 reads.
    Variable { mean: u64, cv: f64 },
}

/// Expected counts: each row scaled by a constant library size.
pub fn expected_counts(table: &LabeledTable, library_size: f64) -> DMatrix<f64> {
    table.matrix() * library_size
}

/// Draws read counts from generated tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountSampler {
    library_size: LibrarySize,
}

impl CountSampler {
    /// Create a sampler, checking the library size model.
    pub fn new(library_size: LibrarySize) -> Result<Self> {
        match library_size {
            LibrarySize::Fixed(n) => require_nonzero("library_size", n)?,
            LibrarySize::Variable { mean, cv } => {
                require_nonzero("mean", mean)?;
                if !cv.is_finite() || cv < 0.0 {
                    return Err(SimError::invalid(
                        "cv",
                        format!("must be finite and non-negative, got {}", cv),
                    ));
                }
            }
        }
        Ok(Self { library_size })
    }

    /// Sampler with the same library size for every sample.
    pub fn fixed(library_size: u64) -> Result<Self> {
        Self::new(LibrarySize::Fixed(library_size))
    }

    pub fn library_size(&self) -> LibrarySize {
        self.library_size
    }

    /// Draw `n` library sizes.
    pub fn draw_library_sizes<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<u64>> {
        match self.library_size {
            LibrarySize::Fixed(size) => Ok(vec![size; n]),
            LibrarySize::Variable { mean, cv } => {
                let noise = Normal::new(0.0, cv)
                    .map_err(|e| SimError::Numerical(format!("Library size noise: {}", e)))?;
                Ok((0..n)
                    .map(|_| {
                        let factor = (1.0 + noise.sample(rng)).max(0.1);
                        ((mean as f64 * factor).round() as u64).max(MIN_VARIABLE_LIBRARY_SIZE)
                    })
                    .collect())
            }
        }
    }

    /// Draw library sizes and multinomial counts for every row of `table`.
    pub fn sample<R: Rng + ?Sized>(&self, table: &LabeledTable, rng: &mut R) -> Result<CountMatrix> {
        let library_sizes = self.draw_library_sizes(table.n_samples(), rng)?;
        sample_counts(table, &library_sizes, rng)
    }
}

/// Draw multinomial counts for every row of `table`, row `i` totalling
/// `library_sizes[i]` reads.
pub fn sample_counts<R: Rng + ?Sized>(
    table: &LabeledTable,
    library_sizes: &[u64],
    rng: &mut R,
) -> Result<CountMatrix> {
    if library_sizes.len() != table.n_samples() {
        return Err(SimError::DimensionMismatch {
            expected: table.n_samples(),
            actual: library_sizes.len(),
        });
    }

    let rows = library_sizes
        .iter()
        .enumerate()
        .map(|(i, &n)| multinomial(&table.row(i), n, rng))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        samples = table.n_samples(),
        features = table.n_features(),
        "counts sampled"
    );
    CountMatrix::from_rows(
        &rows,
        table.sample_ids().to_vec(),
        table.feature_ids().to_vec(),
    )
}

/// Draw counts for a generated dataset using its `library_size` metadata.
pub fn sample_dataset_counts<R: Rng + ?Sized>(dataset: &Dataset, rng: &mut R) -> Result<CountMatrix> {
    let metadata = dataset.metadata.align_to(dataset.table.sample_ids())?;
    let library_sizes: Vec<u64> = metadata
        .column_f64("library_size")?
        .into_iter()
        .map(|v| -> Result<u64> {
            require_positive("library_size", v)?;
            Ok(v.round() as u64)
        })
        .collect::<Result<_>>()?;
    sample_counts(&dataset.table, &library_sizes, rng)
}

/// Multinomial draw by sequential conditional binomials.
fn multinomial<R: Rng + ?Sized>(probs: &[f64], n: u64, rng: &mut R) -> Result<Vec<u64>> {
    let mut counts = vec![0u64; probs.len()];
    let mut remaining = n;
    let mut mass: f64 = probs.iter().sum();

    for (j, &p) in probs.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if j == probs.len() - 1 {
            counts[j] = remaining;
            break;
        }
        let conditional = if mass > 0.0 { (p / mass).clamp(0.0, 1.0) } else { 0.0 };
        let draw = Binomial::new(remaining, conditional)
            .map_err(|e| SimError::Numerical(format!("Binomial draw: {}", e)))?
            .sample(rng);
        counts[j] = draw;
        remaining -= draw;
        mass -= p;
    }
    Ok(counts)
}

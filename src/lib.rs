//! Synthetic Compositional Benchmark Data
//!
//! This library generates relative-abundance datasets with known ground truth
//! for benchmarking differential abundance and gradient regression methods on
//! simplex-constrained data such as microbiome count tables.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Labeled structures (LabeledTable, Metadata, CountMatrix)
//! - **simplex**: Closure onto the unit simplex
//! - **benchmark**: Parameter sweeps producing (table, metadata, truth)
//!   datasets, generator configuration, and count sampling
//!
//! # Example
//!
//! ```
//! use simplex_sim::prelude::*;
//!
//! let gen = compositional_effect_size_generator(1.0, 5, 2, 5, 1).unwrap();
//! for dataset in gen {
//!     let (table, metadata, truth) = dataset.unwrap().into_parts();
//!     assert_eq!(table.n_samples(), metadata.n_samples());
//!     assert_eq!(truth, vec!["F0", "F4"]);
//! }
//! ```

pub mod benchmark;
pub mod data;
pub mod error;
pub mod simplex;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::benchmark::{
        compositional_effect_size_generator, compositional_regression_prefilter_generator,
        compositional_variable_features_generator, AnyGenerator, Dataset, DatasetGenerator,
        EffectSizeGenerator, EffectSizeParams, GeneratorConfig, RegressionPrefilterGenerator,
        RegressionPrefilterParams, VariableFeaturesGenerator, VariableFeaturesParams,
        // Count sampling
        expected_counts, sample_counts, sample_dataset_counts, CountSampler, LibrarySize,
        DEFAULT_LIBRARY_SIZE,
    };
    pub use crate::data::{CountMatrix, LabeledTable, Metadata, Variable, VariableType};
    pub use crate::error::{Result, SimError};
    pub use crate::simplex::{closure, closure_rows};
}

//! Synthetic compositional datasets with known ground truth.
//!
//! Each generator sweeps one parameter and yields a [`Dataset`] (table,
//! metadata, truth) per sweep position:
//!
//! - [`EffectSizeGenerator`]: growing perturbation on a fixed feature set
//! - [`VariableFeaturesGenerator`]: growing number of perturbed features
//! - [`RegressionPrefilterGenerator`]: gradient-causal curves with a growing
//!   number of gradient-independent contaminants

mod baseline;
mod config;
mod counts;
mod dataset;
mod effect_size;
mod regression;
mod sweep;
mod validate;
mod variable_features;

pub use baseline::{exponential_decay, gaussian_response, normal_pdf, uniform};
pub use config::{AnyGenerator, GeneratorConfig};
pub use counts::{expected_counts, sample_counts, sample_dataset_counts, CountSampler, LibrarySize};
pub use dataset::{
    Dataset, CONTAMINANT_PREFIX, DEFAULT_LIBRARY_SIZE, FEATURE_PREFIX, SAMPLE_PREFIX,
};
pub use effect_size::{compositional_effect_size_generator, EffectSizeGenerator, EffectSizeParams};
pub use regression::{
    compositional_regression_prefilter_generator, RegressionPrefilterGenerator,
    RegressionPrefilterParams, MIN_CONTAMINANTS,
};
pub use sweep::{linspace, DatasetGenerator, Sweep};
pub use variable_features::{
    compositional_variable_features_generator, VariableFeaturesGenerator, VariableFeaturesParams,
};

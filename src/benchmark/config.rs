//! Serializable generator configuration.
//!
//! A benchmark suite is usually described in a config file rather than in
//! code. `GeneratorConfig` names one of the three sweeps together with its
//! parameters:
//!
//! ```yaml
//! kind: effect_size
//! max_alpha: 1.0
//! reps: 5
//! intervals: 2
//! n_species: 5
//! n_diff: 1
//! ```

use super::dataset::Dataset;
use super::effect_size::{EffectSizeGenerator, EffectSizeParams};
use super::regression::{RegressionPrefilterGenerator, RegressionPrefilterParams};
use super::sweep::{impl_dataset_iterator, DatasetGenerator, Sweep};
use super::variable_features::{VariableFeaturesGenerator, VariableFeaturesParams};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which sweep to run, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorConfig {
    EffectSize(EffectSizeParams),
    VariableFeatures(VariableFeaturesParams),
    RegressionPrefilter(RegressionPrefilterParams),
}

impl GeneratorConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the parameters without building a generator.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::EffectSize(p) => p.validate(),
            Self::VariableFeatures(p) => p.validate(),
            Self::RegressionPrefilter(p) => p.validate(),
        }
    }

    /// Construct the configured generator.
    pub fn build(&self) -> Result<AnyGenerator> {
        Ok(match self {
            Self::EffectSize(p) => AnyGenerator::EffectSize(EffectSizeGenerator::new(p.clone())?),
            Self::VariableFeatures(p) => {
                AnyGenerator::VariableFeatures(VariableFeaturesGenerator::new(p.clone())?)
            }
            Self::RegressionPrefilter(p) => {
                AnyGenerator::RegressionPrefilter(RegressionPrefilterGenerator::new(p.clone())?)
            }
        })
    }
}

/// Any of the three generators, built from a `GeneratorConfig`.
#[derive(Debug, Clone)]
pub enum AnyGenerator {
    EffectSize(EffectSizeGenerator),
    VariableFeatures(VariableFeaturesGenerator),
    RegressionPrefilter(RegressionPrefilterGenerator),
}

impl DatasetGenerator for AnyGenerator {
    fn sweep(&self) -> &Sweep {
        match self {
            Self::EffectSize(g) => g.sweep(),
            Self::VariableFeatures(g) => g.sweep(),
            Self::RegressionPrefilter(g) => g.sweep(),
        }
    }

    fn sweep_mut(&mut self) -> &mut Sweep {
        match self {
            Self::EffectSize(g) => g.sweep_mut(),
            Self::VariableFeatures(g) => g.sweep_mut(),
            Self::RegressionPrefilter(g) => g.sweep_mut(),
        }
    }

    fn dataset_at(&self, position: usize) -> Result<Dataset> {
        match self {
            Self::EffectSize(g) => g.dataset_at(position),
            Self::VariableFeatures(g) => g.dataset_at(position),
            Self::RegressionPrefilter(g) => g.dataset_at(position),
        }
    }
}

impl_dataset_iterator!(AnyGenerator);

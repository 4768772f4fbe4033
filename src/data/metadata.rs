//! Per-sample covariates that accompany a generated table.

use crate::error::{SimError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A variable value that can be categorical, continuous, or ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variable {
    /// Categorical variable with string levels.
    Categorical(String),
    /// Continuous numeric variable.
    Continuous(f64),
    /// Ordinal variable with integer rank.
    Ordinal(i64),
    /// Missing value.
    Missing,
}

impl Variable {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Variable::Missing)
    }

    /// Try to get as categorical string.
    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            Variable::Categorical(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as continuous f64.
    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Variable::Continuous(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as ordinal i64.
    pub fn as_ordinal(&self) -> Option<i64> {
        match self {
            Variable::Ordinal(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value: continuous and ordinal values directly,
    /// categorical levels when they parse as numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Variable::Continuous(v) => Some(*v),
            Variable::Ordinal(v) => Some(*v as f64),
            Variable::Categorical(s) => s.trim().parse().ok(),
            Variable::Missing => None,
        }
    }

    fn variable_type(&self) -> Option<VariableType> {
        match self {
            Variable::Categorical(_) => Some(VariableType::Categorical),
            Variable::Continuous(_) => Some(VariableType::Continuous),
            Variable::Ordinal(_) => Some(VariableType::Ordinal),
            Variable::Missing => None,
        }
    }
}

/// Type of a metadata column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableType {
    Categorical,
    Continuous,
    Ordinal,
}

/// Sample metadata containing variables for each sample.
///
/// Sample order is preserved and matches the row order of the table it was
/// generated with.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Sample IDs in order.
    sample_ids: Vec<String>,
    /// Column names in insertion order.
    column_names: Vec<String>,
    /// Data stored as sample_id -> column_name -> Variable.
    data: HashMap<String, HashMap<String, Variable>>,
    /// Type of each column, taken from its first non-missing value.
    column_types: HashMap<String, VariableType>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self {
            sample_ids: Vec::new(),
            column_names: Vec::new(),
            data: HashMap::new(),
            column_types: HashMap::new(),
        }
    }

    /// Build metadata from named columns, each holding one value per sample.
    ///
    /// # Errors
    /// Returns `SimError::DimensionMismatch` if a column length differs from
    /// the number of samples, and `SimError::SampleMismatch` on duplicate
    /// sample IDs.
    pub fn from_columns(
        sample_ids: Vec<String>,
        columns: Vec<(String, Vec<Variable>)>,
    ) -> Result<Self> {
        let mut data: HashMap<String, HashMap<String, Variable>> = HashMap::new();
        for sid in &sample_ids {
            if data.insert(sid.clone(), HashMap::new()).is_some() {
                return Err(SimError::SampleMismatch(format!(
                    "Duplicate sample '{}'",
                    sid
                )));
            }
        }

        let mut column_names = Vec::with_capacity(columns.len());
        let mut column_types = HashMap::new();
        for (name, values) in columns {
            if values.len() != sample_ids.len() {
                return Err(SimError::DimensionMismatch {
                    expected: sample_ids.len(),
                    actual: values.len(),
                });
            }
            if let Some(t) = values.iter().find_map(Variable::variable_type) {
                column_types.insert(name.clone(), t);
            }
            for (sid, value) in sample_ids.iter().zip(values) {
                if let Some(sample_data) = data.get_mut(sid) {
                    sample_data.insert(name.clone(), value);
                }
            }
            column_names.push(name);
        }

        Ok(Self {
            sample_ids,
            column_names,
            data,
            column_types,
        })
    }

    /// Sample IDs in order.
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Column names.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of samples.
    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    /// Number of columns (variables).
    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Get a variable value for a specific sample and column.
    pub fn get(&self, sample_id: &str, column: &str) -> Option<&Variable> {
        self.data.get(sample_id).and_then(|m| m.get(column))
    }

    /// Get all values for a column.
    pub fn column(&self, column: &str) -> Result<Vec<&Variable>> {
        if !self.has_column(column) {
            return Err(SimError::MissingColumn(column.to_string()));
        }
        Ok(self
            .sample_ids
            .iter()
            .map(|sid| {
                self.data
                    .get(sid)
                    .and_then(|m| m.get(column))
                    .unwrap_or(&Variable::Missing)
            })
            .collect())
    }

    /// Get a column as numbers, in sample order.
    ///
    /// # Errors
    /// Fails if the column is missing or any value has no numeric view.
    pub fn column_f64(&self, column: &str) -> Result<Vec<f64>> {
        self.column(column)?
            .into_iter()
            .zip(&self.sample_ids)
            .map(|(v, sid)| {
                v.as_f64().ok_or_else(|| {
                    SimError::Numerical(format!(
                        "Column '{}' has no numeric value for sample '{}'",
                        column, sid
                    ))
                })
            })
            .collect()
    }

    /// Get the type of a column.
    pub fn column_type(&self, column: &str) -> Option<VariableType> {
        self.column_types.get(column).copied()
    }

    /// Get unique levels for a categorical column.
    pub fn levels(&self, column: &str) -> Result<Vec<String>> {
        let values = self.column(column)?;
        let mut levels: Vec<String> = values
            .iter()
            .filter_map(|v| v.as_categorical().map(String::from))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        levels.sort();
        Ok(levels)
    }

    /// Subset metadata to only include specified samples.
    pub fn subset_samples(&self, sample_ids: &[String]) -> Result<Self> {
        let mut new_data = HashMap::new();
        let mut new_sample_ids = Vec::new();

        for sid in sample_ids {
            if let Some(sample_data) = self.data.get(sid) {
                new_data.insert(sid.clone(), sample_data.clone());
                new_sample_ids.push(sid.clone());
            } else {
                return Err(SimError::SampleMismatch(format!(
                    "Sample '{}' not found in metadata",
                    sid
                )));
            }
        }

        Ok(Self {
            sample_ids: new_sample_ids,
            column_names: self.column_names.clone(),
            data: new_data,
            column_types: self.column_types.clone(),
        })
    }

    /// Align metadata to match the sample order of a table.
    pub fn align_to(&self, sample_ids: &[String]) -> Result<Self> {
        self.subset_samples(sample_ids)
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

//! Parameter checks shared by the generator constructors.

use crate::error::{SimError, Result};

pub(crate) fn require_nonzero(name: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(SimError::invalid(name, "must be at least 1"));
    }
    Ok(())
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimError::invalid(
            name,
            format!("must be a finite positive number, got {}", value),
        ));
    }
    Ok(())
}

pub(crate) fn require_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SimError::invalid(
            name,
            format!("must be finite, got {}", value),
        ));
    }
    Ok(())
}

/// Library sizes are recorded as ordinal metadata, which holds an `i64`.
pub(crate) fn require_recordable(name: &str, value: u64) -> Result<()> {
    if i64::try_from(value).is_err() {
        return Err(SimError::invalid(
            name,
            format!("{} exceeds the largest recordable value {}", value, i64::MAX),
        ));
    }
    Ok(())
}

/// Perturbing `per_side` features at each end of the feature axis needs
/// `2 * per_side` distinct features.
pub(crate) fn require_fits_both_ends(name: &str, per_side: usize, n_species: usize) -> Result<()> {
    if per_side.saturating_mul(2) > n_species {
        return Err(SimError::invalid(
            name,
            format!(
                "{} features per side need {} distinct features, but n_species is {}",
                per_side,
                per_side.saturating_mul(2),
                n_species
            ),
        ));
    }
    Ok(())
}

//! Baseline abundance profiles the generators perturb.

use crate::error::{SimError, Result};
use nalgebra::DMatrix;
use statrs::distribution::{Continuous, Normal};

/// Flat profile: every feature has abundance 1.
pub fn uniform(n_features: usize) -> Vec<f64> {
    vec![1.0; n_features]
}

fn normal(mean: f64, sigma: f64) -> Result<Normal> {
    Normal::new(mean, sigma)
        .map_err(|e| SimError::Numerical(format!("Normal({}, {}): {}", mean, sigma, e)))
}

/// Normal density N(x; mean, sigma).
pub fn normal_pdf(x: f64, mean: f64, sigma: f64) -> Result<f64> {
    Ok(normal(mean, sigma)?.pdf(x))
}

/// Gaussian response curves over a gradient.
///
/// Entry `(i, j)` is the density of feature `j` at sample position
/// `gradient[i]`, with feature `j` peaking at `centers[j]`.
pub fn gaussian_response(gradient: &[f64], centers: &[f64], sigma: f64) -> Result<DMatrix<f64>> {
    let curves = centers
        .iter()
        .map(|&mu| normal(mu, sigma))
        .collect::<Result<Vec<_>>>()?;
    Ok(DMatrix::from_fn(gradient.len(), centers.len(), |i, j| {
        curves[j].pdf(gradient[i])
    }))
}

/// Exponentially decaying weights `exp(-x / lam)` for `x` evenly spaced on
/// [0, 1]. The first weight is 1.
pub fn exponential_decay(n: usize, lam: f64) -> Vec<f64> {
    super::sweep::linspace(0.0, 1.0, n)
        .into_iter()
        .map(|x| (-x / lam).exp())
        .collect()
}

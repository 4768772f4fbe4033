//! Closure: rescaling non-negative vectors onto the unit simplex.
//!
//! Closure divides every entry of a vector by the vector's total so the
//! result sums to 1. It is the relative-abundance counterpart of total sum
//! scaling, applied here to abundance profiles rather than observed counts.

use crate::error::{SimError, Result};
use nalgebra::DMatrix;

/// Close a single non-negative vector so it sums to 1.
///
/// # Errors
/// Returns `SimError::Numerical` if any entry is negative or non-finite, or if
/// the vector total is zero (an all-zero abundance profile cannot be closed).
/// Entries whose total overflows are closed relative to the largest entry.
///
/// # Example
/// ```
/// use simplex_sim::simplex::closure;
///
/// let c = closure(&[10.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
/// assert!((c.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// assert!((c[0] - 10.0 / 14.0).abs() < 1e-12);
/// ```
pub fn closure(values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(SimError::EmptyData(
            "Cannot close an empty vector".to_string(),
        ));
    }
    close(values, "vector")
}

/// Close every row of a matrix (rows are samples, columns are features).
///
/// # Errors
/// Returns `SimError::Numerical` naming the first row that has a negative or
/// non-finite entry, or that sums to zero.
pub fn closure_rows(matrix: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if matrix.nrows() == 0 || matrix.ncols() == 0 {
        return Err(SimError::EmptyData(
            "Cannot close an empty matrix".to_string(),
        ));
    }

    let mut closed = matrix.clone();
    for i in 0..matrix.nrows() {
        let row: Vec<f64> = matrix.row(i).iter().copied().collect();
        let row = close(&row, &format!("row {}", i))?;
        for (j, v) in row.into_iter().enumerate() {
            closed[(i, j)] = v;
        }
    }
    Ok(closed)
}

/// Divide a non-negative profile by its total.
///
/// A total that overflows is recomputed on the profile scaled by its largest
/// entry, which keeps every scaled entry in [0, 1].
fn close(values: &[f64], what: &str) -> Result<Vec<f64>> {
    let mut largest: f64 = 0.0;
    for &v in values {
        if !v.is_finite() || v < 0.0 {
            return Err(SimError::Numerical(format!(
                "Cannot close {}: entry {} is not a finite non-negative value",
                what, v
            )));
        }
        largest = largest.max(v);
    }
    if largest <= 0.0 {
        return Err(SimError::Numerical(format!(
            "Cannot close {}: all entries are zero",
            what
        )));
    }

    let total: f64 = values.iter().sum();
    let closed: Vec<f64> = if total.is_finite() {
        values.iter().map(|&v| v / total).collect()
    } else {
        let scaled: Vec<f64> = values.iter().map(|&v| v / largest).collect();
        let scaled_total: f64 = scaled.iter().sum();
        scaled.into_iter().map(|v| v / scaled_total).collect()
    };

    if closed.iter().any(|v| !v.is_finite()) {
        return Err(SimError::Numerical(format!(
            "Cannot close {}: total of {} is not representable",
            what, total
        )));
    }
    Ok(closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closure_uniform() {
        let c = closure(&[1.0; 5]).unwrap();
        for v in c {
            assert_relative_eq!(v, 0.2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_closure_rows_sum_to_one() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 0.0, 5.0, 5.0]);
        let closed = closure_rows(&m).unwrap();

        assert_relative_eq!(closed.row(0).sum(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(closed.row(1).sum(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(closed[(0, 2)], 0.5, epsilon = 1e-12);
        assert_eq!(closed[(1, 0)], 0.0);
    }

    #[test]
    fn test_zero_row_is_fatal() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 0.0, 0.0]);
        let err = closure_rows(&m).unwrap_err();
        assert!(matches!(err, SimError::Numerical(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_negative_entry_rejected() {
        assert!(closure(&[1.0, -0.5]).is_err());
        assert!(closure(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_overflowing_total_still_closes() {
        let c = closure(&[1e308, 1e308, 1.0]).unwrap();
        assert_relative_eq!(c[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(c[1], 0.5, epsilon = 1e-12);
        assert!(c[2] >= 0.0 && c[2] < 1e-300);
        assert_relative_eq!(c.iter().sum::<f64>(), 1.0, epsilon = 1e-12);

        let m = DMatrix::from_row_slice(2, 2, &[f64::MAX, f64::MAX, 1.0, 3.0]);
        let closed = closure_rows(&m).unwrap();
        assert_relative_eq!(closed.row(0).sum(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(closed[(0, 1)], 0.5, epsilon = 1e-12);
        assert_relative_eq!(closed[(1, 1)], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(closure(&[]), Err(SimError::EmptyData(_))));
    }
}

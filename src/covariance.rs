// src/covariance.rs

//! Data preprocessing: centering and the empirical covariance matrix.

use crate::error::{GgmError, Result};
use ndarray::{Array1, Array2, Axis};

/// Center the data by subtracting the mean of each column.
///
/// # Arguments
/// * `x` - Data matrix of shape (n_samples, n_features)
///
/// # Returns
/// * Tuple of (centered_data, mean_vector)
pub fn center(x: &Array2<f64>) -> (Array2<f64>, Array1<f64>) {
    let mean = x
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()));
    let centered = x - &mean;
    (centered, mean)
}

/// Unbiased sample covariance of the columns of `x`.
///
/// Uses the `n_samples - 1` denominator, so at least two rows are required.
///
/// # Arguments
/// * `x` - Data matrix of shape (n_samples, n_features)
///
/// # Returns
/// * Symmetric (n_features × n_features) covariance matrix
pub fn empirical_covariance(x: &Array2<f64>) -> Result<Array2<f64>> {
    let (n, p) = x.dim();

    if n < 2 {
        return Err(GgmError::InvalidDimensions {
            message: format!("covariance needs at least 2 observations, got {}", n),
        });
    }
    if p == 0 {
        return Err(GgmError::InvalidDimensions {
            message: "data must have at least one column".into(),
        });
    }

    let (centered, _) = center(x);
    let mut cov = centered.t().dot(&centered) / (n - 1) as f64;

    // Enforce exact symmetry against rounding in the product
    for i in 0..p {
        for j in (i + 1)..p {
            let avg = 0.5 * (cov[[i, j]] + cov[[j, i]]);
            cov[[i, j]] = avg;
            cov[[j, i]] = avg;
        }
    }

    Ok(cov)
}

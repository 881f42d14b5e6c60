// src/math.rs

//! Mathematical utilities for the proximal-gradient estimator.

use crate::config::ConvergenceNorm;
use crate::error::{GgmError, Result};
use ndarray::Array2;
use ndarray_linalg::error::LinalgError;
use ndarray_linalg::{Determinant, Inverse, Norm, SVD};

/// Reciprocal condition numbers below this are treated as singular.
pub const RCOND_THRESHOLD: f64 = f64::EPSILON;

/// Invert a square matrix, reporting singularity as an error.
///
/// Fails with `GgmError::SingularMatrix` when LAPACK cannot factor the
/// matrix, when the input or the computed inverse has non-finite entries,
/// or when the 1-norm reciprocal condition number falls below
/// [`RCOND_THRESHOLD`].
pub fn try_inverse(m: &Array2<f64>) -> Result<Array2<f64>> {
    if m.nrows() != m.ncols() {
        return Err(GgmError::InvalidDimensions {
            message: format!("cannot invert a {}x{} matrix", m.nrows(), m.ncols()),
        });
    }
    if m.iter().any(|v| !v.is_finite()) {
        return Err(GgmError::SingularMatrix);
    }

    let inv = m.inv().map_err(|_| GgmError::SingularMatrix)?;
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(GgmError::SingularMatrix);
    }

    let rcond = 1.0 / (one_norm(m) * one_norm(&inv));
    if !(rcond >= RCOND_THRESHOLD) {
        return Err(GgmError::SingularMatrix);
    }

    Ok(inv)
}

/// Maximum absolute column sum.
fn one_norm(m: &Array2<f64>) -> f64 {
    m.columns()
        .into_iter()
        .map(|col| col.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Compute the signed log-determinant of a square matrix using LAPACK.
///
/// Returns (sign, log_abs_det) where:
/// - sign is 1.0, -1.0, or 0.0
/// - log_abs_det is ln(|det(m)|), `-inf` for a singular matrix
pub fn sln_det(m: &Array2<f64>) -> Result<(f64, f64)> {
    match m.sln_det() {
        Ok(signed) => Ok(signed),
        // getrf reports an exactly zero pivot
        Err(LinalgError::Lapack(_)) => Ok((0.0, f64::NEG_INFINITY)),
        Err(e) => Err(GgmError::ComputationError {
            message: format!("LU decomposition failed in determinant computation: {}", e),
        }),
    }
}

/// Soft-threshold a scalar: the proximal map of `r * |x|`.
#[inline]
pub fn soft_threshold(x: f64, r: f64) -> f64 {
    if x <= -r {
        x + r
    } else if x >= r {
        x - r
    } else {
        0.0
    }
}

/// Soft-threshold every entry of `m` in place, diagonal included.
pub fn soft_threshold_inplace(m: &mut Array2<f64>, r: f64) {
    m.mapv_inplace(|x| soft_threshold(x, r));
}

/// Largest singular value of `m`.
pub fn spectral_norm(m: &Array2<f64>) -> Result<f64> {
    let (_, s, _) = m.svd(false, false).map_err(|e| GgmError::ComputationError {
        message: format!("SVD failed in spectral norm computation: {}", e),
    })?;
    Ok(s.iter().cloned().fold(0.0, f64::max))
}

/// Frobenius norm of `m`.
pub fn frobenius_norm(m: &Array2<f64>) -> f64 {
    m.norm_l2()
}

/// Sum of absolute values of all entries of `m`.
pub fn entrywise_l1_norm(m: &Array2<f64>) -> f64 {
    m.norm_l1()
}

/// Matrix norm selected by `norm`.
pub fn matrix_norm(m: &Array2<f64>, norm: ConvergenceNorm) -> Result<f64> {
    match norm {
        ConvergenceNorm::Spectral => spectral_norm(m),
        ConvergenceNorm::Frobenius => Ok(frobenius_norm(m)),
    }
}

/// Trace of the element-wise product: sum_i a_ii * b_ii.
pub fn hadamard_trace(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    a.diag().iter().zip(b.diag().iter()).map(|(x, y)| x * y).sum()
}

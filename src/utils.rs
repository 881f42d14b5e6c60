//! Utility functions for evaluating precision-matrix estimates.

use ndarray::Array2;

/// Symmetrize a matrix: (A + A^T) / 2.
///
/// The proximal-gradient iterates are only symmetric up to rounding, and
/// not at all when started from an asymmetric guess.
pub fn symmetrize(a: &Array2<f64>) -> Array2<f64> {
    (a + &a.t()) / 2.0
}

/// Sum of absolute values of the off-diagonal entries.
pub fn off_diagonal_l1(a: &Array2<f64>) -> f64 {
    a.indexed_iter()
        .filter(|&((i, j), _)| i != j)
        .map(|(_, v)| v.abs())
        .sum()
}

/// Number of edges in the estimated graph.
///
/// Counts unordered pairs `i < j` where either `a[i, j]` or `a[j, i]`
/// exceeds `tol` in magnitude.
///
/// # Arguments
/// * `a` - Square precision estimate
/// * `tol` - Magnitude at or below which an entry counts as zero
pub fn support_size(a: &Array2<f64>, tol: f64) -> usize {
    let n = a.nrows();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if a[[i, j]].abs() > tol || a[[j, i]].abs() > tol {
                count += 1;
            }
        }
    }
    count
}

/// Relative Frobenius error of `estimate` against `truth`.
///
/// Returns `||estimate - truth||_F / ||truth||_F`, or the absolute error
/// when `truth` is the zero matrix.
pub fn relative_error(estimate: &Array2<f64>, truth: &Array2<f64>) -> f64 {
    let diff: f64 = estimate
        .iter()
        .zip(truth.iter())
        .map(|(e, t)| (e - t).powi(2))
        .sum::<f64>()
        .sqrt();
    let scale: f64 = truth.iter().map(|t| t * t).sum::<f64>().sqrt();

    if scale > 0.0 {
        diff / scale
    } else {
        diff
    }
}

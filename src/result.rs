//! Result types for the proximal-gradient estimator.

use ndarray::Array2;

/// Result of running the proximal-gradient mapping.
#[derive(Debug, Clone)]
pub struct PrecisionEstimate {
    /// Estimated precision matrix (n_features × n_features).
    ///
    /// Neither symmetry nor positive-definiteness is guaranteed.
    pub precision: Array2<f64>,

    /// Whether the relative change fell below the tolerance.
    pub converged: bool,

    /// Number of iterations performed, failed steps included.
    pub n_iterations: usize,

    /// Step size in effect when iteration stopped.
    pub step_size: f64,

    /// Number of iterations where the working estimate was singular.
    pub failed_steps: usize,
}

impl PrecisionEstimate {
    /// Consume the result and return the estimated precision matrix.
    pub fn into_precision(self) -> Array2<f64> {
        self.precision
    }

    /// Number of off-diagonal entries that are exactly zero.
    ///
    /// Each zero pair marks a conditional independence in the fitted
    /// Gaussian graphical model.
    pub fn zero_off_diagonal(&self) -> usize {
        self.precision
            .indexed_iter()
            .filter(|&((i, j), &v)| i != j && v == 0.0)
            .count()
    }
}

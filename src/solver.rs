// src/solver.rs

//! Main proximal-gradient solver interface.

use crate::config::ProxGradientConfig;
use crate::core;
use crate::covariance::empirical_covariance;
use crate::error::{GgmError, Result};
use crate::result::PrecisionEstimate;

use ndarray::Array2;

/// Sparse precision-matrix estimator based on the proximal-gradient mapping.
///
/// This struct provides static methods for fitting; every call is independent.
pub struct ProxGradient;

impl ProxGradient {
    /// Fit with default configuration.
    ///
    /// # Arguments
    /// * `data` - Data matrix of shape (n_samples, n_features)
    /// * `theta_start` - Initial precision estimate of shape (n_features, n_features)
    ///
    /// # Returns
    /// * `PrecisionEstimate` containing the estimate and stopping information
    pub fn fit(data: &Array2<f64>, theta_start: &Array2<f64>) -> Result<PrecisionEstimate> {
        Self::fit_with_config(data, theta_start, &ProxGradientConfig::default())
    }

    /// Fit with custom configuration.
    ///
    /// A singular working estimate never causes an error: the step size is
    /// multiplied by `update_change` and the iteration retries from the
    /// estimate the last successful step started at, which is the identity
    /// before any step has succeeded.
    ///
    /// # Arguments
    /// * `data` - Data matrix of shape (n_samples, n_features)
    /// * `theta_start` - Initial precision estimate of shape (n_features, n_features)
    /// * `config` - Algorithm configuration
    ///
    /// # Returns
    /// * `PrecisionEstimate` containing the estimate and stopping information
    pub fn fit_with_config(
        data: &Array2<f64>,
        theta_start: &Array2<f64>,
        config: &ProxGradientConfig,
    ) -> Result<PrecisionEstimate> {
        config.validate()?;
        check_inputs(data, theta_start, "theta_start")?;

        let cov = empirical_covariance(data)?;

        log::debug!(
            "Running proximal gradient on {} x {} data (step size {:.4e}, regularizer {:.4e})",
            data.nrows(),
            data.ncols(),
            config.update_w,
            config.regularizer
        );

        let (precision, info) = core::run(&cov, theta_start, config)?;

        if info.failed_steps > 0 {
            log::warn!(
                "{} of {} iterations failed to step; step size shrank to {:.4e}",
                info.failed_steps,
                info.n_iterations,
                info.step_size
            );
        }
        if !info.converged && config.max_iter > 0 {
            log::info!(
                "Proximal gradient stopped after {} iterations without reaching tolerance {:.4e}{}",
                info.n_iterations,
                config.tol,
                info.delta_norm
                    .map(|d| format!(" (last relative change {:.4e})", d))
                    .unwrap_or_default()
            );
        }

        Ok(PrecisionEstimate {
            precision,
            converged: info.converged,
            n_iterations: info.n_iterations,
            step_size: info.step_size,
            failed_steps: info.failed_steps,
        })
    }
}

/// Estimate a sparse precision matrix by the proximal-gradient mapping.
///
/// Convenience wrapper over [`ProxGradient::fit_with_config`] taking the
/// hyperparameters positionally and returning only the estimate. Uses the
/// spectral norm for the stopping statistic.
///
/// # Arguments
/// * `data` - Data matrix of shape (n_samples, n_features)
/// * `theta_start` - Initial precision estimate of shape (n_features, n_features)
/// * `update_w` - Initial step size
/// * `update_change` - Step-size shrink factor applied after a singular estimate
/// * `regularizer` - Soft-threshold magnitude
/// * `max_iter` - Maximum number of iterations
/// * `tol` - Relative-change tolerance
pub fn estimate_precision(
    data: &Array2<f64>,
    theta_start: &Array2<f64>,
    update_w: f64,
    update_change: f64,
    regularizer: f64,
    max_iter: usize,
    tol: f64,
) -> Result<Array2<f64>> {
    let config = ProxGradientConfig {
        update_w,
        update_change,
        regularizer,
        max_iter,
        tol,
        ..ProxGradientConfig::default()
    };
    ProxGradient::fit_with_config(data, theta_start, &config)
        .map(PrecisionEstimate::into_precision)
}

/// Check that `data` is a finite sample matrix with at least two rows and one
/// column, and that `theta` is a finite square matrix matching its width.
pub(crate) fn check_inputs(
    data: &Array2<f64>,
    theta: &Array2<f64>,
    theta_name: &'static str,
) -> Result<()> {
    let (n, p) = data.dim();

    if n < 2 || p == 0 {
        return Err(GgmError::InvalidDimensions {
            message: format!(
                "data must have at least 2 rows and 1 column, got {} x {}",
                n, p
            ),
        });
    }

    if theta.dim() != (p, p) {
        return Err(GgmError::DimensionMismatch {
            what: theta_name,
            expected: (p, p),
            found: theta.dim(),
        });
    }

    if data.iter().any(|v| !v.is_finite()) {
        return Err(GgmError::NonFiniteInput { what: "data" });
    }
    if theta.iter().any(|v| !v.is_finite()) {
        return Err(GgmError::NonFiniteInput { what: theta_name });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::off_diagonal_l1;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::StandardNormal;

    /// Draw `n` rows from N(0, diag(1 / precision)).
    fn generate_diagonal_data(precision: &[f64], n: usize, seed: u64) -> Array2<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut x = Array2::zeros((n, precision.len()));
        for i in 0..n {
            for (j, &prec) in precision.iter().enumerate() {
                let z: f64 = rng.sample(StandardNormal);
                x[[i, j]] = z / prec.sqrt();
            }
        }
        x
    }

    #[test]
    fn test_fit_default() {
        let x = generate_diagonal_data(&[2.0, 3.0, 4.0], 500, 42);
        let result = ProxGradient::fit(&x, &Array2::eye(3)).unwrap();

        assert_eq!(result.precision.dim(), (3, 3));
        assert!(result.n_iterations <= ProxGradientConfig::default().max_iter);
        assert_eq!(result.failed_steps, 0);
    }

    #[test]
    fn test_fit_recovers_diagonal_precision() {
        let x = generate_diagonal_data(&[2.0, 3.0, 4.0], 20_000, 7);
        let config = ProxGradientConfig::builder()
            .update_w(2.0)
            .max_iter(100)
            .tol(1e-6)
            .build();

        let result = ProxGradient::fit_with_config(&x, &Array2::eye(3), &config).unwrap();

        assert!(result.converged);
        for (i, &want) in [2.0, 3.0, 4.0].iter().enumerate() {
            let got = result.precision[[i, i]];
            assert!(
                (got - want).abs() < 0.1 * want,
                "diagonal {} should be near {}, got {}",
                i,
                want,
                got
            );
        }
    }

    #[test]
    fn test_regularizer_shrinks_off_diagonals() {
        let x = generate_diagonal_data(&[2.0, 3.0, 4.0], 2_000, 11);
        let start = Array2::eye(3);

        let mut masses = Vec::new();
        for &regularizer in &[0.0, 0.05, 0.2] {
            let config = ProxGradientConfig::builder()
                .update_w(1.0)
                .regularizer(regularizer)
                .max_iter(200)
                .tol(1e-8)
                .build();
            let result = ProxGradient::fit_with_config(&x, &start, &config).unwrap();
            masses.push(off_diagonal_l1(&result.precision));
        }

        assert!(masses[0] > 0.0);
        assert!(masses[1] <= masses[0]);
        assert!(masses[2] <= masses[1]);
        assert_eq!(masses[2], 0.0);
    }

    #[test]
    fn test_singular_start_recovers() {
        let x = generate_diagonal_data(&[2.0, 3.0], 200, 3);
        let config = ProxGradientConfig::builder()
            .update_w(0.8)
            .update_change(0.5)
            .max_iter(10)
            .build();

        let result = ProxGradient::fit_with_config(&x, &Array2::zeros((2, 2)), &config).unwrap();

        assert!(result.n_iterations <= 10);
        assert!(result.failed_steps >= 1);
        assert!(result.failed_steps < result.n_iterations);
        assert!(result.precision.iter().all(|v| v.is_finite()));
        assert_ne!(result.precision, Array2::<f64>::eye(2));
        let k = result.failed_steps as i32;
        assert!((result.step_size - 0.8 * 0.5_f64.powi(k)).abs() < 1e-15);
    }

    #[test]
    fn test_estimate_precision_matches_solver() {
        let x = generate_diagonal_data(&[2.0, 3.0, 4.0], 300, 9);
        let start = Array2::eye(3);

        let theta = estimate_precision(&x, &start, 1.0, 0.5, 0.01, 50, 1e-7).unwrap();
        let config = ProxGradientConfig::builder()
            .update_w(1.0)
            .update_change(0.5)
            .regularizer(0.01)
            .max_iter(50)
            .tol(1e-7)
            .build();
        let result = ProxGradient::fit_with_config(&x, &start, &config).unwrap();

        assert_eq!(theta, result.precision);
    }

    #[test]
    fn test_zero_regularizer_is_plain_gradient_step() {
        let x = generate_diagonal_data(&[1.0, 2.0], 50, 21);
        let start = array![[1.0, 0.1], [0.1, 1.0]];
        let cov = empirical_covariance(&x).unwrap();

        let theta = estimate_precision(&x, &start, 0.3, 0.5, 0.0, 1, 0.0).unwrap();

        let inv = crate::math::try_inverse(&start).unwrap();
        let expected = &start - &((&cov - &inv) * 0.3);
        for (a, b) in theta.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_theta_start_dimension_mismatch() {
        let x = generate_diagonal_data(&[1.0, 1.0, 1.0], 10, 1);
        let err = ProxGradient::fit(&x, &Array2::eye(2)).unwrap_err();

        assert_eq!(
            err,
            GgmError::DimensionMismatch {
                what: "theta_start",
                expected: (3, 3),
                found: (2, 2),
            }
        );
    }

    #[test]
    fn test_too_few_rows() {
        let x = array![[1.0, 2.0]];
        assert!(matches!(
            ProxGradient::fit(&x, &Array2::eye(2)),
            Err(GgmError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_non_finite_inputs() {
        let x = array![[1.0, f64::NAN], [2.0, 3.0], [0.5, 0.1]];
        assert_eq!(
            ProxGradient::fit(&x, &Array2::eye(2)).unwrap_err(),
            GgmError::NonFiniteInput { what: "data" }
        );

        let x = array![[1.0, 0.0], [2.0, 3.0], [0.5, 0.1]];
        let start = array![[1.0, f64::INFINITY], [0.0, 1.0]];
        assert_eq!(
            ProxGradient::fit(&x, &start).unwrap_err(),
            GgmError::NonFiniteInput { what: "theta_start" }
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let x = generate_diagonal_data(&[1.0, 1.0], 10, 5);
        let config = ProxGradientConfig::builder().update_w(-1.0).build();
        assert!(matches!(
            ProxGradient::fit_with_config(&x, &Array2::eye(2), &config),
            Err(GgmError::InvalidConfig { .. })
        ));
    }
}

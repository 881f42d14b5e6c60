// src/core.rs

//! Core proximal-gradient iteration.

use crate::config::ProxGradientConfig;
use crate::error::{GgmError, Result};
use crate::math::{matrix_norm, soft_threshold_inplace, try_inverse};
use ndarray::Array2;

/// Information returned from the core iteration.
pub struct CoreInfo {
    /// Whether the relative change dropped below the tolerance.
    pub converged: bool,
    /// Number of iterations consumed, failed steps included.
    pub n_iterations: usize,
    /// Step size after all shrinkage.
    pub step_size: f64,
    /// Number of iterations whose step failed and shrank the step size.
    pub failed_steps: usize,
    /// Relative change of the last successful step, if any.
    pub delta_norm: Option<f64>,
}

/// One proximal-gradient step from `theta_k`.
///
/// Computes `prox_r(theta_k - w * (S - theta_k^{-1}))`, or
/// `Err(SingularMatrix)` when `theta_k` cannot be inverted or the step
/// overflows.
pub fn prox_step(
    theta_k: &Array2<f64>,
    cov: &Array2<f64>,
    update_w: f64,
    regularizer: f64,
) -> Result<Array2<f64>> {
    let inv_theta = try_inverse(theta_k)?;
    let mut theta_p = theta_k - &((cov - &inv_theta) * update_w);
    soft_threshold_inplace(&mut theta_p, regularizer);
    if theta_p.iter().any(|v| !v.is_finite()) {
        return Err(GgmError::SingularMatrix);
    }
    Ok(theta_p)
}

/// Run the proximal-gradient mapping.
///
/// `cov` is the empirical covariance of the data and `theta_start` the
/// initial estimate; both must already be validated as square and of the
/// same size. Returns the last proposed estimate, which is the identity if
/// no step succeeded.
///
/// A failed step shrinks the step size and retries from the estimate the
/// last successful step started at, or from the identity before any step
/// has succeeded. Failed steps never count toward convergence.
pub fn run(
    cov: &Array2<f64>,
    theta_start: &Array2<f64>,
    config: &ProxGradientConfig,
) -> Result<(Array2<f64>, CoreInfo)> {
    let p = cov.nrows();

    let mut update_w = config.update_w;
    let mut theta_p = Array2::<f64>::eye(p);
    let mut theta_k = theta_start.clone();
    let mut anchor = theta_p.clone();

    let mut converged = false;
    let mut failed_steps = 0;
    let mut delta_norm = None;
    let mut iter = 0;

    while !converged && iter < config.max_iter {
        iter += 1;

        match prox_step(&theta_k, cov, update_w, config.regularizer) {
            Ok(proposal) => {
                anchor.assign(&theta_k);
                theta_p = proposal;
            }
            Err(GgmError::SingularMatrix) => {
                update_w *= config.update_change;
                theta_k.assign(&anchor);
                failed_steps += 1;
                log::debug!(
                    "iteration {}: step failed, retrying with step size {:.4e}",
                    iter,
                    update_w
                );
                continue;
            }
            Err(e) => return Err(e),
        }

        let change = matrix_norm(&(&theta_k - &theta_p), config.norm)?
            / matrix_norm(&theta_k, config.norm)?;
        delta_norm = Some(change);
        theta_k.assign(&theta_p);
        converged = change < config.tol;

        if config.verbose {
            log::debug!("iteration {}, relative change = {:.4e}", iter, change);
        } else {
            log::trace!("iteration {}, relative change = {:.4e}", iter, change);
        }
    }

    let info = CoreInfo {
        converged,
        n_iterations: iter,
        step_size: update_w,
        failed_steps,
        delta_norm,
    };

    Ok((theta_p, info))
}

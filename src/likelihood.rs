// src/likelihood.rs

//! Penalized Gaussian likelihood of a precision-matrix estimate.
//!
//! The score is
//!
//! ```text
//! -( N/2 * (tr(Theta ⊙ S) - ln|det Theta|) + lambda * sqrt(ln(P) / N) * ||Theta||_1 / 2 )
//! ```
//!
//! where `S` is the empirical covariance of the data, `⊙` the element-wise
//! product and `||·||_1` the sum of absolute entries. Callers comparing
//! candidate estimates minimize the score.

use crate::covariance::empirical_covariance;
use crate::error::{GgmError, Result};
use crate::math::{entrywise_l1_norm, hadamard_trace, sln_det};
use crate::solver::check_inputs;

use ndarray::Array2;

/// The individual terms of the penalized likelihood score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikelihoodTerms {
    /// `tr(Theta ⊙ S)`.
    pub trace_term: f64,
    /// `ln|det Theta|`; `-inf` when the determinant is zero.
    pub log_det: f64,
    /// Sign of `det Theta`: 1.0, -1.0, or 0.0.
    pub det_sign: f64,
    /// `N/2 * (trace_term - log_det)`.
    pub base: f64,
    /// `lambda * sqrt(ln(P) / N) * ||Theta||_1 / 2`.
    pub penalty: f64,
}

impl LikelihoodTerms {
    /// The score to minimize: `-(base + penalty)`.
    pub fn value(&self) -> f64 {
        -(self.base + self.penalty)
    }

    /// Whether `Theta` had a strictly positive determinant.
    pub fn positive_determinant(&self) -> bool {
        self.det_sign > 0.0
    }
}

/// Compute every term of the penalized likelihood score.
///
/// A non-positive or zero determinant is not an error: the sign is
/// recorded and `ln|det|` is used, so a singular `theta` yields a
/// non-finite score.
///
/// # Arguments
/// * `data` - Data matrix of shape (n_samples, n_features)
/// * `theta` - Precision estimate of shape (n_features, n_features)
/// * `regularizer` - Penalty strength, lambda; must be non-negative and finite
pub fn evaluate(
    data: &Array2<f64>,
    theta: &Array2<f64>,
    regularizer: f64,
) -> Result<LikelihoodTerms> {
    if !regularizer.is_finite() || regularizer < 0.0 {
        return Err(GgmError::InvalidConfig {
            parameter: "regularizer".into(),
            message: format!("must be non-negative and finite, got {}", regularizer),
        });
    }
    check_inputs(data, theta, "theta")?;

    let (n, p) = data.dim();
    let n_f = n as f64;

    let cov = empirical_covariance(data)?;
    let trace_term = hadamard_trace(theta, &cov);

    let (det_sign, log_det) = sln_det(theta)?;
    if det_sign <= 0.0 {
        log::debug!(
            "precision estimate has determinant sign {}; scoring with ln|det| = {}",
            det_sign,
            log_det
        );
    }

    let base = n_f * 0.5 * (-log_det + trace_term);
    let penalty =
        regularizer * ((p as f64).ln() / n_f).sqrt() * entrywise_l1_norm(theta) * 0.5;

    Ok(LikelihoodTerms {
        trace_term,
        log_det,
        det_sign,
        base,
        penalty,
    })
}

/// Penalized negative log-likelihood of `theta` against `data`.
///
/// Shorthand for `evaluate(data, theta, regularizer)?.value()`.
pub fn penalized_negative_log_likelihood(
    data: &Array2<f64>,
    theta: &Array2<f64>,
    regularizer: f64,
) -> Result<f64> {
    Ok(evaluate(data, theta, regularizer)?.value())
}

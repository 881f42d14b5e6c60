// src/lib.rs

//! # prox-ggm
//!
//! Sparse precision-matrix (inverse covariance) estimation for Gaussian
//! graphical models using the proximal-gradient mapping, plus a penalized
//! Gaussian likelihood for scoring candidate estimates.
//!
//! Each iteration takes a gradient step on the Gaussian log-likelihood,
//! `Theta - gamma * (S - Theta^{-1})`, then soft-thresholds every entry by
//! `lambda`. When the working estimate cannot be inverted the step size is
//! shrunk and the iteration restarts from the initial guess.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ndarray::Array2;
//! use prox_ggm::{penalized_negative_log_likelihood, ProxGradient, ProxGradientConfig};
//!
//! # fn main() -> Result<(), prox_ggm::GgmError> {
//! // Data matrix (n_samples x n_features)
//! let x = Array2::<f64>::zeros((500, 4));
//! let theta_start = Array2::<f64>::eye(4);
//!
//! let config = ProxGradientConfig::builder()
//!     .update_w(0.5)
//!     .regularizer(0.05)
//!     .max_iter(200)
//!     .tol(1e-6)
//!     .build();
//! let result = ProxGradient::fit_with_config(&x, &theta_start, &config)?;
//!
//! // Lower is better when comparing estimates
//! let score = penalized_negative_log_likelihood(&x, &result.precision, 0.05)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod core;
mod covariance;
mod error;
mod likelihood;
mod math;
mod result;
mod solver;

pub use config::{ConfigBuilder, ConvergenceNorm, ProxGradientConfig};
pub use covariance::{center, empirical_covariance};
pub use error::{GgmError, Result};
pub use likelihood::{evaluate, penalized_negative_log_likelihood, LikelihoodTerms};
pub use math::{soft_threshold, soft_threshold_inplace, try_inverse};
pub use result::PrecisionEstimate;
pub use solver::{estimate_precision, ProxGradient};

// Utility functions
pub mod utils;

// Re-export ndarray for convenience
pub use ndarray;

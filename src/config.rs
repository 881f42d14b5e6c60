// src/config.rs

//! Configuration for the proximal-gradient estimator.

use crate::error::{GgmError, Result};

/// Matrix norm used by the relative-change stopping statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvergenceNorm {
    /// Largest singular value.
    #[default]
    Spectral,
    /// Square root of the sum of squared entries.
    Frobenius,
}

/// Hyperparameters of the proximal-gradient mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxGradientConfig {
    /// Initial gradient step size (gamma). Shrinks on every failed step.
    pub update_w: f64,

    /// Factor applied to `update_w` when the current estimate cannot be inverted.
    /// Expected to lie in (0, 1).
    pub update_change: f64,

    /// Soft-threshold magnitude (lambda).
    pub regularizer: f64,

    /// Maximum number of iterations, failed steps included.
    pub max_iter: usize,

    /// Relative-change tolerance at which iteration stops.
    pub tol: f64,

    /// Norm used for the relative-change statistic.
    pub norm: ConvergenceNorm,

    /// If true, log every iteration at debug level instead of trace.
    pub verbose: bool,
}

impl Default for ProxGradientConfig {
    fn default() -> Self {
        Self {
            update_w: 0.5,
            update_change: 0.5,
            regularizer: 0.0,
            max_iter: 100,
            tol: 1e-6,
            norm: ConvergenceNorm::default(),
            verbose: false,
        }
    }
}

impl ProxGradientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// `update_change` outside (0, 1) is accepted with a warning; it only
    /// degrades the recovery from failed steps.
    pub fn validate(&self) -> Result<()> {
        if !self.update_w.is_finite() || self.update_w <= 0.0 {
            return Err(GgmError::InvalidConfig {
                parameter: "update_w".into(),
                message: format!("must be positive and finite, got {}", self.update_w),
            });
        }

        if !self.update_change.is_finite() {
            return Err(GgmError::InvalidConfig {
                parameter: "update_change".into(),
                message: format!("must be finite, got {}", self.update_change),
            });
        }
        if self.update_change <= 0.0 || self.update_change >= 1.0 {
            log::warn!(
                "update_change = {} lies outside (0, 1); after a failed step the step size {}",
                self.update_change,
                if self.update_change >= 1.0 {
                    "stays the same or grows"
                } else if self.update_change == 0.0 {
                    "becomes zero"
                } else {
                    "changes sign"
                }
            );
        }

        if !self.regularizer.is_finite() || self.regularizer < 0.0 {
            return Err(GgmError::InvalidConfig {
                parameter: "regularizer".into(),
                message: format!("must be non-negative and finite, got {}", self.regularizer),
            });
        }

        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(GgmError::InvalidConfig {
                parameter: "tol".into(),
                message: format!("must be non-negative and finite, got {}", self.tol),
            });
        }

        Ok(())
    }
}

/// Builder for constructing `ProxGradientConfig` with a fluent API.
#[derive(Default)]
pub struct ConfigBuilder {
    config: ProxGradientConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: ProxGradientConfig::default(),
        }
    }

    /// Set the initial step size.
    pub fn update_w(mut self, update_w: f64) -> Self {
        self.config.update_w = update_w;
        self
    }

    /// Set the step-size shrink factor used after a failed step.
    pub fn update_change(mut self, update_change: f64) -> Self {
        self.config.update_change = update_change;
        self
    }

    /// Set the soft-threshold magnitude.
    pub fn regularizer(mut self, regularizer: f64) -> Self {
        self.config.regularizer = regularizer;
        self
    }

    /// Set the maximum number of iterations.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn tol(mut self, tol: f64) -> Self {
        self.config.tol = tol;
        self
    }

    /// Set the norm used by the stopping statistic.
    pub fn norm(mut self, norm: ConvergenceNorm) -> Self {
        self.config.norm = norm;
        self
    }

    /// Enable or disable per-iteration debug logging.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ProxGradientConfig {
        self.config
    }

    /// Build and validate the configuration.
    pub fn build_validated(self) -> Result<ProxGradientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ProxGradientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = ProxGradientConfig::builder()
            .update_w(2.0)
            .update_change(0.25)
            .regularizer(0.1)
            .max_iter(7)
            .tol(1e-3)
            .norm(ConvergenceNorm::Frobenius)
            .build();

        assert_eq!(config.update_w, 2.0);
        assert_eq!(config.update_change, 0.25);
        assert_eq!(config.regularizer, 0.1);
        assert_eq!(config.max_iter, 7);
        assert_eq!(config.tol, 1e-3);
        assert_eq!(config.norm, ConvergenceNorm::Frobenius);
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let err = ProxGradientConfig::builder()
            .update_w(0.0)
            .build_validated()
            .unwrap_err();
        assert!(matches!(
            err,
            GgmError::InvalidConfig { ref parameter, .. } if parameter == "update_w"
        ));
    }

    #[test]
    fn test_rejects_negative_regularizer_and_nan_tol() {
        assert!(ProxGradientConfig::builder()
            .regularizer(-0.1)
            .build_validated()
            .is_err());
        assert!(ProxGradientConfig::builder()
            .tol(f64::NAN)
            .build_validated()
            .is_err());
    }

    #[test]
    fn test_zero_iterations_allowed() {
        assert!(ProxGradientConfig::builder()
            .max_iter(0)
            .build_validated()
            .is_ok());
    }

    #[test]
    fn test_out_of_range_update_change_only_warns() {
        for &change in &[1.0, 1.5, 0.0, -0.5] {
            assert!(ProxGradientConfig::builder()
                .update_change(change)
                .build_validated()
                .is_ok());
        }
        assert!(ProxGradientConfig::builder()
            .update_change(f64::INFINITY)
            .build_validated()
            .is_err());
    }
}

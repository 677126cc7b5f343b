//! Analysis configuration types

use serde::{Deserialize, Serialize};

use super::entity::TestMethod;
use super::validation::{TestValidationError, validate_alpha};

/// Options for one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Hypothesis-testing procedure
    #[serde(default)]
    pub test_method: TestMethod,
    /// Two-sided significance level, strictly between 0 and 1
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_alpha() -> f64 {
    0.05
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            test_method: TestMethod::default(),
            alpha: default_alpha(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fixed-horizon configuration at the given significance level
    pub fn fixed_horizon(alpha: f64) -> Self {
        Self {
            test_method: TestMethod::FixedHorizon,
            alpha,
        }
    }

    /// Set the significance level
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the test method
    pub fn with_test_method(mut self, test_method: TestMethod) -> Self {
        self.test_method = test_method;
        self
    }

    /// Check that the configuration is analyzable
    pub fn validate(&self) -> Result<(), TestValidationError> {
        validate_alpha(self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::new();
        assert_eq!(config.test_method, TestMethod::FixedHorizon);
        assert_eq!(config.alpha, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_horizon_factory() {
        let config = AnalysisConfig::fixed_horizon(0.1);
        assert_eq!(config.test_method, TestMethod::FixedHorizon);
        assert_eq!(config.alpha, 0.1);
    }

    #[test]
    fn test_builder_methods() {
        let config = AnalysisConfig::new()
            .with_alpha(0.01)
            .with_test_method(TestMethod::FixedHorizon);
        assert_eq!(config.alpha, 0.01);
    }

    #[test]
    fn test_validate_rejects_bad_alpha() {
        assert_eq!(
            AnalysisConfig::new().with_alpha(0.0).validate(),
            Err(TestValidationError::InvalidAlpha(0.0))
        );
        assert_eq!(
            AnalysisConfig::new().with_alpha(1.5).validate(),
            Err(TestValidationError::InvalidAlpha(1.5))
        );
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let config: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.test_method, TestMethod::FixedHorizon);
        assert_eq!(config.alpha, 0.05);
    }
}

//! Interpolator builder
//!
//! This module provides a builder pattern for creating interpolators with
//! a validated configuration.

use crate::config::{InterpolationConfig, InterpolationLaw, ResamplePolicy};
use crate::error::{Error, Result};
use crate::interpolator::Interpolator;

/// Builder for interpolator configuration.
#[derive(Debug, Default)]
pub struct InterpolatorBuilder {
    config: InterpolationConfig,
}

impl InterpolatorBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: InterpolationConfig) -> Self {
        self.config = config;
        self
    }

    /// Vertex count equalization used for polygon tracks.
    pub fn policy(mut self, policy: ResamplePolicy) -> Self {
        self.config = self.config.with_policy(policy);
        self
    }

    pub fn law(mut self, law: InterpolationLaw) -> Self {
        self.config = self.config.with_law(law);
        self
    }

    /// Round output coordinates to whole pixels (default: on).
    pub fn round_output(mut self, round: bool) -> Self {
        self.config = self.config.with_round_output(round);
        self
    }

    /// Upper bound on uniform padding.
    pub fn max_padded_vertices(mut self, max: usize) -> Self {
        self.config.max_padded_vertices = max;
        self
    }

    /// Validate the configuration and build the interpolator.
    pub fn build(self) -> Result<Interpolator> {
        self.config.validate().map_err(Error::InvalidInput)?;
        Ok(Interpolator::from_config(self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let interp = InterpolatorBuilder::new().build().unwrap();
        assert_eq!(interp.config(), &InterpolationConfig::default());
    }

    #[test]
    fn test_builder_settings() {
        let interp = InterpolatorBuilder::new()
            .policy(ResamplePolicy::Uniform)
            .round_output(false)
            .max_padded_vertices(64)
            .build()
            .unwrap();

        assert_eq!(interp.config().policy, ResamplePolicy::Uniform);
        assert!(!interp.config().round_output);
        assert_eq!(interp.config().max_padded_vertices, 64);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = InterpolatorBuilder::new().max_padded_vertices(1).build();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}

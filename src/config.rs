//! Interpolation settings
//!
//! This module provides the configuration consumed by the interpolator and
//! re-exports the policy types from the `shapetween-types` crate for
//! convenience.
use serde::de::Error;

pub use shapetween_types::config::{Direction, InterpolationLaw, ResamplePolicy};

/// Interpolator configuration
///
/// # Examples
///
/// ```
/// use shapetween::{InterpolationConfig, ResamplePolicy};
///
/// let json = r#"{ "policy": "uniform" }"#;
/// let config = InterpolationConfig::from_json(json).unwrap();
/// assert_eq!(config.policy, ResamplePolicy::Uniform);
/// assert!(config.round_output);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpolationConfig {
    /// Vertex count equalization for polygon tracks.
    #[serde(default)]
    pub policy: ResamplePolicy,

    #[serde(default)]
    pub law: InterpolationLaw,

    /// Round output coordinates to whole pixels.
    #[serde(default = "InterpolationConfig::default_round_output")]
    pub round_output: bool,

    /// Upper bound on the vertex count uniform padding may produce.
    #[serde(default = "InterpolationConfig::default_max_padded_vertices")]
    pub max_padded_vertices: usize,
}

impl InterpolationConfig {
    const fn default_round_output() -> bool {
        true
    }

    const fn default_max_padded_vertices() -> usize {
        100_000
    }

    pub fn with_policy(mut self, policy: ResamplePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_law(mut self, law: InterpolationLaw) -> Self {
        self.law = law;
        self
    }

    pub fn with_round_output(mut self, round: bool) -> Self {
        self.round_output = round;
        self
    }

    pub fn with_max_padded_vertices(mut self, max: usize) -> Self {
        assert!(max >= 3, "Max padded vertices must be at least 3");
        if max > 1_000_000 {
            log::warn!(
                "Padding limit of {} vertices may allocate very large polygons",
                max
            );
        }
        self.max_padded_vertices = max;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_padded_vertices < 3 {
            return Err("Max padded vertices must be at least 3".to_string());
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: InterpolationConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: InterpolationConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            policy: ResamplePolicy::default(),
            law: InterpolationLaw::default(),
            round_output: Self::default_round_output(),
            max_padded_vertices: Self::default_max_padded_vertices(),
        }
    }
}

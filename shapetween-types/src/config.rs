use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a policy name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError {
    name: String,
}

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resample policy {} does not exist", self.name)
    }
}

impl std::error::Error for ParsePolicyError {}

/// Strategy used to give two polygons the same number of vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResamplePolicy {
    /// Pad both polygons to the LCM of their vertex counts, then rotate for
    /// the best circular match. Synthetic vertices are stripped on output.
    Uniform,
    /// Match vertices by normalized-shape similarity and fill the gaps with
    /// corresponding points. Nothing is stripped on output.
    #[default]
    #[serde(alias = "greedily")]
    Greedy,
}

impl ResamplePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Greedy => "greedy",
        }
    }
}

impl fmt::Display for ResamplePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResamplePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "greedy" | "greedily" => Ok(Self::Greedy),
            other => Err(ParsePolicyError {
                name: other.to_string(),
            }),
        }
    }
}

/// Law applied between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationLaw {
    /// Piecewise-linear, clamped to the end samples outside the sampled range.
    #[default]
    Linear,
}

impl InterpolationLaw {
    /// Blend `a` toward `b` by `t` in `[0, 1]`.
    #[inline]
    pub fn blend(&self, a: f64, b: f64, t: f64) -> f64 {
        match self {
            Self::Linear => a + (b - a) * t,
        }
    }
}

/// Direction in which a tracking request walks from its start frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

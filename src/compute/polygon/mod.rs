//! Polygon alignment engine.
//!
//! Two keyframe polygons can only be interpolated vertex by vertex once they
//! share a winding order and a vertex count, and once each vertex of one is
//! paired with a nearby vertex of the other. The steps are:
//!
//! 1. [`orientation`]: bring every keyframe to the winding of the first one.
//! 2. [`uniform`] or [`greedy`]: equalize vertex counts.
//! 3. [`rotation`]: pick the circular shift with the least total travel
//!    (uniform policy only, greedy anchors its own start vertex).

use super::PointSequence;
use crate::error::Result;
use geo::{Coord, Distance, Euclidean, Point};
use shapetween_types::config::ResamplePolicy;

pub mod greedy;
pub mod orientation;
pub mod rotation;
pub mod uniform;

pub use orientation::{Winding, normalize_winding, winding};
pub use uniform::StripPlan;

/// How the vertices of an aligned pair relate to the original polygons.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexCorrespondence {
    /// Pairs of (smaller polygon index, larger polygon index), in walk order.
    Greedy { pairs: Vec<(usize, usize)> },
    /// Synthetic padding that must be stripped after interpolation.
    Uniform(StripPlan),
}

impl VertexCorrespondence {
    pub fn strip_plan(&self) -> Option<StripPlan> {
        match self {
            Self::Uniform(plan) => Some(*plan),
            Self::Greedy { .. } => None,
        }
    }
}

/// Two point sequences of equal length, ready for coordinate-wise
/// interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub start: PointSequence,
    pub end: PointSequence,
    pub correspondence: VertexCorrespondence,
}

/// Make `start` and `end` interpolation-compatible under `policy`.
///
/// Both inputs must already share the same winding.
pub fn align(
    start: &[Coord<f64>],
    end: &[Coord<f64>],
    policy: ResamplePolicy,
) -> Result<AlignedPair> {
    match policy {
        ResamplePolicy::Uniform => {
            let aligned = uniform::align_uniform(start, end)?;
            Ok(AlignedPair {
                start: aligned.start,
                end: aligned.end,
                correspondence: VertexCorrespondence::Uniform(aligned.plan),
            })
        }
        ResamplePolicy::Greedy => {
            let aligned = greedy::align_greedy(start, end)?;
            Ok(AlignedPair {
                start: aligned.start,
                end: aligned.end,
                correspondence: VertexCorrespondence::Greedy {
                    pairs: aligned.pairs,
                },
            })
        }
    }
}

#[inline]
pub(crate) fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

/// Length of the shortest edge of a closed polygon.
///
/// Returns infinity for sequences with fewer than two vertices.
pub fn min_edge_length(points: &[Coord<f64>]) -> f64 {
    if points.len() < 2 {
        return f64::INFINITY;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| distance(*a, *b))
        .fold(f64::INFINITY, f64::min)
}

/// Points evenly spaced strictly between `from` and `to`.
pub(crate) fn points_between(
    from: Coord<f64>,
    to: Coord<f64>,
    count: usize,
) -> impl Iterator<Item = Coord<f64>> {
    let steps = (count + 1) as f64;
    let dx = (to.x - from.x) / steps;
    let dy = (to.y - from.y) / steps;
    (1..=count).map(move |step| Coord {
        x: from.x + step as f64 * dx,
        y: from.y + step as f64 * dy,
    })
}

//! Uniform vertex count equalization.
//!
//! Both polygons are padded to the least common multiple of their vertex
//! counts by inserting the same number of evenly spaced points on every edge.
//! The padded start polygon is then rotated for the best circular match. After
//! interpolation a [`StripPlan`] removes the synthetic points again.

use super::{PointSequence, distance, min_edge_length, points_between, rotation};
use crate::error::{Error, Result};
use geo::Coord;

/// Parameters for removing synthetic vertices from an interpolated polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripPlan {
    /// Shortest edge of either original polygon.
    pub min_edge: f64,
    /// Points inserted per edge; at most this many consecutive vertices are
    /// dropped before one is kept regardless of distance.
    pub per_side: usize,
}

impl StripPlan {
    /// Drop vertices closer than `min_edge` to the last kept vertex.
    ///
    /// The first vertex is always kept. Every run of `per_side` dropped
    /// candidates is followed by a kept vertex so that no edge collapses
    /// entirely. This is a best-effort heuristic: adversarial shapes can lose a
    /// different vertex set than was inserted.
    pub fn apply(&self, points: &[Coord<f64>]) -> PointSequence {
        let Some(&first) = points.first() else {
            return Vec::new();
        };

        let mut kept = vec![first];
        let mut last = first;
        let mut since_kept = 0usize;

        for &vertex in &points[1..] {
            since_kept += 1;
            if since_kept <= self.per_side && distance(vertex, last) < self.min_edge {
                continue;
            }
            kept.push(vertex);
            last = vertex;
            if since_kept > self.per_side {
                since_kept = 0;
            }
        }
        kept
    }
}

/// Result of uniform padding.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformAlignment {
    /// Padded and rotated start polygon.
    pub start: PointSequence,
    /// Padded end polygon.
    pub end: PointSequence,
    pub per_edge_start: usize,
    pub per_edge_end: usize,
    /// Circular shift applied to the padded start polygon.
    pub rotation: usize,
    pub plan: StripPlan,
}

/// Insert `total_points / len` evenly spaced points on every edge.
///
/// Fails with [`Error::IndivisibleResample`] when `total_points` is not a
/// multiple of the vertex count.
///
/// # Examples
///
/// ```
/// use shapetween::compute::polygon::uniform::densify;
/// use geo::coord;
///
/// let tri = [
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 9.0, y: 0.0 },
///     coord! { x: 0.0, y: 9.0 },
/// ];
/// assert_eq!(densify(&tri, 6).unwrap().len(), 9);
/// assert!(densify(&tri, 4).is_err());
/// ```
pub fn densify(points: &[Coord<f64>], total_points: usize) -> Result<PointSequence> {
    if total_points == 0 || points.is_empty() {
        return Ok(points.to_vec());
    }

    let n = points.len();
    if total_points % n != 0 {
        return Err(Error::IndivisibleResample {
            vertices: n,
            padding: total_points,
        });
    }

    let per_edge = total_points / n;
    let mut padded = Vec::with_capacity(n + total_points);
    for (i, &from) in points.iter().enumerate() {
        let to = points[(i + 1) % n];
        padded.push(from);
        padded.extend(points_between(from, to, per_edge));
    }
    Ok(padded)
}

/// Pad `start` and `end` to a common vertex count and rotate `start` onto `end`.
pub fn align_uniform(start: &[Coord<f64>], end: &[Coord<f64>]) -> Result<UniformAlignment> {
    let (n, m) = (start.len(), end.len());
    if n == 0 || m == 0 {
        return Err(Error::InvalidInput(
            "Can't align an empty polygon".to_string(),
        ));
    }

    let target = lcm(n, m);
    let (pad_start, pad_end) = (target - n, target - m);
    let per_edge_start = pad_start / n;
    let per_edge_end = pad_end / m;

    let plan = StripPlan {
        min_edge: min_edge_length(start).min(min_edge_length(end)),
        per_side: per_edge_start.min(per_edge_end),
    };

    let padded_start = densify(start, pad_start)?;
    let padded_end = densify(end, pad_end)?;

    let rotation = rotation::best_rotation(&padded_start, &padded_end)?;
    log::trace!(
        "uniform padding {}+{} / {}+{} vertices, rotation {}",
        n,
        pad_start,
        m,
        pad_end,
        rotation
    );

    Ok(UniformAlignment {
        start: rotation::rotate(&padded_start, rotation),
        end: padded_end,
        per_edge_start,
        per_edge_end,
        rotation,
        plan,
    })
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub(crate) fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn square() -> Vec<Coord<f64>> {
        vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 12.0, y: 0.0 },
            coord! { x: 12.0, y: 12.0 },
            coord! { x: 0.0, y: 12.0 },
        ]
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(3, 5), 15);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(7, 7), 7);
    }

    #[test]
    fn test_densify_keeps_originals_in_place() {
        let padded = densify(&square(), 8).unwrap();
        assert_eq!(padded.len(), 12);
        for (i, vertex) in square().iter().enumerate() {
            assert_eq!(padded[i * 3], *vertex);
        }
        assert_eq!(padded[1], coord! { x: 4.0, y: 0.0 });
        assert_eq!(padded[11], coord! { x: 0.0, y: 4.0 });
    }

    #[test]
    fn test_densify_rejects_uneven_padding() {
        assert!(matches!(
            densify(&square(), 6),
            Err(Error::IndivisibleResample {
                vertices: 4,
                padding: 6
            })
        ));
    }

    #[test]
    fn test_strip_recovers_densified_polygon() {
        let original = square();
        let padded = densify(&original, 12).unwrap();
        let plan = StripPlan {
            min_edge: min_edge_length(&original),
            per_side: 3,
        };
        assert_eq!(plan.apply(&padded), original);
    }

    #[test]
    fn test_strip_keeps_everything_without_padding() {
        let plan = StripPlan {
            min_edge: 1e9,
            per_side: 0,
        };
        assert_eq!(plan.apply(&square()), square());
    }

    #[test]
    fn test_strip_guard_limits_consecutive_drops() {
        // Every vertex is closer than the threshold, but no more than two in a
        // row may be removed.
        let points: Vec<_> = (0..7).map(|i| coord! { x: i as f64 * 0.1, y: 0.0 }).collect();
        let plan = StripPlan {
            min_edge: 100.0,
            per_side: 2,
        };
        let kept = plan.apply(&points);
        assert_eq!(kept, vec![points[0], points[3], points[6]]);
    }

    #[test]
    fn test_triangle_to_pentagon_padding() {
        let tri = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 30.0, y: 0.0 },
            coord! { x: 15.0, y: 30.0 },
        ];
        let pentagon = vec![
            coord! { x: 15.0, y: 0.0 },
            coord! { x: 25.0, y: 8.0 },
            coord! { x: 21.0, y: 20.0 },
            coord! { x: 9.0, y: 20.0 },
            coord! { x: 5.0, y: 8.0 },
        ];
        let aligned = align_uniform(&tri, &pentagon).unwrap();
        assert_eq!(aligned.start.len(), 15);
        assert_eq!(aligned.end.len(), 15);
        assert_eq!(aligned.per_edge_start, 4);
        assert_eq!(aligned.per_edge_end, 2);
        assert_eq!(aligned.plan.per_side, 2);
        assert_eq!(aligned.end[0], pentagon[0]);
    }
}

//! Winding order of polygon vertex sequences.

use super::PointSequence;
use geo::Coord;
use std::cmp::Ordering;

/// Traversal direction of a polygon's vertices, in image coordinates
/// (rows grow downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Zero cross product at the extreme vertex (repeated or collinear points).
    Degenerate,
}

impl Winding {
    /// `1` for clockwise, `-1` for counter-clockwise, `0` when degenerate.
    pub fn sign(&self) -> i8 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
            Self::Degenerate => 0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

/// Winding of a closed vertex sequence.
///
/// Evaluated at the extreme vertex (smallest row, ties broken by the largest
/// column), which always lies on the convex hull: the sign of
/// `(prev - extreme) x (next - extreme)` taken as (row, col) vectors.
///
/// # Examples
///
/// ```
/// use shapetween::compute::polygon::{winding, Winding};
/// use geo::coord;
///
/// let square = [
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 1.0, y: 0.0 },
///     coord! { x: 1.0, y: 1.0 },
///     coord! { x: 0.0, y: 1.0 },
/// ];
/// assert_eq!(winding(&square), Winding::Clockwise);
/// ```
pub fn winding(points: &[Coord<f64>]) -> Winding {
    let n = points.len();
    if n < 3 {
        return Winding::Degenerate;
    }

    let extreme = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then_with(|| b.x.total_cmp(&a.x)))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let s = points[extreme];
    let prev = points[(extreme + n - 1) % n];
    let next = points[(extreme + 1) % n];

    let (v1_row, v1_col) = (prev.y - s.y, prev.x - s.x);
    let (v2_row, v2_col) = (next.y - s.y, next.x - s.x);
    let cross = v1_row * v2_col - v1_col * v2_row;

    match cross.partial_cmp(&0.0) {
        Some(Ordering::Greater) => Winding::Clockwise,
        Some(Ordering::Less) => Winding::CounterClockwise,
        _ => Winding::Degenerate,
    }
}

/// Return `points` in the winding of `reference`.
///
/// The sequence is reversed only when both windings are known and differ.
pub fn normalize_winding(points: PointSequence, reference: Winding) -> PointSequence {
    let own = winding(&points);
    if own.is_degenerate() || reference.is_degenerate() || own == reference {
        return points;
    }
    let mut points = points;
    points.reverse();
    points
}

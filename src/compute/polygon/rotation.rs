//! Circular alignment of equal-length vertex sequences.

use super::{PointSequence, distance};
use crate::error::{Error, Result};
use geo::Coord;

/// Sum of point-wise distances between `a` shifted left by `shift` and `b`.
pub fn shifted_distance(a: &[Coord<f64>], b: &[Coord<f64>], shift: usize) -> f64 {
    let n = a.len();
    b.iter()
        .enumerate()
        .map(|(i, vb)| distance(a[(i + shift) % n], *vb))
        .sum()
}

/// Circular shift `k` of `a` that minimizes the total distance to `b`.
///
/// Ties keep the smallest shift, so an already aligned pair returns `0`.
pub fn best_rotation(a: &[Coord<f64>], b: &[Coord<f64>]) -> Result<usize> {
    if a.len() != b.len() {
        return Err(Error::MismatchedVertexCount {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for shift in 0..a.len() {
        let d = shifted_distance(a, b, shift);
        if d < best_distance {
            best = shift;
            best_distance = d;
        }
    }
    Ok(best)
}

/// `a` rotated so that `a[shift]` comes first.
pub fn rotate(a: &[Coord<f64>], shift: usize) -> PointSequence {
    let mut rotated = a.to_vec();
    if !rotated.is_empty() {
        rotated.rotate_left(shift % a.len());
    }
    rotated
}

//! Greedy vertex correspondence between polygons of different sizes.
//!
//! Both polygons are moved to their bounding-box center and scaled so that
//! their bounding boxes coincide. Each vertex of the smaller polygon is then
//! matched, in order, to the most similar unused vertex of the larger one
//! (cosine similarity of the normalized position vectors). Matches advance
//! circularly and always leave enough room for the remaining vertices, so
//! the correspondence never crosses itself.
//!
//! Between two matched vertices the larger polygon may have extra vertices;
//! the same number of evenly spaced points is inserted on the corresponding
//! edge of the smaller polygon. Both walks then advance in lockstep and end
//! with the same length. The inserted points are real positions on the
//! smaller outline, so nothing needs to be stripped after interpolation.

use super::{PointSequence, distance, points_between, rotation};
use crate::error::{Error, Result};
use geo::{BoundingRect, Coord, LineString};

/// Result of greedy alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyAlignment {
    pub start: PointSequence,
    pub end: PointSequence,
    /// (smaller polygon index, larger polygon index) in walk order.
    pub pairs: Vec<(usize, usize)>,
}

/// Align `start` and `end` by greedy vertex correspondence.
pub fn align_greedy(start: &[Coord<f64>], end: &[Coord<f64>]) -> Result<GreedyAlignment> {
    if start.is_empty() || end.is_empty() {
        return Err(Error::InvalidInput(
            "Can't align an empty polygon".to_string(),
        ));
    }

    let swapped = start.len() > end.len();
    let (small, large) = if swapped { (end, start) } else { (start, end) };

    let pairs = correspondence(small, large)?;
    let (small_walk, large_walk) = walk(small, large, &pairs)?;

    log::trace!(
        "greedy correspondence {} -> {} vertices, anchor {}",
        small.len(),
        large.len(),
        pairs[0].1
    );

    let (start, end) = if swapped {
        (large_walk, small_walk)
    } else {
        (small_walk, large_walk)
    };
    Ok(GreedyAlignment { start, end, pairs })
}

/// Match every vertex of `small` to a distinct vertex of `large`.
///
/// The returned pairs follow `small` in order and their `large` indices
/// advance circularly. Ties in similarity go to the candidate closer in the
/// normalized frame, then to the first one met in walk order.
pub fn correspondence(small: &[Coord<f64>], large: &[Coord<f64>]) -> Result<Vec<(usize, usize)>> {
    let (n, m) = (small.len(), large.len());
    if n == 0 || n > m {
        return Err(Error::DegenerateAlignment(format!(
            "Can't match {} vertices onto {}",
            n, m
        )));
    }

    let small_norm = normalize(small);
    let large_norm = normalize(large);

    // Scans unwrapped positions of `large`; returns the unwrapped winner.
    let pick = |i: usize, positions: std::ops::RangeInclusive<usize>| {
        let mut best: Option<(usize, f64, f64)> = None;
        for pos in positions {
            let candidate = large_norm[pos % m];
            let similarity = cosine(small_norm[i], candidate);
            let dist = distance(small_norm[i], candidate);
            let better = match best {
                None => true,
                Some((_, best_sim, best_dist)) => {
                    similarity > best_sim || (similarity == best_sim && dist < best_dist)
                }
            };
            if better {
                best = Some((pos, similarity, dist));
            }
        }
        best
    };

    let Some((anchor, anchor_similarity, _)) = pick(0, 0..=m - 1) else {
        return Err(Error::DegenerateAlignment(
            "No candidate for the first vertex".to_string(),
        ));
    };
    if anchor_similarity <= 0.0 {
        log::debug!(
            "greedy anchor has non-positive similarity {:.3}",
            anchor_similarity
        );
    }

    let mut positions = Vec::with_capacity(n);
    positions.push(anchor);
    for i in 1..n {
        let lo = positions[i - 1] + 1;
        let hi = anchor + m - (n - i);
        if lo > hi {
            return Err(Error::DegenerateAlignment(format!(
                "No room left to match vertex {} (window {}..={})",
                i, lo, hi
            )));
        }
        match pick(i, lo..=hi) {
            Some((pos, _, _)) => positions.push(pos),
            None => {
                return Err(Error::DegenerateAlignment(format!(
                    "No candidate for vertex {}",
                    i
                )));
            }
        }
    }

    Ok(positions
        .into_iter()
        .enumerate()
        .map(|(i, pos)| (i, pos % m))
        .collect())
}

/// Walk both polygons from the first matched pair, padding the smaller one.
fn walk(
    small: &[Coord<f64>],
    large: &[Coord<f64>],
    pairs: &[(usize, usize)],
) -> Result<(PointSequence, PointSequence)> {
    let (n, m) = (small.len(), large.len());
    let Some(&(_, anchor)) = pairs.first() else {
        return Err(Error::DegenerateAlignment(
            "Empty correspondence".to_string(),
        ));
    };

    let offsets: Vec<usize> = pairs.iter().map(|&(_, j)| (j + m - anchor) % m).collect();
    let mut small_walk = Vec::with_capacity(m);

    for (k, &(i, _)) in pairs.iter().enumerate() {
        let next_offset = offsets.get(k + 1).copied().unwrap_or(m);
        let steps = next_offset as i64 - offsets[k] as i64;
        if steps <= 0 {
            return Err(Error::DegenerateAlignment(format!(
                "Non-positive step count {} after small vertex {}",
                steps, i
            )));
        }

        let from = small[i];
        let to = small[(i + 1) % n];
        small_walk.push(from);
        small_walk.extend(points_between(from, to, steps as usize - 1));
    }

    let large_walk = rotation::rotate(large, anchor);
    if small_walk.len() != large_walk.len() {
        return Err(Error::MismatchedVertexCount {
            left: small_walk.len(),
            right: large_walk.len(),
        });
    }
    Ok((small_walk, large_walk))
}

/// Center on the bounding box and scale it to `[-1, 1]` on both axes.
fn normalize(points: &[Coord<f64>]) -> PointSequence {
    let Some(rect) = LineString::from(points.to_vec()).bounding_rect() else {
        return points.to_vec();
    };
    let center = rect.center();
    let half_width = if rect.width() > 0.0 { rect.width() / 2.0 } else { 1.0 };
    let half_height = if rect.height() > 0.0 { rect.height() / 2.0 } else { 1.0 };

    points
        .iter()
        .map(|c| Coord {
            x: (c.x - center.x) / half_width,
            y: (c.y - center.y) / half_height,
        })
        .collect()
}

fn cosine(u: Coord<f64>, v: Coord<f64>) -> f64 {
    let nu = u.x.hypot(u.y);
    let nv = v.x.hypot(v.y);
    if nu == 0.0 || nv == 0.0 {
        return 0.0;
    }
    (u.x * v.x + u.y * v.y) / (nu * nv)
}

//! Keyframe interpolation of whole tracks.
//!
//! Points and rectangles are interpolated in a single batched pass over all
//! keyframes. Polygon targets that land on a keyframe return it as given.
//! Every other polygon target is resolved through the keyframe pair around
//! it: the pair is brought to the track's winding, aligned once, and
//! evaluated at just the requested frames.

use crate::builder::InterpolatorBuilder;
use crate::compute::adapter::{self, ReconstructOptions};
use crate::compute::polygon::{self, normalize_winding, uniform, winding};
use crate::compute::{PointSequence, temporal, validation};
use crate::config::{InterpolationConfig, ResamplePolicy};
use crate::error::{Error, Result};
use shapetween_types::geometry::{FrameIndex, Geometry, GeometryKind, Keyframe, ObjectId};

/// Produces per-frame geometries from sparse keyframes.
///
/// Stateless between calls; one instance can serve any number of tracks.
///
/// # Examples
///
/// ```rust
/// use shapetween::{Interpolator, Keyframe};
/// use geo::Point;
///
/// let interp = Interpolator::default();
/// let keys = vec![
///     Keyframe::new(3, Point::new(1.0, 1.0)),
///     Keyframe::new(6, Point::new(7.0, 4.0)),
/// ];
/// let frames = interp.interpolate(&[3, 4, 5, 6], &keys)?;
/// assert_eq!(frames[1].as_point(), Some(&Point::new(3.0, 2.0)));
/// # Ok::<(), shapetween::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    config: InterpolationConfig,
}

impl Interpolator {
    pub fn builder() -> InterpolatorBuilder {
        InterpolatorBuilder::new()
    }

    /// Interpolator with the default configuration and the given policy.
    pub fn with_policy(policy: ResamplePolicy) -> Self {
        Self::from_config(InterpolationConfig::default().with_policy(policy))
    }

    pub(crate) fn from_config(config: InterpolationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpolationConfig {
        &self.config
    }

    /// One geometry per entry of `target_frames`, in the same order.
    ///
    /// Keyframes may be given in any order; they are sorted by frame. Targets
    /// before the first or after the last keyframe get that keyframe's shape.
    pub fn interpolate(
        &self,
        target_frames: &[FrameIndex],
        keyframes: &[Keyframe],
    ) -> Result<Vec<Geometry>> {
        self.interpolate_object(None, target_frames, keyframes)
    }

    /// Same as [`Interpolator::interpolate`], tagging failures with `object_id`.
    pub fn interpolate_object(
        &self,
        object_id: Option<ObjectId>,
        target_frames: &[FrameIndex],
        keyframes: &[Keyframe],
    ) -> Result<Vec<Geometry>> {
        let (first, last) = frame_span(keyframes);
        self.run(target_frames, keyframes)
            .map_err(|e| e.in_segment(object_id, first, last))
    }

    /// Every frame from the first to the last keyframe, with its geometry.
    pub fn interpolate_range(
        &self,
        object_id: Option<ObjectId>,
        keyframes: &[Keyframe],
    ) -> Result<Vec<(FrameIndex, Geometry)>> {
        let (first, last) = frame_span(keyframes);
        let frames: Vec<FrameIndex> = (first..=last).collect();
        let geometries = self.interpolate_object(object_id, &frames, keyframes)?;
        Ok(frames.into_iter().zip(geometries).collect())
    }

    fn run(&self, target_frames: &[FrameIndex], keyframes: &[Keyframe]) -> Result<Vec<Geometry>> {
        let (kind, keys) = validation::prepare_keyframes(keyframes)?;

        match kind {
            GeometryKind::Point | GeometryKind::Rectangle => {
                self.interpolate_batched(kind, target_frames, &keys)
            }
            GeometryKind::Polygon => self.interpolate_polygons(target_frames, &keys),
        }
    }

    fn interpolate_batched(
        &self,
        kind: GeometryKind,
        target_frames: &[FrameIndex],
        keys: &[&Keyframe],
    ) -> Result<Vec<Geometry>> {
        let frames: Vec<FrameIndex> = keys.iter().map(|k| k.frame).collect();
        let snapshots = keys
            .iter()
            .map(|k| adapter::to_points(kind, &k.geometry))
            .collect::<Result<Vec<_>>>()?;

        let points =
            temporal::interpolate_points(target_frames, &frames, &snapshots, self.config.law)?;

        let options = ReconstructOptions {
            strip: None,
            round: self.config.round_output,
        };
        points
            .iter()
            .map(|p| adapter::from_points(kind, p, &options))
            .collect()
    }

    /// Polygon geometry for every target frame.
    ///
    /// Targets on a keyframe (after clamping to the keyframe range) get that
    /// keyframe's geometry unmodified. Only the segments that contain at least
    /// one in-between target are aligned and interpolated.
    fn interpolate_polygons(
        &self,
        target_frames: &[FrameIndex],
        keys: &[&Keyframe],
    ) -> Result<Vec<Geometry>> {
        let first_frame = keys[0].frame;
        let last_frame = keys[keys.len() - 1].frame;

        let mut resolved: Vec<Option<Geometry>> = vec![None; target_frames.len()];
        // (target slot, frame) per segment, indexed by the segment's lower keyframe.
        let mut pending: Vec<Vec<(usize, FrameIndex)>> = vec![Vec::new(); keys.len() - 1];

        for (slot, &frame) in target_frames.iter().enumerate() {
            let frame = frame.clamp(first_frame, last_frame);
            let lower = keys.partition_point(|k| k.frame <= frame) - 1;
            if keys[lower].frame == frame {
                resolved[slot] = Some(keys[lower].geometry.clone());
            } else {
                pending[lower].push((slot, frame));
            }
        }

        if pending.iter().any(|requests| !requests.is_empty()) {
            let first = adapter::to_points(GeometryKind::Polygon, &keys[0].geometry)?;
            let reference = winding(&first);
            let figures = keys
                .iter()
                .map(|k| {
                    adapter::to_points(GeometryKind::Polygon, &k.geometry)
                        .map(|points| normalize_winding(points, reference))
                })
                .collect::<Result<Vec<_>>>()?;

            for (lower, requests) in pending.iter().enumerate() {
                if requests.is_empty() {
                    continue;
                }
                let (start_frame, end_frame) = (keys[lower].frame, keys[lower + 1].frame);
                let frames: Vec<FrameIndex> = requests.iter().map(|&(_, f)| f).collect();
                let geometries = self
                    .interpolate_segment(
                        &figures[lower],
                        &figures[lower + 1],
                        (start_frame, end_frame),
                        &frames,
                    )
                    .map_err(|e| e.in_segment(None, start_frame, end_frame))?;
                for (&(slot, _), geometry) in requests.iter().zip(geometries) {
                    resolved[slot] = Some(geometry);
                }
            }
        }

        resolved
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::InvalidInput("Unresolved target frame".to_string()))
    }

    /// Align one keyframe pair spanning `segment` and reconstruct the
    /// polygons at `frames`, which lie strictly inside it.
    fn interpolate_segment(
        &self,
        start: &PointSequence,
        end: &PointSequence,
        segment: (FrameIndex, FrameIndex),
        frames: &[FrameIndex],
    ) -> Result<Vec<Geometry>> {
        let (start_frame, end_frame) = segment;
        if self.config.policy == ResamplePolicy::Uniform {
            let padded = uniform::lcm(start.len(), end.len());
            if padded > self.config.max_padded_vertices {
                return Err(Error::InvalidInput(format!(
                    "Uniform padding of {} and {} vertices needs {} vertices, limit is {}",
                    start.len(),
                    end.len(),
                    padded,
                    self.config.max_padded_vertices
                )));
            }
        }

        let aligned = polygon::align(start, end, self.config.policy)?;
        log::debug!(
            "frames {}..={}: {} -> {} vertices aligned to {} ({}), {} frames requested",
            start_frame,
            end_frame,
            start.len(),
            end.len(),
            aligned.start.len(),
            self.config.policy,
            frames.len()
        );

        let points = temporal::interpolate_points(
            frames,
            &[start_frame, end_frame],
            &[aligned.start, aligned.end],
            self.config.law,
        )?;

        let options = ReconstructOptions {
            strip: aligned.correspondence.strip_plan(),
            round: self.config.round_output,
        };
        points
            .iter()
            .map(|p| adapter::from_points(GeometryKind::Polygon, p, &options))
            .collect()
    }
}

/// Smallest and largest keyframe frame, `(0, 0)` for an empty slice.
fn frame_span(keyframes: &[Keyframe]) -> (FrameIndex, FrameIndex) {
    let first = keyframes.iter().map(|k| k.frame).min().unwrap_or(0);
    let last = keyframes.iter().map(|k| k.frame).max().unwrap_or(first);
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Point, Polygon, Rect, coord, polygon};

    fn exterior_len(geometry: &Geometry) -> usize {
        // Closed rings repeat their first vertex.
        geometry.as_polygon().unwrap().exterior().0.len() - 1
    }

    fn triangle() -> Polygon {
        polygon![(x: 0.0, y: 0.0), (x: 30.0, y: 0.0), (x: 15.0, y: 30.0)]
    }

    fn pentagon() -> Polygon {
        polygon![
            (x: 15.0, y: 0.0),
            (x: 25.0, y: 8.0),
            (x: 21.0, y: 20.0),
            (x: 9.0, y: 20.0),
            (x: 5.0, y: 8.0),
        ]
    }

    fn square(offset: f64, size: f64) -> Polygon {
        polygon![
            (x: offset, y: 0.0),
            (x: offset + size, y: 0.0),
            (x: offset + size, y: size),
            (x: offset, y: size),
        ]
    }

    #[test]
    fn test_points_linear() {
        let keys = vec![
            Keyframe::new(3, Point::new(1.0, 1.0)),
            Keyframe::new(6, Point::new(7.0, 4.0)),
        ];
        let out = Interpolator::default()
            .interpolate(&[3, 4, 5, 6], &keys)
            .unwrap();

        let expected = [(1.0, 1.0), (3.0, 2.0), (5.0, 3.0), (7.0, 4.0)];
        for (geometry, (x, y)) in out.iter().zip(expected) {
            assert_eq!(geometry.as_point(), Some(&Point::new(x, y)));
        }
    }

    #[test]
    fn test_rectangles_linear() {
        let keys = vec![
            Keyframe::new(
                3,
                Rect::new(coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 20.0 }),
            ),
            Keyframe::new(
                6,
                Rect::new(coord! { x: 10.0, y: 20.0 }, coord! { x: 33.0, y: 35.0 }),
            ),
        ];
        let out = Interpolator::default()
            .interpolate(&[3, 4, 5, 6], &keys)
            .unwrap();

        assert_eq!(out.len(), 4);
        assert_eq!(out[0], keys[0].geometry);
        assert_eq!(out[3], keys[1].geometry);
        assert_eq!(
            out[1].as_rect(),
            Some(&Rect::new(coord! { x: 3.0, y: 13.0 }, coord! { x: 18.0, y: 25.0 }))
        );
        assert_eq!(
            out[2].as_rect(),
            Some(&Rect::new(coord! { x: 7.0, y: 17.0 }, coord! { x: 25.0, y: 30.0 }))
        );
    }

    #[test]
    fn test_single_keyframe_rejected() {
        let keys = vec![Keyframe::new(3, Point::new(1.0, 1.0))];
        let err = Interpolator::default()
            .interpolate_object(Some(11), &[3, 4], &keys)
            .unwrap_err();
        assert!(matches!(
            err.root(),
            Error::InsufficientKeyframes { found: 1 }
        ));
        assert_eq!(err.object_id(), Some(11));
    }

    #[test]
    fn test_extreme_frame_span_rejected() {
        let keys = vec![
            Keyframe::new(-5, Point::new(0.0, 0.0)),
            Keyframe::new(i64::MAX, Point::new(1.0, 1.0)),
        ];
        let err = Interpolator::default().interpolate(&[0], &keys).unwrap_err();
        assert!(matches!(err.root(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_triangle_to_pentagon_uniform() {
        let keys = vec![
            Keyframe::new(0, triangle()),
            Keyframe::new(4, pentagon()),
        ];

        let out = Interpolator::with_policy(ResamplePolicy::Uniform)
            .interpolate(&[0, 1, 2, 3, 4], &keys)
            .unwrap();

        assert_eq!(out.len(), 5);
        assert_eq!(exterior_len(&out[0]), 3);
        assert_eq!(out[0], Geometry::Polygon(triangle()));
        assert_eq!(exterior_len(&out[4]), 5);
        assert_eq!(out[4], Geometry::Polygon(pentagon()));
    }

    #[test]
    fn test_pentagon_to_triangle_ends_on_keyframe() {
        let keys = vec![
            Keyframe::new(0, pentagon()),
            Keyframe::new(4, triangle()),
        ];

        for policy in [ResamplePolicy::Uniform, ResamplePolicy::Greedy] {
            let out = Interpolator::with_policy(policy)
                .interpolate(&[0, 1, 2, 3, 4], &keys)
                .unwrap();

            assert_eq!(out[0], Geometry::Polygon(pentagon()), "{:?}", policy);
            assert_eq!(out[4], Geometry::Polygon(triangle()), "{:?}", policy);
            assert_eq!(exterior_len(&out[4]), 3);
        }
    }

    #[test]
    fn test_every_keyframe_reproduced_along_track() {
        let keys = vec![
            Keyframe::new(0, triangle()),
            Keyframe::new(4, pentagon()),
            Keyframe::new(8, triangle()),
        ];
        let frames: Vec<FrameIndex> = (0..=8).collect();

        let out = Interpolator::with_policy(ResamplePolicy::Uniform)
            .interpolate(&frames, &keys)
            .unwrap();

        let lengths: Vec<_> = out.iter().map(exterior_len).collect();
        assert_eq!(lengths[0], 3);
        assert_eq!(lengths[4], 5);
        assert_eq!(lengths[8], 3);
        assert_eq!(out[4], Geometry::Polygon(pentagon()));
        assert_eq!(out[8], Geometry::Polygon(triangle()));
    }

    #[test]
    fn test_polygon_targets_clamp_and_follow_order() {
        let (a, b) = (square(0.0, 10.0), square(20.0, 10.0));
        let keys = vec![Keyframe::new(10, a.clone()), Keyframe::new(20, b.clone())];

        let out = Interpolator::default()
            .interpolate(&[25, 15, 0], &keys)
            .unwrap();

        assert_eq!(out[0], Geometry::Polygon(b));
        assert_eq!(out[2], Geometry::Polygon(a));
        let mid = out[1].as_polygon().unwrap();
        assert_eq!(mid.exterior().0[0], coord! { x: 10.0, y: 0.0 });
    }

    #[test]
    fn test_sparse_targets_on_long_track() {
        let keys = vec![
            Keyframe::new(0, square(0.0, 10.0)),
            Keyframe::new(1_000_000_000, square(20.0, 10.0)),
        ];

        let out = Interpolator::default()
            .interpolate(&[500_000_000], &keys)
            .unwrap();
        assert_eq!(out, vec![Geometry::Polygon(square(10.0, 10.0))]);
    }

    #[test]
    fn test_reversed_keyframe_does_not_twist() {
        let a = square(0.0, 10.0);
        // Same square shifted right, listed counter-clockwise.
        let b: Polygon = polygon![
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 20.0, y: 10.0),
            (x: 20.0, y: 0.0),
        ];
        let keys = vec![Keyframe::new(0, a), Keyframe::new(2, b)];

        for policy in [ResamplePolicy::Uniform, ResamplePolicy::Greedy] {
            let out = Interpolator::with_policy(policy)
                .interpolate(&[1], &keys)
                .unwrap();
            let mid = out[0].as_polygon().unwrap();
            let expected = square(5.0, 10.0);
            let mut found: Vec<_> = mid.exterior().0[..4].to_vec();
            let mut wanted: Vec<_> = expected.exterior().0[..4].to_vec();
            let key = |c: &geo::Coord<f64>| (c.x as i64, c.y as i64);
            found.sort_by_key(key);
            wanted.sort_by_key(key);
            assert_eq!(found, wanted, "{:?}", policy);
        }
    }

    #[test]
    fn test_segments_chain_without_duplicates() {
        let (start, moved) = (square(0.0, 8.0), square(4.0, 8.0));
        let keys = vec![
            Keyframe::new(0, start.clone()),
            Keyframe::new(4, moved.clone()),
            Keyframe::new(6, start.clone()),
        ];

        let range = Interpolator::default().interpolate_range(None, &keys).unwrap();
        let frames: Vec<_> = range.iter().map(|(f, _)| *f).collect();
        assert_eq!(frames, (0..=6).collect::<Vec<_>>());
        assert_eq!(range[2].1, Geometry::Polygon(square(2.0, 8.0)));
        assert_eq!(range[4].1, Geometry::Polygon(moved));
        assert_eq!(range[6].1, Geometry::Polygon(start));
    }

    #[test]
    fn test_uniform_padding_limit() {
        let keys = vec![
            Keyframe::new(0, triangle()),
            Keyframe::new(5, square(0.0, 30.0)),
        ];

        let interp = Interpolator::builder()
            .policy(ResamplePolicy::Uniform)
            .max_padded_vertices(8)
            .build()
            .unwrap();
        let err = interp.interpolate(&[2], &keys).unwrap_err();
        assert!(matches!(err.root(), Error::InvalidInput(_)));

        // Keyframe targets need no alignment.
        assert!(interp.interpolate(&[0, 5], &keys).is_ok());
    }
}

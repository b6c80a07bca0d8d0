//! Conversion between geometries and ordered point sequences.
//!
//! - Point: a single vertex.
//! - Rectangle: two vertices, top-left then bottom-right.
//! - Polygon: the exterior ring without its closing vertex. Holes are rejected.
//!
//! The reverse direction rounds coordinates to whole pixels and, for polygons
//! padded under the uniform policy, strips synthetic vertices first.

use super::PointSequence;
use super::polygon::uniform::StripPlan;
use crate::error::{Error, Result};
use geo::{Coord, LineString, Point, Polygon, Rect};
use shapetween_types::geometry::{Geometry, GeometryKind};

/// Options for turning an interpolated point sequence back into a geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructOptions {
    /// Synthetic vertices to remove before emitting a polygon.
    pub strip: Option<StripPlan>,
    /// Round coordinates to whole pixels.
    pub round: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            strip: None,
            round: true,
        }
    }
}

/// Extract the point sequence of `geometry`, which must be of `kind`.
pub fn to_points(kind: GeometryKind, geometry: &Geometry) -> Result<PointSequence> {
    match (kind, geometry) {
        (GeometryKind::Point, Geometry::Point(point)) => Ok(vec![point.0]),
        (GeometryKind::Rectangle, Geometry::Rectangle(rect)) => Ok(vec![rect.min(), rect.max()]),
        (GeometryKind::Polygon, Geometry::Polygon(polygon)) => polygon_to_points(polygon),
        (expected, other) => Err(Error::UnsupportedGeometry {
            expected,
            found: other.kind(),
        }),
    }
}

/// Exterior vertices of a polygon, without the closing repeat.
pub fn polygon_to_points(polygon: &Polygon<f64>) -> Result<PointSequence> {
    if !polygon.interiors().is_empty() {
        return Err(Error::UnsupportedTopology {
            holes: polygon.interiors().len(),
        });
    }

    let mut coords = polygon.exterior().0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    Ok(coords)
}

/// Rebuild a geometry of `kind` from its point sequence.
pub fn from_points(
    kind: GeometryKind,
    points: &[Coord<f64>],
    options: &ReconstructOptions,
) -> Result<Geometry> {
    let snap = |c: &Coord<f64>| {
        if options.round {
            Coord {
                x: c.x.round(),
                y: c.y.round(),
            }
        } else {
            *c
        }
    };

    match kind {
        GeometryKind::Point => {
            expect_len(points, 1)?;
            Ok(Geometry::Point(Point::from(snap(&points[0]))))
        }
        GeometryKind::Rectangle => {
            expect_len(points, 2)?;
            // Rect::new re-derives top/left/bottom/right from either diagonal.
            Ok(Geometry::Rectangle(Rect::new(snap(&points[0]), snap(&points[1]))))
        }
        GeometryKind::Polygon => {
            let exterior: Vec<Coord<f64>> = match &options.strip {
                Some(plan) => plan.apply(points).iter().map(snap).collect(),
                None => points.iter().map(snap).collect(),
            };
            Ok(Geometry::Polygon(Polygon::new(
                LineString::from(exterior),
                vec![],
            )))
        }
    }
}

fn expect_len(points: &[Coord<f64>], len: usize) -> Result<()> {
    if points.len() != len {
        return Err(Error::MismatchedVertexCount {
            left: len,
            right: points.len(),
        });
    }
    Ok(())
}

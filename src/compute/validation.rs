//! Validation for keyframes and their geometries.

use crate::error::{Error, Result};
use geo::{Coord, Polygon};
use shapetween_types::geometry::{Geometry, GeometryKind, Keyframe};

/// Validates a coordinate is finite.
///
/// # Examples
///
/// ```
/// use shapetween::compute::validation::validate_coord;
/// use geo::coord;
///
/// assert!(validate_coord(&coord! { x: 3.0, y: 4.0 }).is_ok());
/// assert!(validate_coord(&coord! { x: f64::NAN, y: 4.0 }).is_err());
/// ```
pub fn validate_coord(coord: &Coord<f64>) -> Result<()> {
    if !coord.x.is_finite() {
        return Err(Error::InvalidInput(format!(
            "Column must be finite, got: {}",
            coord.x
        )));
    }

    if !coord.y.is_finite() {
        return Err(Error::InvalidInput(format!(
            "Row must be finite, got: {}",
            coord.y
        )));
    }

    Ok(())
}

/// Validates the exterior ring of a polygon.
///
/// Every coordinate must be finite and the ring must have at least three
/// distinct vertices. Holes are left to the adapter, which rejects them.
///
/// # Examples
///
/// ```
/// use shapetween::compute::validation::validate_polygon;
/// use geo::{polygon, Polygon};
///
/// let poly: Polygon = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 10.0, y: 0.0),
///     (x: 10.0, y: 10.0),
/// ];
/// assert!(validate_polygon(&poly).is_ok());
///
/// let sliver: Polygon = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
/// assert!(validate_polygon(&sliver).is_err());
/// ```
pub fn validate_polygon(polygon: &Polygon<f64>) -> Result<()> {
    for (idx, coord) in polygon.exterior().coords().enumerate() {
        validate_coord(coord).map_err(|e| {
            Error::InvalidInput(format!("Exterior ring point at index {}: {}", idx, e))
        })?;
    }

    let mut distinct: Vec<&Coord<f64>> = Vec::new();
    for coord in polygon.exterior().coords() {
        if !distinct.contains(&coord) {
            distinct.push(coord);
        }
        if distinct.len() >= 3 {
            return Ok(());
        }
    }

    Err(Error::InvalidInput(format!(
        "Polygon needs at least 3 distinct vertices, got {}",
        distinct.len()
    )))
}

/// Validates all coordinates of a geometry.
pub fn validate_geometry(geometry: &Geometry) -> Result<()> {
    match geometry {
        Geometry::Point(point) => validate_coord(&point.0),
        Geometry::Rectangle(rect) => {
            validate_coord(&rect.min())?;
            validate_coord(&rect.max())
        }
        Geometry::Polygon(polygon) => validate_polygon(polygon),
    }
}

/// Checks a track's keyframes and returns them ordered by frame.
///
/// Requires at least two keyframes, one geometry kind across all of them,
/// distinct frames and valid coordinates. Returns the common kind with the
/// sorted keyframes.
pub fn prepare_keyframes(keyframes: &[Keyframe]) -> Result<(GeometryKind, Vec<&Keyframe>)> {
    if keyframes.len() < 2 {
        return Err(Error::InsufficientKeyframes {
            found: keyframes.len(),
        });
    }

    let kind = keyframes[0].kind();
    for key in keyframes {
        if key.kind() != kind {
            return Err(Error::MixedGeometryKinds {
                expected: kind,
                found: key.kind(),
            });
        }
        validate_geometry(&key.geometry).map_err(|e| {
            Error::InvalidInput(format!("Keyframe at frame {}: {}", key.frame, e))
        })?;
    }

    let mut sorted: Vec<&Keyframe> = keyframes.iter().collect();
    sorted.sort_by_key(|key| key.frame);

    if let Some(pair) = sorted.windows(2).find(|w| w[0].frame >= w[1].frame) {
        return Err(Error::UnorderedKeyframes {
            previous: pair[0].frame,
            next: pair[1].frame,
        });
    }

    Ok((kind, sorted))
}

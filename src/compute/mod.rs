//! Compute layer for the interpolation pipeline.
//!
//! This module separates the numeric work from track bookkeeping.
//! It provides:
//! - Geometry adapters between shapes and point sequences
//! - Temporal interpolation of sampled values
//! - Polygon alignment (winding, vertex count equalization, rotation)
//! - Keyframe validation and GeoJSON export
//!
//! Everything here is a pure in-memory transform with no shared state.

use geo::Coord;

pub mod adapter;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod polygon;
pub mod temporal;
pub mod validation;

/// Ordered vertices of one geometry snapshot, `x` = column, `y` = row.
///
/// For polygons the sequence is circular and does not repeat its first
/// vertex at the end.
pub type PointSequence = Vec<Coord<f64>>;

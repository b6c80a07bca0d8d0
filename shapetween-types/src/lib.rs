//! # shapetween-types
//!
//! Plain data types shared between the shapetween interpolation engine and the
//! tracking collaborators that feed it:
//!
//! - **Geometry types**: `Geometry`, `GeometryKind`, `Keyframe`
//! - **Policy types**: `ResamplePolicy`, `InterpolationLaw`, `Direction`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives. Coordinates follow image conventions: `x` is the
//! column and `y` is the row.
//!
//! ## Examples
//!
//! ```rust
//! use shapetween_types::geometry::{Geometry, GeometryKind, Keyframe};
//! use geo::Point;
//!
//! let key = Keyframe::new(3, Geometry::Point(Point::new(1.0, 1.0)));
//! assert_eq!(key.geometry.kind(), GeometryKind::Point);
//! ```

pub mod config;
pub mod geometry;

use geo::{Point, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frame number inside a video.
///
/// Signed so that window arithmetic (`frame - count`) never underflows.
pub type FrameIndex = i64;

/// Identifier of an annotated object, assigned by the annotation store.
pub type ObjectId = u64;

/// Error returned when a geometry name is not one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    name: String,
}

impl ParseKindError {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geometry type {} is not supported", self.name)
    }
}

impl std::error::Error for ParseKindError {}

/// The closed set of shapes that can be tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Point,
    Rectangle,
    Polygon,
}

impl GeometryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(Self::Point),
            "rectangle" => Ok(Self::Rectangle),
            "polygon" => Ok(Self::Polygon),
            other => Err(ParseKindError {
                name: other.to_string(),
            }),
        }
    }
}

/// One annotated shape snapshot.
///
/// Coordinates use image conventions: `x` is the column, `y` the row.
/// A rectangle's `min` corner is its top-left, `max` its bottom-right.
///
/// # Examples
///
/// ```
/// use shapetween_types::geometry::{Geometry, GeometryKind};
/// use geo::{coord, Rect};
///
/// let rect = Geometry::Rectangle(Rect::new(
///     coord! { x: 10.0, y: 0.0 },
///     coord! { x: 20.0, y: 10.0 },
/// ));
/// assert_eq!(rect.kind(), GeometryKind::Rectangle);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "geometry", rename_all = "snake_case")]
pub enum Geometry {
    Point(Point<f64>),
    Rectangle(Rect<f64>),
    Polygon(Polygon<f64>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::Rectangle(_) => GeometryKind::Rectangle,
            Self::Polygon(_) => GeometryKind::Polygon,
        }
    }

    pub fn as_point(&self) -> Option<&Point<f64>> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<&Rect<f64>> {
        match self {
            Self::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon<f64>> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Point<f64>> for Geometry {
    fn from(point: Point<f64>) -> Self {
        Self::Point(point)
    }
}

impl From<Rect<f64>> for Geometry {
    fn from(rect: Rect<f64>) -> Self {
        Self::Rectangle(rect)
    }
}

impl From<Polygon<f64>> for Geometry {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::Polygon(polygon)
    }
}

/// A user-supplied, authoritative geometry at a specific frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: FrameIndex,
    pub geometry: Geometry,
}

impl Keyframe {
    pub fn new(frame: FrameIndex, geometry: impl Into<Geometry>) -> Self {
        Self {
            frame,
            geometry: geometry.into(),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }
}

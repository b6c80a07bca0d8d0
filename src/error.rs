//! Error types for interpolation failures.

use shapetween_types::geometry::{FrameIndex, GeometryKind, ObjectId};
use thiserror::Error;

/// Everything that can abort the interpolation of a track.
///
/// All failures are unrecoverable for the affected track: no partial output
/// is produced. Errors raised inside a segment are wrapped in
/// [`Error::Segment`] so callers can report the object and frame range; use
/// [`Error::root`] to get at the underlying kind.
#[derive(Error, Debug)]
pub enum Error {
    /// The adapter for one geometry kind was handed another kind.
    #[error("Unsupported geometry: expected {expected}, got {found}")]
    UnsupportedGeometry {
        expected: GeometryKind,
        found: GeometryKind,
    },

    /// Geometry names coming from the annotation store that are not handled.
    #[error("Geometry type {0} is not supported")]
    UnknownGeometry(String),

    #[error("Can't interpolate polygons with holes ({holes} interior rings)")]
    UnsupportedTopology { holes: usize },

    #[error("At least 2 keyframes are required for interpolation, got {found}")]
    InsufficientKeyframes { found: usize },

    #[error("Keyframes must have strictly increasing frames: {previous} followed by {next}")]
    UnorderedKeyframes {
        previous: FrameIndex,
        next: FrameIndex,
    },

    #[error("All keyframes of a track must share one geometry kind: {expected} and {found}")]
    MixedGeometryKinds {
        expected: GeometryKind,
        found: GeometryKind,
    },

    /// Uniform padding would need a fractional number of points per edge.
    #[error("Can't add {padding} points evenly to the {vertices} edges of a polygon")]
    IndivisibleResample { vertices: usize, padding: usize },

    /// Internal invariant of the greedy correspondence walk was violated.
    #[error("Degenerate alignment: {0}")]
    DegenerateAlignment(String),

    #[error("Point sequences have different lengths: {left} and {right}")]
    MismatchedVertexCount { left: usize, right: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failure while interpolating a track or one keyframe segment of it.
    #[error(
        "Interpolation failed{} for frames {start_frame}..={end_frame}: {source}",
        object_label(.object_id)
    )]
    Segment {
        object_id: Option<ObjectId>,
        start_frame: FrameIndex,
        end_frame: FrameIndex,
        #[source]
        source: Box<Error>,
    },
}

fn object_label(object_id: &Option<ObjectId>) -> String {
    match object_id {
        Some(id) => format!(" for object #{}", id),
        None => String::new(),
    }
}

impl Error {
    /// Wrap `self` with the frame range (and object, if known) it was raised for.
    ///
    /// An error that already carries an object id keeps it when re-wrapped
    /// with a wider range; the innermost context is never replaced.
    pub fn in_segment(
        self,
        object_id: Option<ObjectId>,
        start_frame: FrameIndex,
        end_frame: FrameIndex,
    ) -> Self {
        match self {
            Self::Segment {
                object_id: None,
                start_frame: inner_start,
                end_frame: inner_end,
                source,
            } if object_id.is_some() => Self::Segment {
                object_id,
                start_frame: inner_start,
                end_frame: inner_end,
                source,
            },
            err @ Self::Segment { .. } => err,
            err => Self::Segment {
                object_id,
                start_frame,
                end_frame,
                source: Box::new(err),
            },
        }
    }

    /// The innermost error, stripped of segment context.
    pub fn root(&self) -> &Error {
        match self {
            Self::Segment { source, .. } => source.root(),
            err => err,
        }
    }

    /// Object the failure belongs to, when known.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            Self::Segment {
                object_id, source, ..
            } => object_id.or_else(|| source.object_id()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

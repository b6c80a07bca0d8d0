//! Keyframe interpolation of point, rectangle and polygon annotations across video frames.
//!
//! ```rust
//! use shapetween::{Interpolator, Keyframe, ResamplePolicy};
//! use geo::polygon;
//!
//! let interp = Interpolator::builder()
//!     .policy(ResamplePolicy::Uniform)
//!     .build()?;
//!
//! let keys = vec![
//!     Keyframe::new(0, polygon![(x: 0.0, y: 0.0), (x: 30.0, y: 0.0), (x: 15.0, y: 30.0)]),
//!     Keyframe::new(4, polygon![
//!         (x: 15.0, y: 0.0), (x: 25.0, y: 8.0), (x: 21.0, y: 20.0),
//!         (x: 9.0, y: 20.0), (x: 5.0, y: 8.0),
//!     ]),
//! ];
//! let frames = interp.interpolate(&[0, 1, 2, 3, 4], &keys)?;
//! assert_eq!(frames.len(), 5);
//! # Ok::<(), shapetween::Error>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod interpolator;
pub mod session;

pub use builder::InterpolatorBuilder;
pub use config::{Direction, InterpolationConfig, InterpolationLaw, ResamplePolicy};
pub use error::{Error, Result};
pub use interpolator::Interpolator;

pub use geo::{Point, Polygon, Rect};

pub use shapetween_types::geometry::{FrameIndex, Geometry, GeometryKind, Keyframe, ObjectId};

pub use compute::polygon::Winding;
pub use compute::temporal::{interpolate_1d, interpolate_points};

pub use session::{
    FigureSink, GeneratedFigure, Progress, ProgressObserver, TrackReport, TrackWindow,
    TrackingSession,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Error, Interpolator, InterpolatorBuilder, Result};

    pub use geo::{Point, Polygon, Rect};

    pub use crate::{Geometry, GeometryKind, Keyframe};

    pub use crate::{Direction, InterpolationConfig, ResamplePolicy};

    pub use crate::{FigureSink, ProgressObserver, TrackWindow, TrackingSession};
}

//! Tracking session bookkeeping.
//!
//! A session covers a window of video frames around the frame the user is
//! looking at. Every tracked object contributes the keyframes that fall
//! inside its own bounds; tracking then interpolates each object and hands
//! the generated in-between figures to a [`FigureSink`], reporting progress
//! to a [`ProgressObserver`] after every object. Where figures come from and
//! where they go is up to the caller.

use crate::config::{Direction, InterpolationConfig};
use crate::error::{Error, Result};
use crate::interpolator::Interpolator;
use shapetween_types::geometry::{FrameIndex, Geometry, GeometryKind, Keyframe, ObjectId};
use std::collections::HashSet;

/// Frame range a session may write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackWindow {
    pub frame_index: FrameIndex,
    pub frames_count: FrameIndex,
    pub direction: Direction,
    pub first_index: FrameIndex,
    pub last_index: FrameIndex,
}

impl TrackWindow {
    /// Window of `frames_count` frames from `frame_index` in `direction`.
    pub fn new(frame_index: FrameIndex, frames_count: FrameIndex, direction: Direction) -> Self {
        let other = match direction {
            Direction::Forward => frame_index.saturating_add(frames_count),
            Direction::Backward => frame_index.saturating_sub(frames_count),
        };
        Self {
            frame_index,
            frames_count,
            direction,
            first_index: other.min(frame_index),
            last_index: other.max(frame_index),
        }
    }

    /// Frame bounds of the keyframes an object contributes to this window.
    ///
    /// Forward tracking starts at the window and runs to the first annotated
    /// frame at or after its end (or the last annotated frame). Backward
    /// tracking ends at the window and starts at the last annotated frame at
    /// or before its start (or the first annotated frame).
    pub fn key_frame_bounds(
        &self,
        object_frames: &[FrameIndex],
    ) -> Result<(FrameIndex, FrameIndex)> {
        if object_frames.is_empty() {
            return Err(Error::InvalidInput(
                "Object has no annotated frames".to_string(),
            ));
        }

        let mut sorted = object_frames.to_vec();
        sorted.sort_unstable();

        let bounds = match self.direction {
            Direction::Forward => {
                let end_idx = sorted
                    .partition_point(|&f| f < self.last_index)
                    .min(sorted.len() - 1);
                (self.first_index, sorted[end_idx])
            }
            Direction::Backward => {
                let start_idx = sorted
                    .partition_point(|&f| f <= self.first_index)
                    .saturating_sub(1);
                (sorted[start_idx], self.last_index)
            }
        };
        Ok(bounds)
    }

    pub fn contains(&self, frame: FrameIndex) -> bool {
        (self.first_index..=self.last_index).contains(&frame)
    }
}

/// One interpolated figure produced by tracking.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeneratedFigure {
    pub object_id: ObjectId,
    pub frame: FrameIndex,
    pub geometry: Geometry,
}

impl GeneratedFigure {
    #[cfg(feature = "geojson")]
    pub fn to_geojson(&self) -> Result<String> {
        crate::compute::geojson::to_geojson(&self.geometry)
    }
}

/// Receives generated figures.
pub trait FigureSink {
    fn create(&mut self, figure: GeneratedFigure) -> Result<()>;
}

impl FigureSink for Vec<GeneratedFigure> {
    fn create(&mut self, figure: GeneratedFigure) -> Result<()> {
        self.push(figure);
        Ok(())
    }
}

/// Position in the tracking task, `current` out of `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Receives progress updates; returning `true` asks tracking to stop.
pub trait ProgressObserver {
    fn notify(&mut self, progress: Progress) -> bool;
}

impl<F> ProgressObserver for F
where
    F: FnMut(Progress) -> bool,
{
    fn notify(&mut self, progress: Progress) -> bool {
        self(progress)
    }
}

/// Outcome of [`TrackingSession::track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackReport {
    pub figures: usize,
    pub objects: usize,
    pub stopped: bool,
}

#[derive(Debug)]
struct ObjectTrack {
    object_id: ObjectId,
    bounds: (FrameIndex, FrameIndex),
    keyframes: Vec<Keyframe>,
}

/// Parses a geometry type name as used by annotation tools.
pub fn parse_kind(name: &str) -> Result<GeometryKind> {
    name.parse::<GeometryKind>()
        .map_err(|e| Error::UnknownGeometry(e.name().to_string()))
}

/// Interpolation of a set of objects over one [`TrackWindow`].
///
/// # Examples
///
/// ```rust
/// use shapetween::session::{GeneratedFigure, Progress, TrackWindow, TrackingSession};
/// use shapetween::{Direction, InterpolationConfig};
/// use geo::Point;
///
/// let window = TrackWindow::new(0, 4, Direction::Forward);
/// let mut session = TrackingSession::new(window, InterpolationConfig::default())?;
/// session.register_object(7, &[0, 4])?;
/// session.add_figure(7, 0, Point::new(0.0, 0.0))?;
/// session.add_figure(7, 4, Point::new(8.0, 4.0))?;
/// session.check()?;
///
/// let mut figures: Vec<GeneratedFigure> = Vec::new();
/// session.track(&mut figures, &mut |_: Progress| false)?;
/// assert_eq!(figures.len(), 3);
/// # Ok::<(), shapetween::Error>(())
/// ```
#[derive(Debug)]
pub struct TrackingSession {
    window: TrackWindow,
    interpolator: Interpolator,
    objects: Vec<ObjectTrack>,
    kind: Option<GeometryKind>,
}

impl TrackingSession {
    pub fn new(window: TrackWindow, config: InterpolationConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidInput)?;
        Ok(Self {
            window,
            interpolator: Interpolator::from_config(config),
            objects: Vec::new(),
            kind: None,
        })
    }

    pub fn window(&self) -> &TrackWindow {
        &self.window
    }

    /// Geometry kind shared by every figure added so far.
    pub fn kind(&self) -> Option<GeometryKind> {
        self.kind
    }

    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().map(|o| o.object_id)
    }

    /// Register an object with all frames it is annotated on.
    ///
    /// Returns the frame bounds its keyframes must fall into.
    pub fn register_object(
        &mut self,
        object_id: ObjectId,
        object_frames: &[FrameIndex],
    ) -> Result<(FrameIndex, FrameIndex)> {
        if self.objects.iter().any(|o| o.object_id == object_id) {
            return Err(Error::InvalidInput(format!(
                "Object {} is already registered",
                object_id
            )));
        }

        let (first, last) = (self.window.first_index, self.window.last_index);
        let bounds = self
            .window
            .key_frame_bounds(object_frames)
            .map_err(|e| e.in_segment(Some(object_id), first, last))?;
        self.objects.push(ObjectTrack {
            object_id,
            bounds,
            keyframes: Vec::new(),
        });
        Ok(bounds)
    }

    /// Register several objects at once; ids must be unique.
    pub fn register_objects<'a, I>(&mut self, objects: I) -> Result<()>
    where
        I: IntoIterator<Item = (ObjectId, &'a [FrameIndex])>,
    {
        let mut seen = HashSet::new();
        for (object_id, frames) in objects {
            if !seen.insert(object_id) {
                return Err(Error::InvalidInput(format!(
                    "Object {} is listed more than once",
                    object_id
                )));
            }
            self.register_object(object_id, frames)?;
        }
        Ok(())
    }

    /// Add a keyframe figure for `object_id`.
    ///
    /// Figures outside the object's bounds are ignored; returns whether the
    /// figure was kept.
    pub fn add_figure(
        &mut self,
        object_id: ObjectId,
        frame: FrameIndex,
        geometry: impl Into<Geometry>,
    ) -> Result<bool> {
        let geometry = geometry.into();
        let Some(object) = self.objects.iter_mut().find(|o| o.object_id == object_id) else {
            return Err(Error::InvalidInput(format!(
                "Object {} is not registered",
                object_id
            )));
        };

        let (left, right) = object.bounds;
        if frame < left || frame > right {
            log::warn!(
                "Skipping figure of object {} on frame {} outside {}..={}",
                object_id,
                frame,
                left,
                right
            );
            return Ok(false);
        }

        let kind = geometry.kind();
        match self.kind {
            None => self.kind = Some(kind),
            Some(expected) if expected != kind => {
                return Err(Error::MixedGeometryKinds {
                    expected,
                    found: kind,
                });
            }
            Some(_) => {}
        }

        object.keyframes.push(Keyframe::new(frame, geometry));
        Ok(true)
    }

    /// Add a figure whose geometry type arrives as a name, e.g. `"polygon"`.
    pub fn add_named_figure(
        &mut self,
        object_id: ObjectId,
        frame: FrameIndex,
        type_name: &str,
        geometry: impl Into<Geometry>,
    ) -> Result<bool> {
        let declared = parse_kind(type_name)?;
        let geometry = geometry.into();
        if geometry.kind() != declared {
            return Err(Error::UnsupportedGeometry {
                expected: declared,
                found: geometry.kind(),
            });
        }
        self.add_figure(object_id, frame, geometry)
    }

    /// Verify every object has enough keyframes to interpolate.
    pub fn check(&self) -> Result<()> {
        for object in &self.objects {
            if object.keyframes.len() < 2 {
                let hint = match self.window.direction {
                    Direction::Forward => "after",
                    Direction::Backward => "before",
                };
                log::warn!(
                    "Object {} has {} keyframe(s) in {}..={}; add a figure {} the window",
                    object.object_id,
                    object.keyframes.len(),
                    object.bounds.0,
                    object.bounds.1,
                    hint
                );
                return Err(Error::InsufficientKeyframes {
                    found: object.keyframes.len(),
                }
                .in_segment(Some(object.object_id), object.bounds.0, object.bounds.1));
            }
        }
        Ok(())
    }

    /// Interpolate every object and emit the figures inside the window.
    ///
    /// Keyframe frames are never emitted. Progress is reported after each
    /// object; tracking stops early when the observer asks to.
    pub fn track<S, P>(&self, sink: &mut S, progress: &mut P) -> Result<TrackReport>
    where
        S: FigureSink + ?Sized,
        P: ProgressObserver + ?Sized,
    {
        self.check()?;

        let total = self.total_steps();
        let mut report = TrackReport::default();

        for (pos, object) in self.objects.iter().enumerate() {
            report.figures += self.track_object(object, sink)?;
            report.objects += 1;

            if progress.notify(Progress {
                current: pos + 1,
                total,
            }) {
                log::debug!("Tracking stopped after object {}", object.object_id);
                report.stopped = true;
                break;
            }
        }

        Ok(report)
    }

    /// Send the final progress notification.
    pub fn finish<P>(&self, progress: &mut P) -> bool
    where
        P: ProgressObserver + ?Sized,
    {
        let total = self.total_steps();
        log::debug!("Tracking finished: {} objects", self.objects.len());
        progress.notify(Progress {
            current: total,
            total,
        })
    }

    fn total_steps(&self) -> usize {
        self.objects.len() + 1
    }

    fn track_object<S>(&self, object: &ObjectTrack, sink: &mut S) -> Result<usize>
    where
        S: FigureSink + ?Sized,
    {
        let key_frames: HashSet<FrameIndex> = object.keyframes.iter().map(|k| k.frame).collect();
        let range = self
            .interpolator
            .interpolate_range(Some(object.object_id), &object.keyframes)?;

        let mut emitted = 0;
        for (frame, geometry) in range {
            if key_frames.contains(&frame) || frame < self.window.first_index {
                continue;
            }
            if frame > self.window.last_index {
                break;
            }
            sink.create(GeneratedFigure {
                object_id: object.object_id,
                frame,
                geometry,
            })?;
            emitted += 1;
        }

        log::debug!(
            "Object {}: {} figures generated in {}..={}",
            object.object_id,
            emitted,
            self.window.first_index,
            self.window.last_index
        );
        Ok(emitted)
    }
}

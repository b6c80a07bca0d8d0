//! Temporal interpolation of sampled values.
//!
//! Keyframes give a value (or a whole point sequence) at a handful of frames;
//! this module fills in every requested frame between them. The work is split
//! into a [`SamplePlan`], computed once per set of frames, and its application
//! to any number of value channels. Because every channel goes through the
//! same plan, the batched form over all vertices of a shape produces exactly
//! the same numbers as evaluating each coordinate on its own.

use super::PointSequence;
use crate::error::{Error, Result};
use geo::Coord;
use shapetween_types::config::InterpolationLaw;
use shapetween_types::geometry::FrameIndex;

/// Where one target frame falls relative to the sample frames.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Sample {
    /// Exactly on (or clamped to) a sample.
    Knot(usize),
    /// Strictly between sample `lower` and `lower + 1`.
    Between { lower: usize, t: f64 },
}

/// Precomputed evaluation positions for a list of target frames.
#[derive(Debug, Clone)]
pub struct SamplePlan {
    samples: Vec<Sample>,
    knots: usize,
    law: InterpolationLaw,
}

impl SamplePlan {
    /// Build a plan for evaluating `target_frames` from values sampled at
    /// `sample_frames`.
    ///
    /// `sample_frames` must hold at least two strictly increasing frames.
    /// Targets outside the sampled range clamp to the nearest end sample.
    pub fn new(
        target_frames: &[FrameIndex],
        sample_frames: &[FrameIndex],
        law: InterpolationLaw,
    ) -> Result<Self> {
        check_sample_frames(sample_frames)?;

        let last = sample_frames.len() - 1;
        let samples = target_frames
            .iter()
            .map(|&frame| -> Result<Sample> {
                let idx = sample_frames.partition_point(|&k| k <= frame);
                if idx == 0 {
                    return Ok(Sample::Knot(0));
                }
                if idx > last {
                    return Ok(Sample::Knot(last));
                }

                let lower = idx - 1;
                let (lo, hi) = (sample_frames[lower], sample_frames[idx]);
                if frame == lo {
                    Ok(Sample::Knot(lower))
                } else {
                    let t = frame_span(lo, frame)? / frame_span(lo, hi)?;
                    Ok(Sample::Between { lower, t })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            samples,
            knots: sample_frames.len(),
            law,
        })
    }

    /// Number of target frames.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Evaluate one scalar channel sampled at the plan's sample frames.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>> {
        self.check_knots(values.len())?;

        Ok(self
            .samples
            .iter()
            .map(|sample| match *sample {
                Sample::Knot(k) => values[k],
                Sample::Between { lower, t } => self.law.blend(values[lower], values[lower + 1], t),
            })
            .collect())
    }

    /// Evaluate every vertex of a sequence of snapshots at once.
    ///
    /// `snapshots[k]` is the point sequence at sample `k`; all snapshots must
    /// have the same number of vertices. Returns one sequence per target.
    pub fn apply_points(&self, snapshots: &[PointSequence]) -> Result<Vec<PointSequence>> {
        self.check_knots(snapshots.len())?;

        let width = snapshots[0].len();
        if let Some(odd) = snapshots.iter().find(|s| s.len() != width) {
            return Err(Error::MismatchedVertexCount {
                left: width,
                right: odd.len(),
            });
        }

        Ok(self
            .samples
            .iter()
            .map(|sample| match *sample {
                Sample::Knot(k) => snapshots[k].clone(),
                Sample::Between { lower, t } => snapshots[lower]
                    .iter()
                    .zip(&snapshots[lower + 1])
                    .map(|(a, b)| Coord {
                        x: self.law.blend(a.x, b.x, t),
                        y: self.law.blend(a.y, b.y, t),
                    })
                    .collect(),
            })
            .collect())
    }

    fn check_knots(&self, found: usize) -> Result<()> {
        if found != self.knots {
            return Err(Error::MismatchedVertexCount {
                left: self.knots,
                right: found,
            });
        }
        Ok(())
    }
}

fn check_sample_frames(sample_frames: &[FrameIndex]) -> Result<()> {
    if sample_frames.len() < 2 {
        return Err(Error::InsufficientKeyframes {
            found: sample_frames.len(),
        });
    }
    if let Some(pair) = sample_frames.windows(2).find(|w| w[0] >= w[1]) {
        return Err(Error::UnorderedKeyframes {
            previous: pair[0],
            next: pair[1],
        });
    }
    Ok(())
}

/// Number of frames from `from` to `to`.
fn frame_span(from: FrameIndex, to: FrameIndex) -> Result<f64> {
    to.checked_sub(from)
        .map(|span| span as f64)
        .ok_or_else(|| Error::InvalidInput(format!("Frame span {}..{} is out of range", from, to)))
}

/// Piecewise-linear interpolation of one scalar channel.
///
/// Returns one value per entry of `target_frames`. The result passes exactly
/// through every sample and clamps outside `[sample_frames[0], sample_frames[last]]`.
///
/// # Examples
///
/// ```
/// use shapetween::compute::temporal::interpolate_1d;
///
/// let values = interpolate_1d(&[0, 3, 4, 5, 6, 9], &[3, 6], &[1.0, 4.0]).unwrap();
/// assert_eq!(values, vec![1.0, 1.0, 2.0, 3.0, 4.0, 4.0]);
/// ```
pub fn interpolate_1d(
    target_frames: &[FrameIndex],
    sample_frames: &[FrameIndex],
    sample_values: &[f64],
) -> Result<Vec<f64>> {
    SamplePlan::new(target_frames, sample_frames, InterpolationLaw::Linear)?.apply(sample_values)
}

/// Interpolate whole point sequences, coordinate-wise, for every target frame.
pub fn interpolate_points(
    target_frames: &[FrameIndex],
    sample_frames: &[FrameIndex],
    snapshots: &[PointSequence],
    law: InterpolationLaw,
) -> Result<Vec<PointSequence>> {
    SamplePlan::new(target_frames, sample_frames, law)?.apply_points(snapshots)
}

//! Per-frame world-space joint positions.

use crate::error::RigError;

const AXES: usize = 3;

/// Read-only `(frame, joint, axis)` array of joint positions.
///
/// Stored flat and row-major so a whole frame is one contiguous slice.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionSequence {
    frames: usize,
    joints: usize,
    data: Vec<f32>,
}

impl MotionSequence {
    /// Wrap a flat `frames * joints * 3` buffer.
    pub fn from_flat(frames: usize, joints: usize, data: Vec<f32>) -> Result<Self, RigError> {
        let expected = frames
            .checked_mul(joints)
            .and_then(|n| n.checked_mul(AXES))
            .ok_or_else(|| RigError::shape("motion buffer length", usize::MAX, data.len()))?;
        if data.len() != expected {
            return Err(RigError::shape("motion buffer length", expected, data.len()));
        }
        let motion = Self {
            frames,
            joints,
            data,
        };
        motion.check_finite()?;
        Ok(motion)
    }

    /// Build from nested `[frame][joint]` positions. Every frame must have
    /// the same joint count.
    pub fn from_frames(frames: Vec<Vec<[f32; 3]>>) -> Result<Self, RigError> {
        let joints = frames.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(frames.len() * joints * AXES);
        for frame in &frames {
            if frame.len() != joints {
                return Err(RigError::shape("joints per frame", joints, frame.len()));
            }
            data.extend(frame.iter().flatten());
        }
        Self::from_flat(frames.len(), joints, data)
    }

    /// Build from the `[joint][axis][frame]` layout motion models write,
    /// transposing to `(frame, joint, axis)`.
    pub fn from_joint_axis_frame(joints: &[Vec<Vec<f32>>]) -> Result<Self, RigError> {
        let frames = joints
            .first()
            .and_then(|axes| axes.first())
            .map_or(0, Vec::len);
        for axes in joints {
            if axes.len() != AXES {
                return Err(RigError::shape("axes per joint", AXES, axes.len()));
            }
            for series in axes {
                if series.len() != frames {
                    return Err(RigError::shape("frames per axis", frames, series.len()));
                }
            }
        }
        let mut data = Vec::with_capacity(frames * joints.len() * AXES);
        for f in 0..frames {
            for axes in joints {
                data.extend(axes.iter().map(|series| series[f]));
            }
        }
        Self::from_flat(frames, joints.len(), data)
    }

    fn check_finite(&self) -> Result<(), RigError> {
        match self.data.iter().position(|v| !v.is_finite()) {
            Some(i) => {
                let per_frame = (self.joints * AXES).max(1);
                Err(RigError::NonFiniteValue {
                    frame: i / per_frame,
                    joint: (i % per_frame) / AXES,
                })
            }
            None => Ok(()),
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    #[inline]
    pub fn joint_count(&self) -> usize {
        self.joints
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Position of `joint` at `frame`, or `None` when out of range.
    pub fn position(&self, frame: usize, joint: usize) -> Option<[f32; 3]> {
        if frame >= self.frames || joint >= self.joints {
            return None;
        }
        let o = (frame * self.joints + joint) * AXES;
        Some([self.data[o], self.data[o + 1], self.data[o + 2]])
    }

    /// All joint positions of one frame.
    pub fn frame(&self, frame: usize) -> Option<Vec<[f32; 3]>> {
        if frame >= self.frames {
            return None;
        }
        Some(self.frame_positions(frame).collect())
    }

    /// Joint positions of `frame` in joint order. `frame` must be below
    /// [`Self::frame_count`].
    pub(crate) fn frame_positions(&self, frame: usize) -> impl Iterator<Item = [f32; 3]> + '_ {
        let stride = self.joints * AXES;
        self.data[frame * stride..(frame + 1) * stride]
            .chunks_exact(AXES)
            .map(|c| [c[0], c[1], c[2]])
    }
}

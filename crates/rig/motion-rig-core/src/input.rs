//! JSON motion documents.
//!
//! Two layouts are accepted:
//! - model results: `{ "motion": [rep][joint][axis][frame], ... }`, the
//!   dump a text-to-motion sampler writes (extra keys such as `text` or
//!   `lengths` are ignored);
//! - plain frames: `{ "frames": [frame][joint][x, y, z] }`.

use serde::Deserialize;

use crate::error::RigError;
use crate::motion::MotionSequence;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MotionDocument {
    Results {
        motion: Vec<Vec<Vec<Vec<f32>>>>,
    },
    Frames {
        frames: Vec<Vec<[f32; 3]>>,
    },
}

/// Decode a motion document. `repetition` selects one sample from a results
/// dump and is ignored for plain frame documents.
pub fn parse_motion_json(s: &str, repetition: usize) -> Result<MotionSequence, RigError> {
    let doc: MotionDocument = serde_json::from_str(s).map_err(|e| RigError::InvalidInput {
        reason: format!("parse error: {e}"),
    })?;
    match doc {
        MotionDocument::Results { motion } => {
            let count = motion.len();
            let rep = motion.get(repetition).ok_or_else(|| RigError::InvalidInput {
                reason: format!("repetition {repetition} out of range ({count} available)"),
            })?;
            MotionSequence::from_joint_axis_frame(rep)
        }
        MotionDocument::Frames { frames } => MotionSequence::from_frames(frames),
    }
}

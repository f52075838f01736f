//! Error types for rig construction and keyframe sampling.

use thiserror::Error;

use crate::ids::JointIndex;

/// Structural failures raised while turning a motion into a rig.
///
/// Every variant aborts the conversion; no partially built [`crate::Rig`]
/// is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RigError {
    /// A joint references a parent bone that has not been built yet, either
    /// because the topology lists a child before its parent or because the
    /// parent index does not exist.
    #[error("joint {joint} references parent {parent} which has not been built")]
    MissingParent { joint: JointIndex, parent: i64 },

    /// Joint or frame dimensions disagree between topology and motion data,
    /// or within the motion array itself.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The parent table itself is malformed (no root, several roots, bad sentinel).
    #[error("invalid topology: {reason}")]
    InvalidTopology { reason: String },

    /// There is no frame 0 to take the rest pose from.
    #[error("motion has no frames; a rest pose cannot be built")]
    EmptyMotion,

    #[error("non-finite position at frame {frame}, joint {joint}")]
    NonFiniteValue { frame: usize, joint: usize },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// The motion document could not be decoded.
    #[error("invalid motion input: {reason}")]
    InvalidInput { reason: String },
}

impl RigError {
    pub(crate) fn shape(context: &'static str, expected: usize, actual: usize) -> Self {
        RigError::ShapeMismatch {
            context,
            expected,
            actual,
        }
    }
}

/// Failure of a full build → sample → export run.
///
/// Adapter errors are carried unchanged so callers can decide on fallback
/// handling (for example keeping the raw motion around).
#[derive(Debug, Error)]
pub enum PipelineError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Rig(#[from] RigError),
    #[error("export failed: {0}")]
    Export(#[source] E),
}

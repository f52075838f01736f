//! motion-rig-core: joint-position motion to keyframed bone hierarchy.
//!
//! Data flows one way:
//! raw positions → [`build`] (bone structure from frame 0) → [`sample`]
//! (one translation keyframe per frame per bone) → an [`ExportAdapter`].
//!
//! Animation is expressed as per-frame bone translations only; joint
//! rotations are never solved for.

pub mod builder;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod ids;
pub mod input;
pub mod motion;
pub mod rig;
pub mod sampler;
pub mod topology;

pub use builder::build;
pub use config::{ExportOptions, RigConfig};
pub use convert::{convert, convert_and_export};
pub use error::{PipelineError, RigError};
pub use export::{
    ExportAdapter, ExportError, JsonFileExporter, SceneDocument, StoredAnimationExporter,
};
pub use ids::{BoneId, JointIndex};
pub use input::parse_motion_json;
pub use motion::MotionSequence;
pub use rig::{Bone, Keyframe, Rig};
pub use sampler::sample;
pub use topology::{JointTopology, SkeletonPreset};

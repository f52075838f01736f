//! Build → sample → export pipeline.

use crate::builder::build;
use crate::config::RigConfig;
use crate::error::{PipelineError, RigError};
use crate::export::ExportAdapter;
use crate::motion::MotionSequence;
use crate::rig::Rig;
use crate::sampler::sample;
use crate::topology::JointTopology;

/// Turn a motion into a fully keyframed rig.
///
/// Shapes are checked before any bone is built. The rest pose is frame 0,
/// so an empty motion fails with [`RigError::EmptyMotion`].
pub fn convert(
    topology: &JointTopology,
    motion: &MotionSequence,
    cfg: &RigConfig,
) -> Result<Rig, RigError> {
    cfg.validate()?;
    if motion.joint_count() != topology.joint_count() {
        return Err(RigError::shape(
            "motion joints vs topology",
            topology.joint_count(),
            motion.joint_count(),
        ));
    }
    let rest = motion.frame(0).ok_or(RigError::EmptyMotion)?;
    let mut rig = build(topology, &rest, cfg)?;
    sample(&mut rig, motion)?;
    log::info!(
        "converted {} frames x {} joints into rig '{}'",
        motion.frame_count(),
        motion.joint_count(),
        rig.name()
    );
    Ok(rig)
}

/// Convert and hand the finished rig to `adapter`.
///
/// The adapter only ever sees a complete rig. Its errors come back unchanged
/// in [`PipelineError::Export`].
pub fn convert_and_export<A>(
    topology: &JointTopology,
    motion: &MotionSequence,
    cfg: &RigConfig,
    adapter: &mut A,
) -> Result<A::Output, PipelineError<A::Error>>
where
    A: ExportAdapter,
{
    let rig = convert(topology, motion, cfg)?;
    adapter.export(&rig).map_err(PipelineError::Export)
}

//! Per-frame keyframing of bone translations.
//!
//! Each input frame becomes one keyframe per bone holding the joint's
//! world-space position, applied as a direct translation override. Joint
//! orientation is not solved for: motion is expressed purely through bone
//! translation, and exporters are expected to write translation channels.
//! Switching to rotation keys would change the output contract.

use crate::error::RigError;
use crate::ids::BoneId;
use crate::motion::MotionSequence;
use crate::rig::{Keyframe, Rig};

/// Exported frame number of input frame `f`.
#[inline]
pub fn exported_frame(f: usize) -> u32 {
    f as u32 + 1
}

/// Attach one keyframe per `(frame, bone)` to `rig`.
///
/// The joint count is checked before anything is written, so a mismatch
/// leaves the rig untouched. Existing streams are replaced, never appended
/// to. An empty motion is valid and leaves every stream empty.
pub fn sample(rig: &mut Rig, motion: &MotionSequence) -> Result<(), RigError> {
    if motion.joint_count() != rig.bone_count() {
        return Err(RigError::shape(
            "motion joints vs rig bones",
            rig.bone_count(),
            motion.joint_count(),
        ));
    }

    let frames = motion.frame_count();
    if frames == 1 {
        log::warn!("rig '{}': motion has a single frame", rig.name());
    }

    let tracks = rig.tracks_mut();
    for track in tracks.iter_mut() {
        track.clear();
        track.reserve_exact(frames);
    }
    for f in 0..frames {
        let frame = exported_frame(f);
        let positions = motion.frame_positions(f);
        for (i, (track, position)) in tracks.iter_mut().zip(positions).enumerate() {
            track.push(Keyframe {
                frame,
                bone: BoneId(i as u32),
                position,
            });
        }
    }

    log::debug!(
        "sampled {} frames onto {} bones of '{}'",
        frames,
        rig.bone_count(),
        rig.name()
    );
    Ok(())
}

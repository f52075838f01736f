//! Rest-pose rig construction from a topology and one frame of joint positions.

use crate::config::RigConfig;
use crate::error::RigError;
use crate::ids::{BoneId, JointIndex};
use crate::rig::{Bone, Rig};
use crate::topology::JointTopology;

/// Build one bone per joint, with heads at `rest_frame` and parents from `topology`.
///
/// Joints are visited in index order, so each parent must come before its
/// children. A reference to a joint not yet built (or not existing at all)
/// fails with [`RigError::MissingParent`]; the half-built rig is dropped.
pub fn build(
    topology: &JointTopology,
    rest_frame: &[[f32; 3]],
    cfg: &RigConfig,
) -> Result<Rig, RigError> {
    if rest_frame.len() != topology.joint_count() {
        return Err(RigError::shape(
            "rest frame joints",
            topology.joint_count(),
            rest_frame.len(),
        ));
    }
    cfg.validate()?;

    let mut bones: Vec<Bone> = Vec::with_capacity(rest_frame.len());
    for (i, head) in rest_frame.iter().enumerate() {
        let joint = JointIndex(i as u32);
        let parent = match topology.raw_parent(joint) {
            None => None,
            Some(p) if p >= 0 && (p as usize) < bones.len() => Some(BoneId(p as u32)),
            Some(p) => return Err(RigError::MissingParent { joint, parent: p }),
        };
        bones.push(Bone {
            id: BoneId::from(joint),
            name: cfg.bone_name(i),
            head: *head,
            tail: add(*head, cfg.tail_offset),
            parent,
        });
    }

    log::debug!(
        "built rig '{}' with {} bones (root {})",
        cfg.armature_name,
        bones.len(),
        topology.root()
    );
    Ok(Rig::from_bones(cfg.armature_name.clone(), bones))
}

#[inline]
fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::SkeletonPreset;

    fn three_joints() -> Vec<[f32; 3]> {
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
    }

    #[test]
    fn heads_tails_and_parents_follow_topology() {
        let topo = JointTopology::from_parent_indices(&[-1, 0, 0]).unwrap();
        let rig = build(&topo, &three_joints(), &RigConfig::default()).unwrap();

        assert_eq!(rig.bone_count(), 3);
        let names: Vec<_> = rig.bones().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["joint_0", "joint_1", "joint_2"]);
        assert_eq!(rig.bones()[0].parent, None);
        assert_eq!(rig.bones()[1].parent, Some(BoneId(0)));
        assert_eq!(rig.bones()[2].parent, Some(BoneId(0)));
        assert_eq!(rig.bones()[1].head, [1.0, 0.0, 0.0]);
        assert_eq!(rig.bones()[1].tail, [1.0, 0.0, 0.1]);
        assert_eq!(rig.keyframe_count(), 0);
    }

    #[test]
    fn root_listed_after_its_children_is_missing_parent() {
        let topo = JointTopology::from_parent_indices(&[1, -1, 1]).unwrap();
        assert_eq!(topo.root(), JointIndex(1));
        let err = build(&topo, &three_joints(), &RigConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RigError::MissingParent {
                joint: JointIndex(0),
                parent: 1
            }
        );
    }

    #[test]
    fn chain_parents_resolve() {
        let topo = JointTopology::from_parent_indices(&[-1, 0, 1]).unwrap();
        let rig = build(&topo, &three_joints(), &RigConfig::default()).unwrap();
        assert_eq!(rig.bones()[2].parent, Some(BoneId(1)));
    }

    #[test]
    fn child_before_parent_is_missing_parent() {
        let topo = JointTopology::from_parent_indices(&[-1, 2, 0]).unwrap();
        let err = build(&topo, &three_joints(), &RigConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RigError::MissingParent {
                joint: JointIndex(1),
                parent: 2
            }
        );
    }

    #[test]
    fn undefined_parent_index_is_missing_parent() {
        let topo = JointTopology::from_parent_indices(&[-1, 0, 42]).unwrap();
        assert!(matches!(
            build(&topo, &three_joints(), &RigConfig::default()),
            Err(RigError::MissingParent { parent: 42, .. })
        ));
    }

    #[test]
    fn self_parent_is_missing_parent() {
        let topo = JointTopology::from_parent_indices(&[-1, 1, 0]).unwrap();
        assert!(matches!(
            build(&topo, &three_joints(), &RigConfig::default()),
            Err(RigError::MissingParent { parent: 1, .. })
        ));
    }

    #[test]
    fn rest_frame_must_cover_every_joint() {
        let topo = SkeletonPreset::Smpl24.topology();
        let err = build(&topo, &[[0.0; 3]; 22], &RigConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RigError::ShapeMismatch {
                context: "rest frame joints",
                expected: 24,
                actual: 22
            }
        );
    }

    #[test]
    fn custom_naming_and_offset() {
        let topo = JointTopology::from_parent_indices(&[-1, 0]).unwrap();
        let cfg = RigConfig {
            tail_offset: [0.0, 0.5, 0.0],
            bone_name_prefix: "b".into(),
            armature_name: "Body".into(),
        };
        let rig = build(&topo, &[[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]], &cfg).unwrap();
        assert_eq!(rig.name(), "Body");
        assert_eq!(rig.bone_by_name("b1").map(|b| b.tail), Some([2.0, 2.5, 2.0]));
    }
}

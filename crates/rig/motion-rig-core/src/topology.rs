//! Joint topologies: parent-index tables shared by every motion of a skeleton family.

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::ids::JointIndex;

/// Parent sentinel used in raw parent-index tables.
pub const ROOT_SENTINEL: i32 = -1;

const SMPL_24_PARENTS: [i32; 24] = [
    -1, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 12, 13, 14, 16, 17, 18, 19, 20, 21,
];

const SMPL_24_NAMES: [&str; 24] = [
    "pelvis",
    "left_hip",
    "right_hip",
    "spine1",
    "left_knee",
    "right_knee",
    "spine2",
    "left_ankle",
    "right_ankle",
    "spine3",
    "left_foot",
    "right_foot",
    "neck",
    "left_collar",
    "right_collar",
    "head",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hand",
    "right_hand",
];

/// Fixed, ordered joint set with one parent per joint.
///
/// Construction only checks the root invariant. Whether every parent is
/// defined before its children is checked by [`crate::build`], which
/// reports [`RigError::MissingParent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct JointTopology {
    /// Raw parent index per joint; `None` marks the root.
    parents: Vec<Option<i64>>,
    root: JointIndex,
}

impl JointTopology {
    /// Build a topology from a parent table where `-1` marks the root.
    pub fn from_parent_indices(parents: &[i32]) -> Result<Self, RigError> {
        if parents.is_empty() {
            return Err(RigError::InvalidTopology {
                reason: "topology has no joints".into(),
            });
        }
        let mut table = Vec::with_capacity(parents.len());
        let mut roots = Vec::new();
        for (i, &p) in parents.iter().enumerate() {
            if p == ROOT_SENTINEL {
                roots.push(i);
                table.push(None);
            } else if p < 0 {
                return Err(RigError::InvalidTopology {
                    reason: format!("joint {i} has parent {p}; only {ROOT_SENTINEL} marks the root"),
                });
            } else {
                table.push(Some(p as i64));
            }
        }
        match roots.as_slice() {
            [root] => Ok(Self {
                parents: table,
                root: JointIndex(*root as u32),
            }),
            [] => Err(RigError::InvalidTopology {
                reason: "topology has no root joint".into(),
            }),
            many => Err(RigError::InvalidTopology {
                reason: format!("topology has {} root joints {:?}", many.len(), many),
            }),
        }
    }

    #[inline]
    pub fn joint_count(&self) -> usize {
        self.parents.len()
    }

    #[inline]
    pub fn root(&self) -> JointIndex {
        self.root
    }

    /// Raw parent reference of joint `i`. The value is not guaranteed to be
    /// a valid index; see [`crate::build`].
    #[inline]
    pub fn raw_parent(&self, joint: JointIndex) -> Option<i64> {
        self.parents.get(joint.index()).copied().flatten()
    }

    /// Parent of `joint`; `Ok(None)` only for the root.
    ///
    /// A parent index outside the joint set is reported as
    /// [`RigError::MissingParent`] rather than being mistaken for a root.
    pub fn parent(&self, joint: JointIndex) -> Result<Option<JointIndex>, RigError> {
        match self.raw_parent(joint) {
            None => Ok(None),
            Some(p) if (p as usize) < self.parents.len() => Ok(Some(JointIndex(p as u32))),
            Some(p) => Err(RigError::MissingParent { joint, parent: p }),
        }
    }

    pub fn children(&self, joint: JointIndex) -> Vec<JointIndex> {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == Some(joint.0 as i64))
            .map(|(i, _)| JointIndex(i as u32))
            .collect()
    }

    pub fn is_leaf(&self, joint: JointIndex) -> bool {
        !self.parents.contains(&Some(joint.0 as i64))
    }

    pub fn joints(&self) -> impl Iterator<Item = JointIndex> + '_ {
        (0..self.parents.len() as u32).map(JointIndex)
    }

    /// Parent table in the raw `-1`-rooted form.
    pub fn parent_indices(&self) -> Vec<i32> {
        self.parents
            .iter()
            .map(|p| p.map_or(ROOT_SENTINEL, |v| v as i32))
            .collect()
    }
}

impl TryFrom<Vec<i32>> for JointTopology {
    type Error = RigError;

    fn try_from(parents: Vec<i32>) -> Result<Self, Self::Error> {
        Self::from_parent_indices(&parents)
    }
}

impl From<JointTopology> for Vec<i32> {
    fn from(t: JointTopology) -> Self {
        t.parent_indices()
    }
}

/// Predefined skeleton families produced by text-to-motion models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonPreset {
    /// Full 24-joint SMPL body.
    Smpl24,
    /// 22-joint HumanML3D body: SMPL without the two hand joints.
    HumanMl22,
}

impl SkeletonPreset {
    pub const ALL: [SkeletonPreset; 2] = [SkeletonPreset::Smpl24, SkeletonPreset::HumanMl22];

    pub fn parent_indices(&self) -> &'static [i32] {
        match self {
            SkeletonPreset::Smpl24 => &SMPL_24_PARENTS,
            SkeletonPreset::HumanMl22 => &SMPL_24_PARENTS[..22],
        }
    }

    /// Descriptive joint names. Informational only; bones are still named
    /// from their index so downstream retargeting keys stay stable.
    pub fn joint_names(&self) -> &'static [&'static str] {
        &SMPL_24_NAMES[..self.joint_count()]
    }

    pub fn joint_count(&self) -> usize {
        self.parent_indices().len()
    }

    pub fn topology(&self) -> JointTopology {
        let parents = self.parent_indices();
        let root = parents
            .iter()
            .position(|&p| p == ROOT_SENTINEL)
            .unwrap_or_default();
        JointTopology {
            parents: parents
                .iter()
                .map(|&p| (p != ROOT_SENTINEL).then_some(p as i64))
                .collect(),
            root: JointIndex(root as u32),
        }
    }

    /// Preset whose joint count matches a motion array, if any.
    pub fn for_joint_count(joints: usize) -> Option<SkeletonPreset> {
        Self::ALL.into_iter().find(|p| p.joint_count() == joints)
    }
}

//! Index newtypes for joints and bones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a joint in a [`crate::JointTopology`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct JointIndex(pub u32);

/// Handle of a bone inside a [`crate::Rig`]. Bones are built one per joint,
/// so a bone id always equals the joint index it came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct BoneId(pub u32);

impl JointIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl BoneId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<JointIndex> for BoneId {
    fn from(j: JointIndex) -> Self {
        BoneId(j.0)
    }
}

impl fmt::Display for JointIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

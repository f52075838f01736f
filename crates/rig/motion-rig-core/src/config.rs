//! Conversion and export settings.

use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// Rest-pose geometry and naming used when building a rig.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Added to each head to place the tail. Must be nonzero so every bone
    /// has length; the same offset is used for all bones.
    pub tail_offset: [f32; 3],
    /// Bones are named `{prefix}{joint_index}`.
    pub bone_name_prefix: String,
    pub armature_name: String,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            tail_offset: [0.0, 0.0, 0.1],
            bone_name_prefix: "joint_".into(),
            armature_name: "MDM_Armature".into(),
        }
    }
}

impl RigConfig {
    pub fn validate(&self) -> Result<(), RigError> {
        if self.tail_offset.iter().any(|v| !v.is_finite()) {
            return Err(RigError::InvalidConfig {
                reason: format!("tail_offset {:?} is not finite", self.tail_offset),
            });
        }
        if self.tail_offset.iter().all(|v| *v == 0.0) {
            return Err(RigError::InvalidConfig {
                reason: "tail_offset must be nonzero".into(),
            });
        }
        if self.bone_name_prefix.is_empty() {
            return Err(RigError::InvalidConfig {
                reason: "bone_name_prefix must not be empty".into(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn bone_name(&self, joint: usize) -> String {
        format!("{}{}", self.bone_name_prefix, joint)
    }
}

/// Settings handed to export adapters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Playback rate of the exported timeline, frames per second.
    pub frame_rate: f32,
    /// Emit an extra tip bone below every leaf bone.
    pub add_leaf_bones: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            frame_rate: 24.0,
            add_leaf_bones: false,
        }
    }
}

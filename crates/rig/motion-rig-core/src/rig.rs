//! Bone hierarchy and per-bone keyframe streams.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::BoneId;

/// A bone's rest geometry and parent link. Never changes after the rig is built;
/// animation lives in the keyframe streams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub id: BoneId,
    /// Stable export-facing identity.
    pub name: String,
    pub head: [f32; 3],
    pub tail: [f32; 3],
    pub parent: Option<BoneId>,
}

/// Pose-space position of one bone at one exported frame.
///
/// `frame` is 1-based to match animation-tool timelines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: u32,
    pub bone: BoneId,
    pub position: [f32; 3],
}

/// Bones plus their keyframe streams, indexed by [`BoneId`].
///
/// Each conversion owns its own `Rig`; nothing here is shared between runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Rig {
    name: String,
    bones: Vec<Bone>,
    tracks: Vec<Vec<Keyframe>>,
    by_name: HashMap<String, BoneId>,
}

impl Rig {
    /// Assemble a rig from bones already validated by the builder.
    pub(crate) fn from_bones(name: String, bones: Vec<Bone>) -> Self {
        let by_name = bones.iter().map(|b| (b.name.clone(), b.id)).collect();
        let tracks = vec![Vec::new(); bones.len()];
        Self {
            name,
            bones,
            tracks,
            by_name,
        }
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut [Vec<Keyframe>] {
        &mut self.tracks
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.index())
    }

    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.by_name.get(name).and_then(|id| self.bone(*id))
    }

    /// The single parentless bone.
    pub fn root(&self) -> Option<&Bone> {
        self.bones.iter().find(|b| b.parent.is_none())
    }

    pub fn children(&self, id: BoneId) -> impl Iterator<Item = &Bone> + '_ {
        self.bones.iter().filter(move |b| b.parent == Some(id))
    }

    pub fn is_leaf(&self, id: BoneId) -> bool {
        self.children(id).next().is_none()
    }

    /// Keyframe stream of one bone, in increasing frame order.
    pub fn keyframes(&self, id: BoneId) -> &[Keyframe] {
        self.tracks
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Bones paired with their keyframe streams.
    pub fn tracks(&self) -> impl Iterator<Item = (&Bone, &[Keyframe])> + '_ {
        self.bones
            .iter()
            .zip(self.tracks.iter().map(Vec::as_slice))
    }

    /// Number of sampled frames; every bone carries the same count.
    pub fn frame_count(&self) -> usize {
        self.tracks.first().map_or(0, Vec::len)
    }

    pub fn keyframe_count(&self) -> usize {
        self.tracks.iter().map(Vec::len).sum()
    }

    pub fn has_animation(&self) -> bool {
        self.keyframe_count() > 0
    }
}

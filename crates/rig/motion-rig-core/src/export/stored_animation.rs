//! Reference adapter: a JSON scene with the skeleton and a StoredAnimation clip.
//!
//! Layout:
//! - `skeleton.bones[]`: name, parent name, rest head and tail;
//! - `animation`: StoredAnimation shape (`tracks[].animatableId` is
//!   `"<bone>.translation"`, point stamps normalized to [0,1], duration in ms);
//! - frame range and rate, so stamps map back to 1-based frames.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ExportOptions;
use crate::export::ExportAdapter;
use crate::rig::{Bone, Keyframe, Rig};

pub const SCENE_SCHEMA: &str = "motion-rig/scene.v1";

/// Channel suffix of every animated track.
pub const TRANSLATION_CHANNEL: &str = "translation";

const LEAF_SUFFIX: &str = "_end";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rig '{rig}' has no keyframes to export")]
    EmptyAnimation { rig: String },
    #[error("invalid export options: {reason}")]
    InvalidOptions { reason: String },
    #[error("serialize scene: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneBone {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub head: [f32; 3],
    pub tail: [f32; 3],
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Skeleton {
    pub bones: Vec<SceneBone>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimPoint {
    pub id: String,
    /// Normalized time in [0,1] within the clip duration.
    pub stamp: f32,
    /// 1-based source frame.
    pub frame: u32,
    pub value: Vector3,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimTrack {
    pub id: String,
    pub name: String,
    #[serde(rename = "animatableId")]
    pub animatable_id: String,
    pub points: Vec<AnimPoint>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredAnimation {
    pub id: String,
    pub name: String,
    pub tracks: Vec<AnimTrack>,
    #[serde(default)]
    pub groups: serde_json::Value,
    /// Milliseconds.
    pub duration: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneDocument {
    pub schema: String,
    pub name: String,
    #[serde(rename = "frameRate")]
    pub frame_rate: f32,
    #[serde(rename = "frameStart")]
    pub frame_start: u32,
    #[serde(rename = "frameEnd")]
    pub frame_end: u32,
    pub skeleton: Skeleton,
    pub animation: StoredAnimation,
}

impl SceneDocument {
    pub fn to_json_string(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to_path(&self, path: &Path) -> Result<(), ExportError> {
        let text = self.to_json_string()?;
        fs::write(path, text).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn bone(&self, name: &str) -> Option<&SceneBone> {
        self.skeleton.bones.iter().find(|b| b.name == name)
    }

    pub fn track(&self, bone: &str) -> Option<&AnimTrack> {
        let target = animatable_id(bone);
        self.animation
            .tracks
            .iter()
            .find(|t| t.animatable_id == target)
    }
}

/// Target path of a bone's translation channel.
pub fn animatable_id(bone: &str) -> String {
    format!("{bone}.{TRANSLATION_CHANNEL}")
}

/// Builds a [`SceneDocument`] in memory.
#[derive(Clone, Debug, Default)]
pub struct StoredAnimationExporter {
    pub options: ExportOptions,
}

impl StoredAnimationExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    fn validate(&self) -> Result<(), ExportError> {
        let fps = self.options.frame_rate;
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ExportError::InvalidOptions {
                reason: format!("frame_rate must be positive, got {fps}"),
            });
        }
        Ok(())
    }
}

impl ExportAdapter for StoredAnimationExporter {
    type Output = SceneDocument;
    type Error = ExportError;

    fn export(&mut self, rig: &Rig) -> Result<SceneDocument, ExportError> {
        self.validate()?;
        let frames = rig.frame_count();
        if frames == 0 {
            return Err(ExportError::EmptyAnimation {
                rig: rig.name().to_string(),
            });
        }

        let mut bones: Vec<SceneBone> = rig.bones().iter().map(|b| scene_bone(rig, b)).collect();
        if self.options.add_leaf_bones {
            let tips: Vec<SceneBone> = rig
                .bones()
                .iter()
                .filter(|b| rig.is_leaf(b.id))
                .map(leaf_tip)
                .collect();
            bones.extend(tips);
        }

        let tracks = rig
            .tracks()
            .map(|(bone, keys)| anim_track(bone, keys, frames))
            .collect();

        let span_s = (frames - 1) as f32 / self.options.frame_rate;
        let duration = ((span_s * 1000.0).round() as u32).max(1);

        log::debug!(
            "exporting '{}': {} bones, {} frames at {} fps",
            rig.name(),
            bones.len(),
            frames,
            self.options.frame_rate
        );

        Ok(SceneDocument {
            schema: SCENE_SCHEMA.into(),
            name: rig.name().to_string(),
            frame_rate: self.options.frame_rate,
            frame_start: 1,
            frame_end: frames as u32,
            skeleton: Skeleton { bones },
            animation: StoredAnimation {
                id: format!("{}-action", rig.name()),
                name: rig.name().to_string(),
                tracks,
                groups: serde_json::Value::Object(Default::default()),
                duration,
            },
        })
    }
}

/// Exports straight to a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileExporter {
    pub path: PathBuf,
    pub inner: StoredAnimationExporter,
}

impl JsonFileExporter {
    pub fn new(path: impl Into<PathBuf>, options: ExportOptions) -> Self {
        Self {
            path: path.into(),
            inner: StoredAnimationExporter::new(options),
        }
    }
}

impl ExportAdapter for JsonFileExporter {
    type Output = SceneDocument;
    type Error = ExportError;

    fn export(&mut self, rig: &Rig) -> Result<SceneDocument, ExportError> {
        let doc = self.inner.export(rig)?;
        doc.write_to_path(&self.path)?;
        Ok(doc)
    }
}

fn scene_bone(rig: &Rig, bone: &Bone) -> SceneBone {
    SceneBone {
        name: bone.name.clone(),
        parent: bone
            .parent
            .and_then(|p| rig.bone(p))
            .map(|p| p.name.clone()),
        head: bone.head,
        tail: bone.tail,
    }
}

fn leaf_tip(bone: &Bone) -> SceneBone {
    let dir = [
        bone.tail[0] - bone.head[0],
        bone.tail[1] - bone.head[1],
        bone.tail[2] - bone.head[2],
    ];
    SceneBone {
        name: format!("{}{LEAF_SUFFIX}", bone.name),
        parent: Some(bone.name.clone()),
        head: bone.tail,
        tail: [bone.tail[0] + dir[0], bone.tail[1] + dir[1], bone.tail[2] + dir[2]],
    }
}

fn anim_track(bone: &Bone, keys: &[Keyframe], frames: usize) -> AnimTrack {
    let last = (frames.max(1) - 1) as f32;
    let points = keys
        .iter()
        .map(|k| {
            let stamp = if last > 0.0 {
                (k.frame - 1) as f32 / last
            } else {
                0.0
            };
            AnimPoint {
                id: format!("{}-f{}", bone.name, k.frame),
                stamp,
                frame: k.frame,
                value: Vector3 {
                    x: k.position[0],
                    y: k.position[1],
                    z: k.position[2],
                },
            }
        })
        .collect();
    AnimTrack {
        id: format!("{}-{TRANSLATION_CHANNEL}", bone.name),
        name: bone.name.clone(),
        animatable_id: animatable_id(&bone.name),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RigConfig;
    use crate::convert::convert;
    use crate::motion::MotionSequence;
    use crate::topology::JointTopology;

    fn rig(frames: usize) -> Rig {
        let topo = JointTopology::from_parent_indices(&[-1, 0, 0]).unwrap();
        let data: Vec<f32> = (0..frames * 9).map(|v| v as f32).collect();
        let motion = MotionSequence::from_flat(frames, 3, data).unwrap();
        convert(&topo, &motion, &RigConfig::default()).unwrap()
    }

    #[test]
    fn stamps_span_unit_interval() {
        let doc = StoredAnimationExporter::default().export(&rig(5)).unwrap();
        let track = doc.track("joint_1").expect("joint_1 track");
        let stamps: Vec<f32> = track.points.iter().map(|p| p.stamp).collect();
        assert_eq!(stamps, [0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(track.points[4].frame, 5);
        assert_eq!((doc.frame_start, doc.frame_end), (1, 5));
        // 4 frame intervals at 24 fps
        assert_eq!(doc.animation.duration, 167);
    }

    #[test]
    fn single_frame_has_zero_stamp_and_nonzero_duration() {
        let doc = StoredAnimationExporter::default().export(&rig(1)).unwrap();
        assert_eq!(doc.track("joint_0").unwrap().points[0].stamp, 0.0);
        assert_eq!(doc.animation.duration, 1);
    }

    #[test]
    fn leaf_tips_only_when_requested() {
        let r = rig(2);
        let plain = StoredAnimationExporter::default().export(&r).unwrap();
        assert_eq!(plain.skeleton.bones.len(), 3);

        let mut with_tips = StoredAnimationExporter::new(ExportOptions {
            add_leaf_bones: true,
            ..ExportOptions::default()
        });
        let doc = with_tips.export(&r).unwrap();
        assert_eq!(doc.skeleton.bones.len(), 5);
        let tip = doc.bone("joint_2_end").expect("tip for joint_2");
        assert_eq!(tip.parent.as_deref(), Some("joint_2"));
        assert_eq!(tip.head, r.bones()[2].tail);
        assert!(doc.bone("joint_0_end").is_none());
        assert_eq!(doc.animation.tracks.len(), 3);
    }

    #[test]
    fn rejects_unanimated_rig_and_bad_rate() {
        let topo = JointTopology::from_parent_indices(&[-1]).unwrap();
        let bare = crate::builder::build(&topo, &[[0.0; 3]], &RigConfig::default()).unwrap();
        assert!(matches!(
            StoredAnimationExporter::default().export(&bare),
            Err(ExportError::EmptyAnimation { .. })
        ));

        let mut bad = StoredAnimationExporter::new(ExportOptions {
            frame_rate: 0.0,
            ..ExportOptions::default()
        });
        assert!(matches!(
            bad.export(&rig(2)),
            Err(ExportError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn parents_are_exported_by_name() {
        let doc = StoredAnimationExporter::default().export(&rig(2)).unwrap();
        assert_eq!(doc.bone("joint_0").unwrap().parent, None);
        assert_eq!(doc.bone("joint_2").unwrap().parent.as_deref(), Some("joint_0"));
        let back: SceneDocument = serde_json::from_str(&doc.to_json_string().unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}

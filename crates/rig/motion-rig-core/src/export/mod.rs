//! Export adapter contract.
//!
//! Serializing a rig into an interchange format is the adapter's job; the
//! core only guarantees that an adapter receives a complete rig. Adapters
//! export every bone of the rig, keep bone names as identifiers, and own
//! any extra-bone policy such as leaf tips.

pub mod stored_animation;

use crate::rig::Rig;

pub use stored_animation::{
    ExportError, JsonFileExporter, SceneBone, SceneDocument, StoredAnimationExporter,
};

/// Consumer of a finished rig.
pub trait ExportAdapter {
    type Output;
    type Error: std::error::Error + 'static;

    fn export(&mut self, rig: &Rig) -> Result<Self::Output, Self::Error>;
}

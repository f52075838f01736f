//! Named motion fixtures from the shared `fixtures/` folder, decoded into
//! [`MotionSequence`]s for tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use motion_rig_core::{parse_motion_json, MotionSequence};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    motions: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod motions {
    use super::*;

    fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.motions, "motion", name)?;
        read_to_string(rel)
    }

    /// Decode fixture `name`, taking `repetition` from results dumps.
    pub fn sequence(name: &str, repetition: usize) -> Result<MotionSequence> {
        let text = json(name)?;
        parse_motion_json(&text, repetition)
            .with_context(|| format!("decode motion fixture '{name}' (repetition {repetition})"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.motions, "motion", name)?;
        Ok(resolve_path(rel))
    }
}

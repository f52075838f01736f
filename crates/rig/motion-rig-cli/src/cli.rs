use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use motion_rig_core::{
    convert_and_export, parse_motion_json, ExportOptions, JointTopology, JsonFileExporter,
    RigConfig, SkeletonPreset,
};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "motion-to-rig")]
#[command(about = "Build a keyframed skeleton from per-frame joint positions")]
pub struct Cli {
    /// Motion JSON: a model results dump or a plain `frames` document
    #[arg(long)]
    pub input: PathBuf,

    /// Destination of the scene document
    #[arg(long)]
    pub output: PathBuf,

    /// Joint topology; `auto` picks a preset by joint count
    #[arg(long, value_enum, default_value_t = SkeletonArg::Auto)]
    pub skeleton: SkeletonArg,

    /// Which sample to take from a results dump
    #[arg(long, default_value_t = 0)]
    pub repetition: usize,

    /// Overrides the exported frame rate
    #[arg(long)]
    pub frame_rate: Option<f32>,

    /// Add a tip bone under every leaf bone
    #[arg(long)]
    pub add_leaf_bones: bool,

    /// JSON file with `rig` and `export` sections
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SkeletonArg {
    Auto,
    Smpl24,
    #[value(name = "humanml22")]
    HumanMl22,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    rig: RigConfig,
    export: ExportOptions,
}

#[derive(Debug)]
pub struct Summary {
    pub output: PathBuf,
    pub bones: usize,
    pub frames: usize,
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn resolve_topology(arg: SkeletonArg, joints: usize) -> Result<JointTopology> {
    let preset = match arg {
        SkeletonArg::Auto => SkeletonPreset::for_joint_count(joints)
            .ok_or_else(|| anyhow!("no skeleton preset has {joints} joints"))?,
        SkeletonArg::Smpl24 => SkeletonPreset::Smpl24,
        SkeletonArg::HumanMl22 => SkeletonPreset::HumanMl22,
    };
    log::debug!("using {preset:?} topology for {joints} joints");
    Ok(preset.topology())
}

pub fn run(cli: &Cli) -> Result<Summary> {
    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(fps) = cli.frame_rate {
        cfg.export.frame_rate = fps;
    }
    if cli.add_leaf_bones {
        cfg.export.add_leaf_bones = true;
    }

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("read motion {}", cli.input.display()))?;
    let motion = parse_motion_json(&text, cli.repetition)
        .with_context(|| format!("decode motion {}", cli.input.display()))?;
    let topology = resolve_topology(cli.skeleton, motion.joint_count())?;

    let mut exporter = JsonFileExporter::new(&cli.output, cfg.export);
    let doc = convert_and_export(&topology, &motion, &cfg.rig, &mut exporter)
        .with_context(|| format!("convert {}", cli.input.display()))?;

    Ok(Summary {
        output: cli.output.clone(),
        bones: doc.skeleton.bones.len(),
        frames: doc.frame_end as usize,
    })
}

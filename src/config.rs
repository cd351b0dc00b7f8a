//! Run configuration resolved from the command line
//!
//! All settings live in one immutable [`Config`] handed explicitly to the
//! planner, optimizer, and emitter; nothing reads process-wide state.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::ValueEnum;

/// Serialization format of the emitted plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    Hcl,
    Json,
}

impl PlanFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PlanFormat::Hcl => "hcl",
            PlanFormat::Json => "json",
        }
    }
}

/// Per-target output directives for crossover stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Omit,
    Registry,
    Local,
    Both,
}

impl OutputMode {
    pub fn from_flag(value: u8) -> Result<Self> {
        Ok(match value {
            0 => OutputMode::Omit,
            1 => OutputMode::Registry,
            2 => OutputMode::Local,
            3 => OutputMode::Both,
            other => bail!(
                "invalid output mode {other}: valid values are 0 (omit), 1 (registry), 2 (local), 3 (both)"
            ),
        })
    }

    /// Output directives to emit, empty for [`OutputMode::Omit`].
    pub fn directives(self) -> &'static [&'static str] {
        match self {
            OutputMode::Omit => &[],
            OutputMode::Registry => &["type=registry"],
            OutputMode::Local => &["type=docker"],
            OutputMode::Both => &["type=registry", "type=docker"],
        }
    }
}

/// Immutable settings for one planning run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory scanned for Dockerfiles.
    pub root: PathBuf,
    /// Destination of the emitted plan.
    pub outfile: PathBuf,
    /// Tag applied to crossover stages.
    pub tag: String,
    pub format: PlanFormat,
    pub output_mode: OutputMode,
    /// Brute-force attempt budget; 0 disables optimization.
    pub optimize: usize,
    /// Requested worker count; 0 means auto (available cores − 1).
    pub cores: usize,
    pub verbose: bool,
}

impl Config {
    /// Validate and resolve raw command-line values.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        root: PathBuf,
        outfile: PathBuf,
        tag: String,
        format: PlanFormat,
        output: u8,
        optimize: usize,
        cores: usize,
        verbose: bool,
    ) -> Result<Self> {
        if !root.is_dir() {
            bail!("{} is not a valid directory", root.display());
        }
        let output_mode = OutputMode::from_flag(output)?;

        // The bare default gets the extension matching the chosen format.
        let outfile = if outfile == Path::new("docker") {
            PathBuf::from(format!("docker.{}", format.extension()))
        } else {
            outfile
        };

        Ok(Self {
            root,
            outfile,
            tag,
            format,
            output_mode,
            optimize,
            cores,
            verbose,
        })
    }
}

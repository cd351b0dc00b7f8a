//! Plan emission in Docker Bake formats

mod hcl;
mod json;

pub use hcl::render_hcl;
pub use json::render_json;

use std::collections::BTreeSet;

use anyhow::{Context, Result};

use crate::config::{Config, PlanFormat};
use crate::model::Stage;

/// Render the plan in the configured format and write it to the configured
/// output file.
pub fn write_plan(
    stages: &[Stage],
    waves: &[Vec<String>],
    crossover: &BTreeSet<String>,
    config: &Config,
) -> Result<()> {
    let rendered = match config.format {
        PlanFormat::Hcl => render_hcl(stages, waves, crossover, config),
        PlanFormat::Json => render_json(stages, waves, crossover, config)?,
    };
    std::fs::write(&config.outfile, rendered)
        .with_context(|| format!("failed to write plan to {}", config.outfile.display()))
}

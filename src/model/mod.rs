//! Core data model for build stages

mod error;
mod stage;

pub use error::PlanError;
pub use stage::{strip_version, Stage};

use std::collections::BTreeSet;

/// Verify that stage names are globally unique.
///
/// Downstream resolution is by name alone, so a duplicate makes the whole
/// run ambiguous. Checked before the closure runs.
pub fn check_unique_names(stages: &[Stage]) -> Result<(), PlanError> {
    let mut seen = BTreeSet::new();
    for stage in stages {
        if !seen.insert(stage.stage_name.as_str()) {
            return Err(PlanError::DuplicateStage {
                name: stage.stage_name.clone(),
                file: stage.file_path.clone(),
            });
        }
    }
    Ok(())
}

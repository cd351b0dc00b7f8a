//! Cross-file stage reference detection

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::{strip_version, Stage};

use super::dockerfile::scan_references;

/// Find stages referenced from a build file other than the one defining
/// them.
///
/// These stages need a registry-visible tag so other build files can resolve
/// them; the result only marks names, it never mutates stage records. A
/// reference is compared by bare name (version tag stripped), since a
/// crossover stage is referenced in tagged form from its non-native files.
pub fn find_crossover_stages(stages: &[Stage]) -> Result<BTreeSet<String>> {
    let mut crossover = BTreeSet::new();

    let files: BTreeSet<&PathBuf> = stages.iter().map(|s| &s.file_path).collect();
    for file in files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        for reference in scan_references(&content) {
            let bare = strip_version(&reference);
            for stage in stages {
                if stage.stage_name == bare && stage.file_path != **file {
                    crossover.insert(stage.stage_name.clone());
                }
            }
        }
    }

    Ok(crossover)
}

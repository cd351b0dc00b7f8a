//! Dockerfile discovery and stage extraction

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::Stage;

/// Compiled directive patterns, shared across every file of one run.
pub(crate) struct DirectivePatterns {
    from: Regex,
    copy_from: Regex,
    mount_from: Regex,
}

impl DirectivePatterns {
    pub(crate) fn new() -> Self {
        Self {
            from: Regex::new(r"(?i)^FROM\s+(\S+)\s+AS\s+(\S+)").expect("invalid FROM pattern"),
            copy_from: Regex::new(r"(?i)COPY\s+--from=(\S+)").expect("invalid COPY pattern"),
            mount_from: Regex::new(r"(?i)--mount=.*?from=([^\s,\\]+)")
                .expect("invalid mount pattern"),
        }
    }
}

/// Recursively find every file named `Dockerfile` under `root`, in sorted
/// path order.
pub fn find_dockerfiles(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = root.join("**").join("Dockerfile");
    let pattern = pattern.to_string_lossy().into_owned();
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid search pattern under {}", root.display()))?
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    Ok(files)
}

/// Parse every Dockerfile under `root` into stage records.
pub fn parse_tree(root: &Path) -> Result<Vec<Stage>> {
    let patterns = DirectivePatterns::new();
    let mut stages = Vec::new();

    for file in find_dockerfiles(root)? {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        parse_file(&patterns, &file, &content, &mut stages)?;
    }

    Ok(stages)
}

/// Extract the stages of one file, in definition order, appending to
/// `stages`. A record equal by `(file, name, base)` is inserted at most once.
fn parse_file(
    patterns: &DirectivePatterns,
    file: &Path,
    content: &str,
    stages: &mut Vec<Stage>,
) -> Result<()> {
    let mut current: Option<Stage> = None;

    for line in content.lines() {
        if let Some(caps) = patterns.from.captures(line.trim()) {
            if let Some(done) = current.take() {
                push_unique(stages, done);
            }
            current = Some(Stage::new(file, &caps[1], &caps[2]));
        }

        // Copy/mount directives before the first named FROM have no
        // enclosing stage and are ignored.
        if let Some(stage) = current.as_mut() {
            for caps in patterns.copy_from.captures_iter(line) {
                stage.add_dependency(&caps[1])?;
            }
            for caps in patterns.mount_from.captures_iter(line) {
                stage.add_dependency(&caps[1])?;
            }
        }
    }

    if let Some(done) = current.take() {
        push_unique(stages, done);
    }

    Ok(())
}

fn push_unique(stages: &mut Vec<Stage>, stage: Stage) {
    if !stages.contains(&stage) {
        stages.push(stage);
    }
}

/// Every raw stage reference in one file's content: `FROM` base references
/// plus `--from=` references from copy and mount directives.
pub fn scan_references(content: &str) -> Vec<String> {
    let patterns = DirectivePatterns::new();
    let mut references = Vec::new();

    for line in content.lines() {
        if let Some(caps) = patterns.from.captures(line.trim()) {
            references.push(caps[1].to_string());
        }
        for caps in patterns.copy_from.captures_iter(line) {
            references.push(caps[1].to_string());
        }
        for caps in patterns.mount_from.captures_iter(line) {
            references.push(caps[1].to_string());
        }
    }

    references
}

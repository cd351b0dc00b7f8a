//! Transitive dependency closure over the parsed stage set

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{strip_version, Stage};

/// True when `reference` carries a version tag whose bare name is a stage in
/// this run. Such references point at locally built images, not registry
/// images, and must be followed under their bare name.
pub fn is_local_image(reference: &str, stages: &[Stage]) -> bool {
    if !reference.contains(':') {
        return false;
    }
    let bare = strip_version(reference);
    stages.iter().any(|s| s.stage_name == bare)
}

/// Expand every stage's `transitive_deps` to the full set of stage names and
/// external references reachable through declared and base-image edges.
///
/// References that name no stage accumulate in `unresolved` (external base
/// images) and are never followed. Tagged references to local stages are
/// normalized in place on the stage being expanded. Stages already explored
/// are skipped; an explored stage reached transitively contributes its full
/// dependency set without a re-walk.
pub fn resolve_dependencies(stages: &mut [Stage], unresolved: &mut BTreeSet<String>) {
    for idx in 0..stages.len() {
        if stages[idx].explored {
            continue;
        }
        debug!(stage = %stages[idx].stage_name, "expanding dependencies");

        // Snapshot before any mutation: the dependency set grows while the
        // expansion runs, but the driving iteration must not.
        let snapshot = stages[idx].iteration_order();
        let mut visited = BTreeSet::from([stages[idx].stage_name.clone()]);
        for dep in snapshot {
            follow(idx, &dep, stages, unresolved, &mut visited, 1);
        }
        stages[idx].explored = true;
    }
}

/// Follow one reference on behalf of `stages[record]`, recording everything
/// reachable into its transitive set.
///
/// `depth` is diagnostic only; termination comes from `visited`, which spans
/// one top-level expansion.
fn follow(
    record: usize,
    reference: &str,
    stages: &mut [Stage],
    unresolved: &mut BTreeSet<String>,
    visited: &mut BTreeSet<String>,
    depth: usize,
) {
    let mut name = reference.to_string();
    if is_local_image(&name, stages) {
        stages[record].remove_version(&name);
        name = strip_version(&name).to_string();
    }

    let Some(target) = stages.iter().position(|s| s.stage_name == name) else {
        stages[record].transitive_deps.insert(name.clone());
        unresolved.insert(name);
        return;
    };

    if target != record {
        stages[record].transitive_deps.insert(name.clone());
    }
    if !visited.insert(name) {
        return;
    }

    debug!(
        depth,
        stage = %stages[record].stage_name,
        follow = %stages[target].stage_name,
        "following dependency"
    );

    if stages[target].explored {
        let inherited = stages[target].all_deps();
        stages[record].transitive_deps.extend(inherited);
        return;
    }

    let snapshot = stages[target].iteration_order();
    for dep in snapshot {
        follow(record, &dep, stages, unresolved, visited, depth + 1);
    }
}

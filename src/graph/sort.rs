//! Topological ordering of the closed stage set

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::model::{PlanError, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Order stages so that every stage follows all stages it depends on.
///
/// Stages are first pre-ordered ascending by dependency count; the DFS then
/// emits leaves first, which keeps related stages adjacent and gives the
/// wave grouper tighter waves. Dependencies in `unresolved` are external
/// leaves and are skipped; any other unknown dependency is fatal.
pub fn topological_sort(
    stages: &[Stage],
    unresolved: &BTreeSet<String>,
) -> Result<Vec<String>, PlanError> {
    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|s| s.all_deps().len());

    if tracing::enabled!(tracing::Level::DEBUG) {
        let names: Vec<&str> = ordered.iter().map(|s| s.stage_name.as_str()).collect();
        debug!(?names, "pre-sort order by dependency count");
    }

    let by_name: HashMap<&str, &Stage> = stages
        .iter()
        .map(|s| (s.stage_name.as_str(), s))
        .collect();
    let mut marks: HashMap<&str, Mark> = stages
        .iter()
        .map(|s| (s.stage_name.as_str(), Mark::White))
        .collect();
    let mut sorted = Vec::with_capacity(stages.len());

    for stage in &ordered {
        visit(stage, &by_name, unresolved, &mut marks, &mut sorted)?;
    }

    debug!(order = ?sorted, "topological order");
    Ok(sorted)
}

fn visit<'a>(
    stage: &'a Stage,
    by_name: &HashMap<&str, &'a Stage>,
    unresolved: &BTreeSet<String>,
    marks: &mut HashMap<&'a str, Mark>,
    sorted: &mut Vec<String>,
) -> Result<(), PlanError> {
    match marks[stage.stage_name.as_str()] {
        Mark::Gray => return Err(PlanError::Cycle(stage.stage_name.clone())),
        Mark::Black => return Ok(()),
        Mark::White => {}
    }
    marks.insert(&stage.stage_name, Mark::Gray);

    for dep in stage.iteration_order() {
        if unresolved.contains(&dep) {
            continue;
        }
        let Some(next) = by_name.get(dep.as_str()) else {
            return Err(PlanError::MissingDep {
                stage: stage.stage_name.clone(),
                dep,
            });
        };
        visit(next, by_name, unresolved, marks, sorted)?;
    }

    marks.insert(&stage.stage_name, Mark::Black);
    sorted.push(stage.stage_name.clone());
    Ok(())
}

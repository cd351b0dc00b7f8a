//! Barrier grouping of the topological order into parallel waves

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::model::Stage;

use super::sticky::StickyBool;

/// Partition the topological order into waves of stages with no dependencies
/// among themselves.
///
/// Single pass with two sets, both seeded with the unresolved references:
/// `seen` holds every name encountered so far, `satisfied` holds names whose
/// wave has been closed. A stage joins the current wave unless one of its
/// dependencies was seen but not yet satisfied (it sits in the wave under
/// construction), in which case the wave is flushed and a new one starts
/// with that stage. Every dependency of a stage in wave `i` is therefore
/// unresolved, external, or built in some wave `j < i`.
pub fn group_into_waves(
    order: &[String],
    stages: &[Stage],
    unresolved: &BTreeSet<String>,
) -> Vec<Vec<String>> {
    let by_name: HashMap<&str, &Stage> = stages
        .iter()
        .map(|s| (s.stage_name.as_str(), s))
        .collect();

    let mut seen: BTreeSet<String> = unresolved.clone();
    let mut satisfied: BTreeSet<String> = unresolved.clone();
    let mut waves: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for name in order {
        let Some(stage) = by_name.get(name.as_str()) else {
            continue;
        };
        seen.insert(name.clone());

        let mut add_to_wave = StickyBool::new();
        for dep in stage.all_deps() {
            match (seen.contains(&dep), satisfied.contains(&dep)) {
                (false, false) => {
                    if !unresolved.contains(&dep) {
                        warn!(stage = %name, dependency = %dep, "dependency neither seen nor satisfied");
                    }
                }
                (true, false) => add_to_wave.set_false(),
                (false, true) | (true, true) => add_to_wave.set_true(),
            }
        }

        if add_to_wave.get() {
            current.push(name.clone());
        } else {
            if !current.is_empty() {
                satisfied.extend(current.iter().cloned());
                waves.push(std::mem::take(&mut current));
            }
            current.push(name.clone());
        }
    }

    if !current.is_empty() {
        waves.push(current);
    }

    waves
}

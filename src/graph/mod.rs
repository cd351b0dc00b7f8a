//! Dependency graph core: closure, ordering, and wave grouping

mod closure;
mod group;
mod sort;
mod sticky;


pub use closure::{is_local_image, resolve_dependencies};
pub use group::group_into_waves;
pub use sort::topological_sort;
pub use sticky::StickyBool;

use std::collections::BTreeSet;

use crate::model::{PlanError, Stage};

/// Run the closure → sort → group pipeline over one stage set.
///
/// Mutates the stages (transitive accumulation, version normalization,
/// explored flags) and accumulates unresolved external references. This is
/// the unit the optimizer re-runs per attempt on independent clones.
pub fn plan_waves(
    stages: &mut [Stage],
    unresolved: &mut BTreeSet<String>,
) -> Result<Vec<Vec<String>>, PlanError> {
    resolve_dependencies(stages, unresolved);
    let order = topological_sort(stages, unresolved)?;
    Ok(group_into_waves(&order, stages, unresolved))
}

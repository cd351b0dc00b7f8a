//! Fatal error taxonomy for the planning core

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a planning run.
///
/// Unresolved references are deliberately not represented here: a dependency
/// that names no stage is treated as an external base image and accumulates
/// in the unresolved set instead of failing the run.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Two stages share a name. Stage names must be unique across the whole
    /// run because downstream references resolve by name alone.
    #[error("duplicate stage name '{name}' in {}", .file.display())]
    DuplicateStage { name: String, file: PathBuf },

    /// The topological sort revisited a stage on the current path.
    #[error("circular dependency detected at stage '{0}'")]
    Cycle(String),

    /// A dependency is neither a known stage nor in the unresolved set.
    #[error("dependency '{dep}' not found for stage '{stage}'")]
    MissingDep { stage: String, dep: String },

    /// A dependency reference that cannot name anything (blank string).
    #[error("dependency reference must be a non-empty string")]
    InvalidInput,
}

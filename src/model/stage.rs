//! The build stage record and its reference-normalization helpers

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::PlanError;

/// Strip a version tag from an image reference: `name:tag` becomes `name`.
///
/// References without a tag are returned unchanged.
pub fn strip_version(reference: &str) -> &str {
    reference.split(':').next().unwrap_or(reference)
}

/// One build stage extracted from a `FROM … AS name` directive.
///
/// The base reference is normalized at construction: a registry prefix (up to
/// and including the last `/`) and a version tag (after `:`) are split into
/// separate fields, leaving `base_image` as the bare name.
///
/// Stage records are plain data (serializable, cloneable) so optimizer
/// workers can operate on independent copies without sharing anything with
/// the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Build file that defines this stage.
    pub file_path: PathBuf,
    /// Stage alias; unique across the whole run.
    pub stage_name: String,
    /// Bare base image name (registry and tag stripped).
    pub base_image: String,
    /// Registry prefix of the original base reference, including the
    /// trailing `/`.
    pub registry: Option<String>,
    /// Version tag of the original base reference.
    pub version_tag: Option<String>,
    /// References declared by `COPY --from=` and `--mount=…from=` directives.
    pub declared_deps: BTreeSet<String>,
    /// Closure under the dependency relation; filled by the resolver.
    pub transitive_deps: BTreeSet<String>,
    /// Set once the transitive closure has been computed for this stage.
    pub explored: bool,
    /// Explicit dependency-iteration order. Empty until the optimizer
    /// initializes it; shuffled independently per attempt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub iteration_hint: Vec<String>,
}

impl Stage {
    /// Create a stage from the raw base reference and alias of a
    /// `FROM <raw_base> AS <stage_name>` directive.
    pub fn new(file_path: impl Into<PathBuf>, raw_base: &str, stage_name: &str) -> Self {
        let mut registry = None;
        let mut base_image = raw_base.to_string();

        if let Some(idx) = base_image.rfind('/') {
            registry = Some(base_image[..=idx].to_string());
            base_image = base_image[idx + 1..].to_string();
        }

        let mut version_tag = None;
        if let Some(idx) = base_image.find(':') {
            version_tag = Some(base_image[idx + 1..].to_string());
            base_image.truncate(idx);
        }

        Self {
            file_path: file_path.into(),
            stage_name: stage_name.to_string(),
            base_image,
            registry,
            version_tag,
            declared_deps: BTreeSet::new(),
            transitive_deps: BTreeSet::new(),
            explored: false,
            iteration_hint: Vec::new(),
        }
    }

    /// Record a declared dependency reference.
    pub fn add_dependency(&mut self, dependency: &str) -> Result<(), PlanError> {
        if dependency.trim().is_empty() {
            return Err(PlanError::InvalidInput);
        }
        self.declared_deps.insert(dependency.to_string());
        Ok(())
    }

    /// The base reference as it appeared in the build file, minus the
    /// registry prefix: `base_image` with its version tag reattached.
    pub fn base_reference(&self) -> String {
        match &self.version_tag {
            Some(tag) => format!("{}:{tag}", self.base_image),
            None => self.base_image.clone(),
        }
    }

    /// Every dependency of this stage: declared, transitive, and the base
    /// reference.
    pub fn all_deps(&self) -> BTreeSet<String> {
        let mut deps: BTreeSet<String> = self
            .declared_deps
            .union(&self.transitive_deps)
            .cloned()
            .collect();
        deps.insert(self.base_reference());
        deps
    }

    /// Rewrite a tagged reference to its bare name wherever this stage holds
    /// it: any matching declared dependency, and the base reference itself.
    ///
    /// Called when `name:tag` turns out to name a local stage, so that
    /// cross-file references match by bare name.
    pub fn remove_version(&mut self, tagged: &str) {
        if !tagged.contains(':') {
            return;
        }
        let bare = strip_version(tagged).to_string();
        if self.declared_deps.remove(tagged) {
            self.declared_deps.insert(bare);
        }
        if self.base_reference() == tagged {
            self.version_tag = None;
        }
    }

    /// Registry prefix, or the empty string when the base had none.
    pub fn registry_value(&self) -> &str {
        self.registry.as_deref().unwrap_or("")
    }

    /// Dependency iteration order for closure and sort passes.
    ///
    /// With no hint set this is the sorted set order, so a single pass is
    /// fully deterministic. When the optimizer has installed a shuffled hint
    /// it drives the order; members added after the hint was built (or
    /// renamed by version stripping) are appended in sorted order.
    pub fn iteration_order(&self) -> Vec<String> {
        let deps = self.all_deps();
        if self.iteration_hint.is_empty() {
            return deps.into_iter().collect();
        }
        let mut order: Vec<String> = self
            .iteration_hint
            .iter()
            .filter(|d| deps.contains(d.as_str()))
            .cloned()
            .collect();
        for dep in deps {
            if !self.iteration_hint.contains(&dep) {
                order.push(dep);
            }
        }
        order
    }

    /// Seed the iteration hint from the current dependency set.
    pub fn init_iteration_order(&mut self) {
        self.iteration_hint = self.all_deps().into_iter().collect();
    }

    /// Independent copy for one optimization attempt: same data, `explored`
    /// reset so the attempt re-runs the closure on its own records.
    pub fn clone_for_attempt(&self) -> Self {
        let mut clone = self.clone();
        clone.explored = false;
        clone
    }
}

/// Equality is identity at parse boundaries: same file, same alias, same
/// base. Used to de-duplicate repeated definitions during parsing.
impl PartialEq for Stage {
    fn eq(&self, other: &Self) -> bool {
        self.file_path == other.file_path
            && self.stage_name == other.stage_name
            && self.base_image == other.base_image
    }
}

impl Eq for Stage {}

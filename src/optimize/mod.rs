//! Randomized brute-force search over dependency iteration orders
//!
//! The wave count depends on the order dependencies are iterated during the
//! closure and sort passes: different orders break ties differently and move
//! the grouper's flush points. The search re-runs the pipeline on
//! independent clones with freshly shuffled orders and keeps the shortest
//! wave list. Graph height is a hard lower bound, so chains cannot improve.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rayon::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::graph;
use crate::model::{PlanError, Stage};

/// Result of an optimization run, including the counts for the report.
#[derive(Debug)]
pub struct OptimizeOutcome {
    /// The winning wave list (the baseline when nothing beat it).
    pub waves: Vec<Vec<String>>,
    /// Fewest waves over baseline and all attempts.
    pub best: usize,
    /// Most waves over baseline and all attempts.
    pub worst: usize,
    /// Wave count of the unoptimized pass.
    pub baseline: usize,
    pub attempts: usize,
    pub workers: usize,
    pub available_cores: usize,
}

/// Pool sizing: auto-detect when `requested` is 0, and always leave one core
/// free.
fn worker_count(requested: usize, available: usize) -> usize {
    let ceiling = available.saturating_sub(1).max(1);
    if requested == 0 {
        ceiling
    } else {
        requested.min(ceiling)
    }
}

/// Search for a shorter wave list than `baseline`.
///
/// `stages` must already be closed (the baseline pipeline has run); the
/// records are never mutated here. A budget of 0 returns the baseline
/// unchanged. Each attempt owns a deep clone of the records with `explored`
/// reset, shuffles every stage's iteration order independently, and re-runs
/// the full pipeline. Ties keep the earliest attempt (strict improvement
/// only), so the reduction is insensitive to completion order.
pub fn optimize(
    stages: &[Stage],
    unresolved: &BTreeSet<String>,
    baseline: Vec<Vec<String>>,
    config: &Config,
) -> Result<OptimizeOutcome> {
    let available_cores = num_cpus::get();
    let workers = worker_count(config.cores, available_cores);
    let baseline_len = baseline.len();

    if config.optimize == 0 {
        return Ok(OptimizeOutcome {
            waves: baseline,
            best: baseline_len,
            worst: baseline_len,
            baseline: baseline_len,
            attempts: 0,
            workers,
            available_cores,
        });
    }

    // Template records carry the iteration hints the attempts shuffle.
    let mut template: Vec<Stage> = stages.iter().map(Stage::clone_for_attempt).collect();
    for stage in &mut template {
        stage.init_iteration_order();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("failed to build optimizer worker pool")?;

    let attempts: Result<Vec<Vec<Vec<String>>>, PlanError> = pool.install(|| {
        (0..config.optimize)
            .into_par_iter()
            .map(|attempt| {
                let mut clone: Vec<Stage> =
                    template.iter().map(Stage::clone_for_attempt).collect();
                let mut rng = rand::rng();
                for stage in &mut clone {
                    stage.iteration_hint.shuffle(&mut rng);
                }
                let mut attempt_unresolved = unresolved.clone();
                let waves = graph::plan_waves(&mut clone, &mut attempt_unresolved)?;
                debug!(attempt, waves = waves.len(), "optimization attempt complete");
                Ok(waves)
            })
            .collect()
    });
    let attempts = attempts?;

    let mut best = baseline_len;
    let mut worst = baseline_len;
    let mut waves = baseline;
    for attempt in attempts {
        best = best.min(attempt.len());
        worst = worst.max(attempt.len());
        if attempt.len() < waves.len() {
            waves = attempt;
        }
    }

    Ok(OptimizeOutcome {
        waves,
        best,
        worst,
        baseline: baseline_len,
        attempts: config.optimize,
        workers,
        available_cores,
    })
}

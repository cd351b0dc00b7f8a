//! The end-to-end planning command: parse, resolve, group, optimize, emit

use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::Result;

use crate::config::Config;
use crate::display;
use crate::emit;
use crate::graph;
use crate::model;
use crate::optimize;
use crate::parser;

pub fn execute(config: Config) -> Result<()> {
    let started = Instant::now();
    display::header();
    display::title();

    display::section("Parsing Dockerfiles...");
    let mut stages = parser::parse_tree(&config.root)?;
    model::check_unique_names(&stages)?;
    if stages.is_empty() {
        display::warning(&format!(
            "no Dockerfiles found under {}",
            config.root.display()
        ));
    }

    display::section("Parsed stages:");
    for stage in &stages {
        display::info(&display::stage_line(stage));
    }
    display::section(&format!("Count: {}", stages.len()));
    display::divider();

    display::section("Identifying crossover stages...");
    let crossover = parser::find_crossover_stages(&stages)?;
    for name in &crossover {
        display::info(name);
    }
    display::divider();

    display::section("Identifying custom registries...");
    for stage in &stages {
        if let Some(registry) = &stage.registry {
            display::info(registry);
        }
    }
    display::divider();

    display::section("Identifying unique tags...");
    let tags: BTreeSet<&str> = stages
        .iter()
        .filter_map(|s| s.version_tag.as_deref())
        .collect();
    for tag in tags {
        display::info(tag);
    }
    display::divider();

    display::section("Deep dependency search");
    let mut unresolved = BTreeSet::new();
    let mut waves = graph::plan_waves(&mut stages, &mut unresolved)?;
    for stage in &stages {
        display::info(&display::stage_line(stage));
    }
    display::divider();
    display::unresolved_report(&unresolved);
    display::divider();

    if config.optimize > 0 {
        let outcome = optimize::optimize(&stages, &unresolved, waves, &config)?;
        display::section(&format!(
            "Available cores: {}, using: {}",
            outcome.available_cores, outcome.workers
        ));
        display::section(&format!(
            "Optimized with {} brute force attempts",
            outcome.attempts
        ));
        display::info(&format!("Fewest waves: {}", outcome.best));
        display::info(&format!("Most waves: {}", outcome.worst));
        display::info(&format!("Pre-optimization waves: {}", outcome.baseline));
        display::divider();
        waves = outcome.waves;
    }

    display::section("Sorted waves by build order:");
    for wave in &waves {
        display::section("Wave:");
        for name in wave {
            if let Some(stage) = stages.iter().find(|s| &s.stage_name == name) {
                display::info(&display::stage_line(stage));
            }
        }
    }
    display::divider();

    emit::write_plan(&stages, &waves, &crossover, &config)?;
    display::info(&format!(
        "Successfully created {}",
        config.outfile.display()
    ));

    display::footer();
    println!("\nTime taken: {} ms", started.elapsed().as_millis());
    Ok(())
}

//! Docker Bake JSON rendering

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::model::Stage;

#[derive(Debug, Serialize)]
struct BakeTarget {
    dockerfile: String,
    target: String,
    args: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<Vec<String>>,
    #[serde(rename = "cache-to")]
    cache_to: Vec<String>,
    #[serde(rename = "cache-from")]
    cache_from: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BakeGroup {
    targets: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BakeFile {
    target: BTreeMap<String, BakeTarget>,
    group: BTreeMap<String, BakeGroup>,
}

/// Render the wave plan as a Docker Bake JSON document with the same
/// structure as the HCL form.
pub fn render_json(
    stages: &[Stage],
    waves: &[Vec<String>],
    crossover: &BTreeSet<String>,
    config: &Config,
) -> Result<String> {
    let by_name: HashMap<&str, &Stage> = stages
        .iter()
        .map(|s| (s.stage_name.as_str(), s))
        .collect();

    let mut bake = BakeFile {
        target: BTreeMap::new(),
        group: BTreeMap::new(),
    };

    for wave in waves {
        for name in wave {
            let Some(stage) = by_name.get(name.as_str()) else {
                continue;
            };
            let is_crossover = crossover.contains(name.as_str());
            let directives = config.output_mode.directives();
            bake.target.insert(
                name.clone(),
                BakeTarget {
                    dockerfile: stage.file_path.display().to_string(),
                    target: format!("{}{name}", stage.registry_value()),
                    args: BTreeMap::from([(
                        "BASE_IMAGE".to_string(),
                        stage.base_image.clone(),
                    )]),
                    tags: is_crossover.then(|| vec![format!("{name}:{}", config.tag)]),
                    output: (is_crossover && !directives.is_empty())
                        .then(|| directives.iter().map(|d| d.to_string()).collect()),
                    cache_to: Vec::new(),
                    cache_from: Vec::new(),
                },
            );
        }
    }

    for (idx, wave) in waves.iter().enumerate() {
        bake.group.insert(
            format!("group{}", idx + 1),
            BakeGroup {
                targets: wave.clone(),
            },
        );
    }

    serde_json::to_string_pretty(&bake).context("failed to serialize bake plan")
}

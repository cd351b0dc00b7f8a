//! Docker Bake HCL rendering

use std::collections::{BTreeSet, HashMap};

use crate::config::Config;
use crate::model::Stage;

/// Render the wave plan as a Docker Bake HCL document.
///
/// One `target` block per stage (written once even if referenced again),
/// then one `group` block per wave. Tags and output directives appear only
/// on crossover targets, and the output line only when the output mode asks
/// for one.
pub fn render_hcl(
    stages: &[Stage],
    waves: &[Vec<String>],
    crossover: &BTreeSet<String>,
    config: &Config,
) -> String {
    let by_name: HashMap<&str, &Stage> = stages
        .iter()
        .map(|s| (s.stage_name.as_str(), s))
        .collect();

    let mut out = String::new();
    out.push_str("// Docker Bake HCL file generated automatically with prebake\n\n");

    let mut written: BTreeSet<&str> = BTreeSet::new();
    for wave in waves {
        for name in wave {
            let Some(stage) = by_name.get(name.as_str()) else {
                continue;
            };
            if !written.insert(name) {
                continue;
            }
            out.push_str(&format!("target \"{name}\" {{\n"));
            out.push_str(&format!(
                "  dockerfile = \"{}\"\n",
                stage.file_path.display()
            ));
            out.push_str(&format!(
                "  target     = \"{}{name}\"\n",
                stage.registry_value()
            ));
            out.push_str("  args = {\n");
            out.push_str(&format!("    BASE_IMAGE = \"{}\"\n", stage.base_image));
            out.push_str("  }\n");
            if crossover.contains(name.as_str()) {
                out.push_str(&format!("  tags = [\"{name}:{}\"]\n", config.tag));
                let directives = config.output_mode.directives();
                if !directives.is_empty() {
                    let list: Vec<String> =
                        directives.iter().map(|d| format!("\"{d}\"")).collect();
                    out.push_str(&format!("  output = [{}]\n", list.join(" ")));
                }
            }
            out.push_str("  cache-to = [ ]\n");
            out.push_str("  cache-from = [ ]\n");
            out.push_str("}\n\n");
        }
    }

    for (idx, wave) in waves.iter().enumerate() {
        let targets: Vec<String> = wave.iter().map(|n| format!("\"{n}\"")).collect();
        out.push_str(&format!("group \"group{}\" {{\n", idx + 1));
        out.push_str(&format!("  targets = [{}]\n", targets.join(", ")));
        out.push_str("}\n\n");
    }

    out
}

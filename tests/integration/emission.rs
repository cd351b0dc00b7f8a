//! Full-command runs that exercise plan emission

use std::fs;

use prebake::commands::bake;
use prebake::config::{OutputMode, PlanFormat};

use super::helpers::{config_for, tempdir, write_dockerfile};

fn crossover_fixture(root: &std::path::Path) {
    write_dockerfile(
        root,
        "x/Dockerfile",
        "FROM ubuntu:24.04 AS shared\nRUN true\n",
    );
    write_dockerfile(root, "y/Dockerfile", "FROM shared AS consumer\n");
}

#[test]
fn hcl_plan_written_to_outfile() {
    let dir = tempdir();
    crossover_fixture(dir.path());
    let config = config_for(dir.path(), PlanFormat::Hcl, 0);
    let outfile = config.outfile.clone();

    bake::execute(config).unwrap();

    let hcl = fs::read_to_string(outfile).unwrap();
    assert!(hcl.contains("target \"shared\" {"));
    assert!(hcl.contains("target \"consumer\" {"));
    assert!(hcl.contains("  tags = [\"shared:prebake\"]"));
    assert!(!hcl.contains("  tags = [\"consumer:prebake\"]"));
    assert!(hcl.contains("group \"group1\" {\n  targets = [\"shared\"]"));
    assert!(hcl.contains("group \"group2\" {\n  targets = [\"consumer\"]"));
    // Output mode 0: no output directives at all.
    assert!(!hcl.contains("output = ["));
}

#[test]
fn json_plan_written_to_outfile() {
    let dir = tempdir();
    crossover_fixture(dir.path());
    let mut config = config_for(dir.path(), PlanFormat::Json, 0);
    config.output_mode = OutputMode::Registry;
    let outfile = config.outfile.clone();

    bake::execute(config).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(outfile).unwrap()).unwrap();
    assert_eq!(value["target"]["shared"]["tags"][0], "shared:prebake");
    assert_eq!(value["target"]["shared"]["output"][0], "type=registry");
    assert!(value["target"]["consumer"].get("tags").is_none());
    assert_eq!(value["group"]["group1"]["targets"][0], "shared");
    assert_eq!(
        value["target"]["shared"]["args"]["BASE_IMAGE"],
        "ubuntu"
    );
}

#[test]
fn dockerfile_paths_carried_verbatim() {
    let dir = tempdir();
    crossover_fixture(dir.path());
    let config = config_for(dir.path(), PlanFormat::Json, 0);
    let outfile = config.outfile.clone();

    bake::execute(config).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(outfile).unwrap()).unwrap();
    let dockerfile = value["target"]["shared"]["dockerfile"].as_str().unwrap();
    assert!(dockerfile.ends_with("x/Dockerfile"));
    assert!(std::path::Path::new(dockerfile).exists());
}

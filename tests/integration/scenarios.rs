//! End-to-end planning scenarios over fixture Dockerfile trees

use super::helpers::{plan_tree, tempdir, write_dockerfile};

#[test]
fn linear_chain_builds_one_stage_per_wave() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "app/Dockerfile",
        "\
FROM fedora:43 AS a
RUN true

FROM a AS b
RUN true

FROM b AS c
RUN true
",
    );

    let plan = plan_tree(dir.path());
    assert_eq!(plan.wave_names(), vec![vec!["a"], vec!["b"], vec!["c"]]);
    assert!(plan.crossover.is_empty());
    assert_eq!(
        plan.unresolved.iter().collect::<Vec<_>>(),
        vec!["fedora:43"]
    );
}

#[test]
fn diamond_builds_middle_stages_together() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "app/Dockerfile",
        "\
FROM ubuntu:24.04 AS top
FROM top AS left
FROM top AS right
FROM left AS bot
COPY --from=right /out /out
",
    );

    let plan = plan_tree(dir.path());
    assert_eq!(plan.waves.len(), 3);
    assert_eq!(plan.waves[0], vec!["top"]);
    let mut middle = plan.waves[1].clone();
    middle.sort();
    assert_eq!(middle, vec!["left", "right"]);
    assert_eq!(plan.waves[2], vec!["bot"]);
    assert!(plan.crossover.is_empty());
}

#[test]
fn cross_file_reference_marks_crossover() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "x/Dockerfile",
        "FROM ubuntu:24.04 AS shared\nRUN true\n",
    );
    write_dockerfile(dir.path(), "y/Dockerfile", "FROM shared AS consumer\n");

    let plan = plan_tree(dir.path());
    assert!(plan.crossover.contains("shared"));
    assert_eq!(plan.crossover.len(), 1);
    assert_eq!(plan.wave_names(), vec![vec!["shared"], vec!["consumer"]]);
}

#[test]
fn tagged_local_base_is_normalized() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "base/Dockerfile",
        "FROM fedora:43 AS base\nRUN true\n",
    );
    write_dockerfile(
        dir.path(),
        "child/Dockerfile",
        "FROM base:prebake AS child\nRUN true\n",
    );

    let plan = plan_tree(dir.path());
    let child = plan.stage("child");
    assert!(child.all_deps().contains("base"));
    assert!(!child.all_deps().contains("base:prebake"));
    assert_eq!(plan.wave_names(), vec![vec!["base"], vec!["child"]]);
    // The tagged reference names a local stage; it must not be treated as
    // an external image.
    assert!(!plan.unresolved.contains("base:prebake"));
}

#[test]
fn tagged_local_copy_reference_is_normalized() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "base/Dockerfile",
        "FROM fedora:43 AS base\nRUN true\n",
    );
    write_dockerfile(
        dir.path(),
        "child/Dockerfile",
        "FROM alpine AS child\nCOPY --from=base:prebake /a /b\n",
    );

    let plan = plan_tree(dir.path());
    let child = plan.stage("child");
    assert!(child.declared_deps.contains("base"));
    assert!(!child.declared_deps.contains("base:prebake"));
    assert!(plan.crossover.contains("base"));
}

#[test]
fn external_base_stays_unresolved() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "solo/Dockerfile",
        "FROM python:3.12 AS onlyone\nRUN true\n",
    );

    let plan = plan_tree(dir.path());
    assert_eq!(
        plan.unresolved.iter().collect::<Vec<_>>(),
        vec!["python:3.12"]
    );
    assert_eq!(plan.wave_names(), vec![vec!["onlyone"]]);
}

#[test]
fn independent_leaves_share_one_wave() {
    let dir = tempdir();
    for i in 1..=5 {
        write_dockerfile(
            dir.path(),
            &format!("leaf{i}/Dockerfile"),
            &format!("FROM debian:13 AS leaf{i}\nRUN true\n"),
        );
    }

    let plan = plan_tree(dir.path());
    assert_eq!(plan.waves.len(), 1);
    assert_eq!(plan.waves[0].len(), 5);
}

#[test]
fn mount_directive_creates_dependency() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "app/Dockerfile",
        "\
FROM rust:1.80 AS deps
RUN cargo fetch

FROM rust:1.80 AS app
RUN --mount=type=cache,from=deps,target=/cache cargo build
",
    );

    let plan = plan_tree(dir.path());
    assert!(plan.stage("app").declared_deps.contains("deps"));
    assert_eq!(plan.wave_names(), vec![vec!["deps"], vec!["app"]]);
}

#[test]
fn pipeline_is_deterministic_across_runs() {
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "a/Dockerfile",
        "\
FROM debian:13 AS root
FROM root AS mid1
FROM root AS mid2
FROM mid1 AS top
COPY --from=mid2 /x /y
",
    );

    let first = plan_tree(dir.path());
    let second = plan_tree(dir.path());
    assert_eq!(first.waves, second.waves);
    assert_eq!(first.unresolved, second.unresolved);
    assert_eq!(first.crossover, second.crossover);
}

#[test]
fn playground_tree_plans_every_stage_once() {
    // A multi-directory corpus in the shape of the sample playground: one
    // shared bottom image reused by several tracks in other files.
    let dir = tempdir();
    write_dockerfile(
        dir.path(),
        "top/second_A/main/Dockerfile",
        "\
FROM fedora:43 AS bottom
RUN true

FROM bottom AS middle
RUN true
",
    );
    write_dockerfile(
        dir.path(),
        "top/second_A/third_A/Dockerfile",
        "FROM middle:prebake AS track_a\nRUN true\n",
    );
    write_dockerfile(
        dir.path(),
        "top/second_B/third_C/Dockerfile",
        "FROM middle:prebake AS track_c\nCOPY --from=bottom:prebake /etc/os-release /tmp/\n",
    );

    let plan = plan_tree(dir.path());

    // Every stage lands in exactly one wave.
    let mut all: Vec<&str> = plan
        .waves
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    all.sort();
    assert_eq!(all, vec!["bottom", "middle", "track_a", "track_c"]);

    // Cross-file reuse is detected for both referenced stages.
    assert!(plan.crossover.contains("middle"));
    assert!(plan.crossover.contains("bottom"));

    // Dependencies always land in earlier waves.
    let wave_of = |name: &str| {
        plan.waves
            .iter()
            .position(|w| w.iter().any(|n| n == name))
            .unwrap()
    };
    assert!(wave_of("bottom") < wave_of("middle"));
    assert!(wave_of("middle") < wave_of("track_a"));
    assert!(wave_of("middle") < wave_of("track_c"));
}

//! Console report rendering
//!
//! The run report is a banner-framed block: every line starts with a cyan
//! `##` gutter, with section text in white and problems in yellow/red.

use std::collections::BTreeSet;

use colored::Colorize;

use crate::model::Stage;

const FRAME: &str = "##################################################";

pub fn header() {
    println!("{}", FRAME.cyan());
    blank();
    blank();
}

pub fn footer() {
    blank();
    blank();
    println!("{}", FRAME.cyan());
}

pub fn divider() {
    blank();
    println!("{}", FRAME.cyan());
    blank();
}

pub fn blank() {
    println!("{}", "##".cyan());
}

pub fn title() {
    println!("{}", "##  PREBAKE".cyan());
    println!(
        "{}",
        "##  Get all your multistage docker needs done right".cyan()
    );
    blank();
}

/// A framed section heading.
pub fn section(text: &str) {
    blank();
    println!("{}   {}", "##".cyan(), text.white());
    blank();
}

pub fn info(text: &str) {
    println!("{}    {}", "##".cyan(), text.white().bold());
}

pub fn warning(text: &str) {
    println!(
        "{}  {}",
        "##".cyan(),
        format!("WARNING: {text}").yellow().bold()
    );
}

pub fn error_line(text: &str) {
    println!("{}  {}", "##".red(), format!("ERROR: {text}").red().bold());
}

/// One aligned summary line per stage: name padded to a fixed column, then
/// its full dependency set.
pub fn stage_line(stage: &Stage) -> String {
    let deps: Vec<String> = stage.all_deps().into_iter().collect();
    format!(
        "Stage: {:<40}Dependencies: [{}]",
        stage.stage_name,
        deps.join(", ")
    )
}

/// List the unresolved external images, if any.
pub fn unresolved_report(unresolved: &BTreeSet<String>) {
    if unresolved.is_empty() {
        return;
    }
    blank();
    println!("{}   {}", "##".cyan(), "Unresolved images --".white());
    blank();
    for name in unresolved {
        println!("{}    {}", "##".cyan(), name.yellow());
    }
    blank();
}

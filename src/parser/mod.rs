//! Build-file discovery, stage extraction, and crossover detection

mod crossover;
mod dockerfile;

pub use crossover::find_crossover_stages;
pub use dockerfile::{find_dockerfiles, parse_tree, scan_references};

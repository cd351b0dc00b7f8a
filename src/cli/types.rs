use std::path::PathBuf;

use clap::Parser;
use prebake::config::PlanFormat;

const HELP_TEMPLATE: &str = "
   ╷
   │  ┌─┐┬─┐┌─┐┌┐ ┌─┐┬┌─┌─┐
   │  ├─┘├┬┘├┤ ├┴┐├─┤├┴┐├┤
   ┴  ┴  ┴└─└─┘└─┘┴ ┴┴ ┴└─┘

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "prebake")]
#[command(about = "Map multi multi-stage Dockerfile dependencies into parallel build waves", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
pub struct Cli {
    /// Root directory to search for Dockerfiles (hint: your project root)
    #[arg(short = 'd', long)]
    pub directory: PathBuf,

    /// Output file for the generated bake plan
    #[arg(short = 'o', long, default_value = "docker")]
    pub outfile: PathBuf,

    /// Tag applied to crossover stages
    #[arg(short = 't', long, default_value = "prebake")]
    pub tag: String,

    /// Format of the emitted bake plan
    #[arg(long = "file-format", value_enum, default_value = "hcl")]
    pub file_format: PlanFormat,

    /// Per-target output directives: 0 = omit, 1 = registry, 2 = local, 3 = both
    #[arg(long, default_value_t = 0)]
    pub output: u8,

    /// Number of brute-force optimization attempts (0 disables)
    #[arg(long, default_value_t = 0)]
    pub optimize: usize,

    /// Worker threads for optimization; 0 = auto, always capped at cores - 1
    #[arg(long, default_value_t = 0)]
    pub cores: usize,

    /// Enable verbose progress output
    #[arg(short, long)]
    pub verbose: bool,
}

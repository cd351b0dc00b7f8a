mod cli;

use clap::Parser;
use cli::{dispatch, Cli};
use prebake::display;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = dispatch(cli) {
        display::error_line(&format!("{err:#}"));
        std::process::exit(1);
    }
}

/// RUST_LOG takes precedence; otherwise --verbose enables debug diagnostics.
fn init_tracing(verbose: bool) {
    let default = if verbose { "prebake=debug" } else { "prebake=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

use anyhow::Result;
use prebake::commands::bake;
use prebake::config::Config;

use super::types::Cli;

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::resolve(
        cli.directory,
        cli.outfile,
        cli.tag,
        cli.file_format,
        cli.output,
        cli.optimize,
        cli.cores,
        cli.verbose,
    )?;
    bake::execute(config)
}

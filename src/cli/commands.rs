use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::script;
use crate::taxonomy::Taxonomy;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run { script }) => _run(script),
        Some(Commands::Check { script }) => _check(script),
        None => Ok(()),
    }
}

#[instrument]
fn _run(script_path: &Path) -> CliResult<()> {
    debug!("script_path: {:?}", script_path);
    let source = fs::read_to_string(script_path)?;
    let ops = script::parse(&source)?;

    let mut taxonomy = Taxonomy::new();
    for block in script::execute(&mut taxonomy, &ops)? {
        let block = block.trim_end();
        if !block.is_empty() {
            output::info(block);
        }
    }
    Ok(())
}

#[instrument]
fn _check(script_path: &Path) -> CliResult<()> {
    debug!("script_path: {:?}", script_path);
    let source = fs::read_to_string(script_path)?;
    let ops = script::parse(&source)?;
    output::success(&format!(
        "{}: {} operations",
        script_path.display(),
        ops.len()
    ));
    Ok(())
}

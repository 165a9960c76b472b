//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

/// Category hierarchy engine: forest registry, subtree height metrics, and cascading removal
#[derive(Parser, Debug)]
#[command(name = "rstax")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d: info, -dd: debug, -ddd: trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Print author and version info
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a taxonomy script and print each operation's output
    Run {
        /// Script file, one operation per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Parse a taxonomy script without executing it
    Check {
        /// Script file, one operation per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },
}

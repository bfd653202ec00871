use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod head;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the first lines of one or more files.
    Head(HeadArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Head(args) => head::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct HeadArgs {
    /// Files to read (`-` for standard input). Several files are read
    /// round-robin, one line each per round.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Lines to read from each file.
    #[arg(long, short = 'n', default_value = "5")]
    pub count: usize,
    /// Bytes requested per read call.
    #[arg(long, env = "FDLINE_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

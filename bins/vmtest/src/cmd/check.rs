mod runner;

pub use runner::{find_all_json_tests, run, DryRunExecutor, Error};

use clap::Parser;
use std::path::PathBuf;

/// `check` subcommand
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Path to folder or file containing the scenarios
    ///
    /// If multiple paths are specified they will be checked in sequence.
    ///
    /// Folders will be searched recursively for files with the extension `.json`.
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,
    /// Check files in a single thread
    #[arg(short = 's', long)]
    single_thread: bool,
    /// Print one JSON outcome per file
    #[arg(long)]
    json: bool,
    /// Keep going after a failing file
    #[arg(long, alias = "no-fail-fast")]
    keep_going: bool,
}

impl Cmd {
    /// Runs `check` command.
    pub fn run(&self) -> Result<(), Error> {
        for path in &self.paths {
            if !path.exists() {
                return Err(Error::InvalidPath(path.clone()));
            }

            let files = find_all_json_tests(path);
            if files.is_empty() {
                return Err(Error::NoJsonFiles(path.clone()));
            }

            if !self.json {
                println!("\nChecking scenarios in {}...", path.display());
            }
            run(files, self.single_thread, self.json, self.keep_going)?;
        }
        Ok(())
    }
}

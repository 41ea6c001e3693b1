//! Subcommands.
pub mod check;

use clap::Parser;

/// `vmtest` subcommands.
#[derive(Parser, Debug)]
#[command(infer_subcommands = true)]
pub enum MainCmd {
    /// Decode scenario files and walk their steps
    Check(check::Cmd),
}

/// Error returned by a subcommand.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `check` failed.
    #[error(transparent)]
    Check(#[from] check::Error),
}

impl MainCmd {
    /// Runs the selected subcommand.
    pub fn run(&self) -> Result<(), Error> {
        match self {
            Self::Check(cmd) => cmd.run().map_err(Into::into),
        }
    }
}

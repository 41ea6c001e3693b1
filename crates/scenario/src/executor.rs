use crate::{DefaultFileResolver, FileResolver, Parser, RunError, Scenario};
use std::{fs, path::Path};
use tracing::{info, warn};

/// Runs a decoded scenario against a VM.
pub trait ScenarioExecutor {
    /// Failure reported by the executor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes the steps of `scenario` in order and checks their outcome.
    ///
    /// `file_resolver` reads files referenced by the scenario, relative to the
    /// scenario file.
    fn execute_scenario(
        &mut self,
        scenario: &Scenario,
        file_resolver: &dyn FileResolver,
    ) -> Result<(), Self::Error>;
}

/// Reads scenario files and hands them to an executor.
#[derive(Debug)]
pub struct ScenarioRunner<E, R = DefaultFileResolver> {
    /// Executor the scenarios are run on.
    pub executor: E,
    /// Decoder for scenario files.
    pub parser: Parser<R>,
}

impl<E: ScenarioExecutor, R: FileResolver> ScenarioRunner<E, R> {
    /// Creates a runner.
    pub fn new(executor: E, file_resolver: R) -> Self {
        Self {
            executor,
            parser: Parser::new(file_resolver),
        }
    }

    /// Decodes the scenario at `path` and executes it.
    pub fn run_scenario_file(&mut self, path: &Path) -> Result<(), RunError<E::Error>> {
        self.parser.file_resolver.set_context(path);

        let json = fs::read(path).map_err(|source| RunError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = self
            .parser
            .parse_scenario_file(&json)
            .map_err(|source| RunError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            name = ?scenario.name,
            steps = scenario.steps.len(),
            "running scenario"
        );
        self.executor
            .execute_scenario(&scenario, &self.parser.file_resolver)
            .map_err(|source| {
                warn!(path = %path.display(), %source, "scenario failed");
                RunError::Execution {
                    path: path.to_path_buf(),
                    source,
                }
            })
    }
}

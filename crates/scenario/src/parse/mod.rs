//! Scenario document decoder.
//!
//! Every map in a scenario document has a fixed set of keys. Any key outside
//! that set is an error, so typos in fixtures are caught instead of being
//! silently ignored.
mod account;
mod step;
mod tx;
mod value;

use self::value::{parse_bool, parse_map, parse_string};
use crate::{error::WithContext, DecodeError, FileResolver, NoFileResolver, Scenario};
use serde_json::Value;
use tracing::debug;

/// Decodes scenario documents.
#[derive(Clone, Debug, Default)]
pub struct Parser<R = NoFileResolver> {
    /// Resolves `file:` references in contract code.
    pub file_resolver: R,
}

impl<R: FileResolver> Parser<R> {
    /// Creates a parser that reads referenced files through `file_resolver`.
    pub fn new(file_resolver: R) -> Self {
        Self { file_resolver }
    }

    /// Decodes a scenario from JSON text.
    pub fn parse_scenario_file(&self, json: &[u8]) -> Result<Scenario, DecodeError> {
        let tree: Value = serde_json::from_slice(json)?;
        self.parse_scenario(&tree)
    }

    /// Decodes a scenario from a JSON tree.
    ///
    /// `checkGas` is `true` unless the document sets it.
    pub fn parse_scenario(&self, tree: &Value) -> Result<Scenario, DecodeError> {
        let top_map = parse_map(tree, "scenario top level object")?;

        let mut scenario = Scenario::default();
        for (key, value) in top_map {
            match key.as_str() {
                "name" => {
                    scenario.name = Some(parse_string(value).context("bad scenario name")?);
                }
                "comment" => {
                    scenario.comment = Some(parse_string(value).context("bad scenario comment")?);
                }
                "checkGas" => {
                    scenario.check_gas = parse_bool(value).context("bad scenario checkGas flag")?;
                }
                "steps" => {
                    scenario.steps = self.parse_steps(value).context("error processing steps")?;
                }
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "scenario",
                        key: key.clone(),
                    })
                }
            }
        }

        debug!(
            name = ?scenario.name,
            steps = scenario.steps.len(),
            check_gas = scenario.check_gas,
            "decoded scenario"
        );
        Ok(scenario)
    }
}

/// Decodes a scenario from a JSON tree without resolving file references.
pub fn decode_scenario(tree: &Value) -> Result<Scenario, DecodeError> {
    Parser::new(NoFileResolver).parse_scenario(tree)
}

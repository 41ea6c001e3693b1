//! Scenario and block test fixtures for VM testing.
//!
//! Scenario documents are decoded into [`Scenario`] with [`Parser`] and run
//! through a [`ScenarioExecutor`]. Block tests ([`Test`]) are written back to
//! JSON with the functions in [`write`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod account;
mod check;
mod error;
mod executor;
mod parse;
mod resolver;
mod result;
mod scenario;
mod step;
mod test;
mod transaction;
pub mod value;
pub mod write;

pub use account::*;
pub use check::*;
pub use error::{DecodeError, RunError, ValueError};
pub use executor::*;
pub use parse::{decode_scenario, Parser};
pub use resolver::*;
pub use result::*;
pub use scenario::*;
pub use step::*;
pub use test::*;
pub use transaction::*;
pub use value::{int_to_string, JsonBigInt, JsonBytes, JsonU64};

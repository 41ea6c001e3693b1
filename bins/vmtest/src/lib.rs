//! Command line runner for VM scenario fixtures.
pub mod cmd;

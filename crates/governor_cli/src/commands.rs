//! Command modules for the governor CLI.
//!
//! - `run_cmd`: the governance run over every repository of a workspace

pub mod run_cmd;

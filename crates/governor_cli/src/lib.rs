//! Governor CLI library exports for integration testing.
//!
//! This module exposes the command implementations and settings resolution.

pub mod commands;
pub mod config;
pub mod errors;

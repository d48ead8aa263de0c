//! papermine CLI library
//!
//! Command definitions, configuration loading and error types for the
//! `papermine` binary.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;

pub use cli::{CleanArgs, Cli, Command, ExtractArgs};
pub use config::Config;
pub use error::{CliError, Result};

//! RipSync library
//!
//! Core functionality for the RipSync CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod launch;
pub mod project;
pub mod registry;
pub mod resolver;
pub mod runner;
pub mod scaffold;
pub mod setup;
pub mod utils;

pub use cli::Cli;
pub use error::{Error, Result};
pub use registry::Registry;

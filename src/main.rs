//! RipSync - P2P file sharing CLI
//!
//! Scaffolds, registers, launches, and tears down local peer-to-peer
//! file-sharing servers built from an embedded template.
//!
//! # Features
//! - One-command scaffold with TLS certificates and env files filled in
//! - Per-user registry so servers run by name from anywhere
//! - Fail-fast build/launch pipeline over the external toolchain
//! - Interactive menu and onboarding for first-time users

use colored::Colorize;

mod cli;
mod config;
mod error;
mod launch;
mod project;
mod registry;
mod resolver;
mod runner;
mod scaffold;
mod setup;
mod utils;

#[tokio::main]
async fn main() {
    match cli::run().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{} {err:#}", "✗".red().bold());
            std::process::exit(1);
        }
    }
}

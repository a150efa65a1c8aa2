//! Build command implementation

use anyhow::{Context, Result};
use clap::Args;

use crate::runner::ProcessRunner;
use crate::scaffold::Scaffolder;
use crate::setup;

/// Scaffold a new server
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Directory name for the new server
    pub name: String,
}

impl BuildCommand {
    pub async fn execute(&self, runner: &dyn ProcessRunner) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
        Scaffolder::new(cwd, runner)
            .create(&self.name, setup::prompt_network_config)
            .await?;
        Ok(())
    }
}

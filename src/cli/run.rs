//! Run a server by name

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Paths;
use crate::launch::Launcher;
use crate::resolver;
use crate::runner::ProcessRunner;

/// Run a server by name from anywhere
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Name of a registered or nearby server
    pub name: String,
}

impl RunCommand {
    pub async fn execute(&self, paths: &Paths, runner: &dyn ProcessRunner) -> Result<i32> {
        let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
        let project = resolver::resolve(&cwd, &paths.registry_root, &self.name)?;
        Ok(Launcher::new(project, runner).launch().await?)
    }
}

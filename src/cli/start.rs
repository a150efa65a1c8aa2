//! Start the server in the current directory

use anyhow::{Context, Result};

use crate::error::Error;
use crate::launch::Launcher;
use crate::project;
use crate::runner::ProcessRunner;

/// Launch the project the user is standing in; the directory must carry the
/// project marker
pub async fn execute(runner: &dyn ProcessRunner) -> Result<i32> {
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    if !project::is_project(&cwd) {
        return Err(Error::missing(project::ENTRY_POINT, cwd).into());
    }
    Ok(Launcher::new(cwd, runner).launch().await?)
}

//! Project scaffolding
//!
//! `ripsync build <name>` unpacks the embedded template into `./<name>`,
//! installs its root packages, then runs the setup pipeline. Network
//! settings are collected through a deferred closure so the user is not
//! interviewed before the install has a chance to fail.

mod template;

pub use template::unpack;

use std::path::PathBuf;

use tracing::info;

use crate::error::{Error, Result};
use crate::runner::{Cmd, ProcessRunner};
use crate::setup::{self, NetworkConfig};

/// Creates new projects under a working directory
pub struct Scaffolder<'a> {
    cwd: PathBuf,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Scaffolder<'a> {
    pub fn new(cwd: impl Into<PathBuf>, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            cwd: cwd.into(),
            runner,
        }
    }

    /// Scaffold `./<name>`: unpack, install, set up.
    ///
    /// An occupied destination aborts before anything is written. A failure
    /// after unpacking leaves the partial directory for the user to inspect.
    pub async fn create<F>(&self, name: &str, collect_net: F) -> Result<()>
    where
        F: FnOnce() -> Result<NetworkConfig>,
    {
        let dest = self.cwd.join(name);
        if dest.exists() {
            return Err(Error::AlreadyExists {
                name: name.to_string(),
                path: dest,
            });
        }

        unpack(&dest)?;
        info!("unpacked template into {}", dest.display());
        println!("📁 Created folder in ./{name}");

        let install = Cmd::new("npm").args(["install"]).cwd(&dest);
        if !self.runner.run(&install).await.success() {
            return Err(Error::install("project dependencies"));
        }

        let net = collect_net()?;
        setup::run(&dest, &net, self.runner, setup::confirm_mkcert_install).await?;

        println!("\n✅ Server created at ./{name}");
        println!("👉 cd {name} && ripsync init");
        Ok(())
    }
}

//! Register the current directory into the registry

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::Paths;
use crate::error::Error;
use crate::registry::Registry;

/// Move the current working directory into the registry under its own base
/// name, making it runnable from anywhere with `ripsync run <name>`
pub fn execute(paths: &Paths) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let name = match cwd.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.to_string(),
        None => bail!("cannot register the filesystem root"),
    };

    let registry = Registry::new(&paths.registry_root);
    if registry.exists(&name) {
        let path = paths.registry_root.join(&name);
        return Err(Error::AlreadyRegistered { name, path }.into());
    }

    let dest = registry.register(&cwd, &name)?;
    info!("registered {} from {}", name, cwd.display());

    println!("✅ Registered \"{name}\" at: {}", dest.display());
    println!("👉 You can now run it from anywhere with: ripsync run {name}");
    Ok(())
}

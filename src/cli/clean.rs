//! Delete every registered server

use anyhow::Result;
use tracing::info;

use crate::config::Paths;
use crate::registry::Registry;

/// Remove the whole registry root; absence is not an error
pub fn execute(paths: &Paths) -> Result<()> {
    let registry = Registry::new(&paths.registry_root);
    if registry.remove_all()? {
        info!("removed {}", paths.registry_root.display());
        println!("🧹 Cleaned all servers.");
    } else {
        println!("Nothing to clean.");
    }
    Ok(())
}

//! List registered servers

use anyhow::Result;

use crate::config::Paths;
use crate::registry::Registry;

/// Print the registry contents; an absent or empty registry is reported, not
/// an error
pub fn execute(paths: &Paths) -> Result<()> {
    let registry = Registry::new(&paths.registry_root);
    match registry.list()? {
        None => println!("📂 {} NOT found.", paths.registry_root.display()),
        Some(names) if names.is_empty() => println!("📂 No valid servers found."),
        Some(names) => {
            println!("📁 Available servers:");
            for name in names {
                println!("- {name}");
            }
        }
    }
    Ok(())
}

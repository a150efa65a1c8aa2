//! Embedded project template
//!
//! The whole scaffolded project ships inside the binary, so `ripsync build`
//! works offline and never depends on an install location.

use std::fs;
use std::path::Path;

use rust_embed::RustEmbed;
use tracing::debug;

use crate::error::Result;

#[derive(RustEmbed)]
#[folder = "template/"]
struct TemplateAssets;

/// Write every embedded template file under `dest`, creating parent
/// directories as needed
pub fn unpack(dest: &Path) -> Result<()> {
    for file in TemplateAssets::iter() {
        if let Some(content) = TemplateAssets::get(&file) {
            let target = dest.join(file.as_ref());
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content.data.as_ref())?;
            debug!("wrote {}", target.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::project;

    #[test]
    fn unpack_produces_a_recognizable_project() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("chat");

        unpack(&dest).unwrap();

        assert!(project::is_project(&dest));
        assert!(dest.join("package.json").is_file());
        assert!(dest.join(project::BACKEND_DIR).join("Cargo.toml").is_file());
        assert!(dest
            .join(project::FRONTEND_DIR)
            .join("package.json")
            .is_file());
    }
}

//! Server name resolution
//!
//! Maps a server name to a project directory by probing a fixed list of
//! candidate locations. Local directories shadow the registry, so a freshly
//! scaffolded project runs in place even when a registered server shares
//! its name.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::project;

/// Locates projects by name, relative to a working directory
#[derive(Debug, Clone)]
pub struct Resolver {
    cwd: PathBuf,
    registry_root: PathBuf,
}

impl Resolver {
    pub fn new(cwd: impl Into<PathBuf>, registry_root: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            registry_root: registry_root.into(),
        }
    }

    /// Find the project directory for `name`.
    ///
    /// Candidates are probed in order: `./name`, the parent directory, the
    /// grandparent directory, then the registry entry. The first candidate
    /// containing a project marker wins.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        for candidate in self.candidates(name) {
            if project::is_project(&candidate) {
                debug!("resolved \"{name}\" to {}", candidate.display());
                return Ok(candidate);
            }
        }
        Err(Error::NotFound {
            name: name.to_string(),
        })
    }

    /// Candidate directories in precedence order.
    ///
    /// The parent and grandparent candidates cover running from inside a
    /// project's subdirectories; they drop out near the filesystem root.
    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let mut candidates = vec![self.cwd.join(name)];
        if let Some(parent) = self.cwd.parent() {
            candidates.push(parent.to_path_buf());
            if let Some(grandparent) = parent.parent() {
                candidates.push(grandparent.to_path_buf());
            }
        }
        candidates.push(self.registry_root.join(name));
        candidates
    }
}

/// Probe candidates for `name` from `cwd`
pub fn resolve(cwd: &Path, registry_root: &Path, name: &str) -> Result<PathBuf> {
    Resolver::new(cwd, registry_root).resolve(name)
}

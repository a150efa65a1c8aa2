//! The per-user server registry
//!
//! Registered servers live as plain directories under `~/ripsync-servers`,
//! one per server, keyed by directory name. Nothing else is recorded; the
//! directory tree is the registry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::project;
use crate::utils::copy_tree;

/// Build artifacts that never follow a project into the registry
const EXCLUDED_DIRS: &[&str] = &["node_modules", "target"];

/// Handle on the registry root directory
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Names of all registered servers, sorted.
    ///
    /// `None` means the registry directory itself does not exist, which the
    /// caller reports differently from an existing-but-empty registry.
    /// Entries without a project marker are skipped rather than reported.
    pub fn list(&self) -> io::Result<Option<Vec<String>>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !project::is_project(&entry.path()) {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(Some(names))
    }

    /// True when a directory named `name` exists under the registry root
    pub fn exists(&self, name: &str) -> bool {
        self.root.join(name).is_dir()
    }

    /// Delete the registry root and everything in it; a no-op when absent.
    ///
    /// Returns whether anything was there to delete.
    pub fn remove_all(&self) -> io::Result<bool> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Move the project at `source` into the registry as `name`.
    ///
    /// The tree is copied without build artifacts, and `source` is deleted
    /// only after the whole copy has landed. A name collision leaves both
    /// the registry and `source` untouched, and a `source` at or above the
    /// registry root is refused before anything is written.
    pub fn register(&self, source: &Path, name: &str) -> Result<PathBuf> {
        let dest = self.root.join(name);
        // A destination inside the source would make the copy descend into
        // its own writes
        if dest.starts_with(source) {
            return Err(Error::MoveIntoSelf {
                src: source.to_path_buf(),
                dest,
            });
        }
        if dest.exists() {
            return Err(Error::NameCollision {
                name: name.to_string(),
                path: dest,
            });
        }

        fs::create_dir_all(&self.root)?;
        debug!("copying {} -> {}", source.display(), dest.display());
        copy_tree(source, &dest, EXCLUDED_DIRS)?;
        fs::remove_dir_all(source)?;

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::project::ENTRY_POINT;

    fn make_project(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ENTRY_POINT), "[server]\n").unwrap();
        dir
    }

    #[test]
    fn list_reports_absent_registry_as_none() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::new(dir.path().join("ripsync-servers"));
        assert_eq!(registry.list().unwrap(), None);
    }

    #[test]
    fn list_skips_directories_without_a_marker() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::new(dir.path());
        make_project(dir.path(), "beta");
        make_project(dir.path(), "alpha");
        fs::create_dir_all(dir.path().join("scratch")).unwrap();

        let names = registry.list().unwrap().unwrap();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn list_reports_empty_registry_as_empty() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::new(dir.path());
        assert_eq!(registry.list().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn register_moves_the_tree_and_strips_artifacts() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::new(dir.path().join("ripsync-servers"));
        let source = make_project(dir.path(), "chat");
        fs::create_dir_all(source.join("backend/src")).unwrap();
        fs::write(source.join("backend/src/main.rs"), "fn main() {}").unwrap();
        fs::create_dir_all(source.join("node_modules/express")).unwrap();
        fs::create_dir_all(source.join("backend/target/debug")).unwrap();

        let dest = registry.register(&source, "chat").unwrap();

        assert!(!source.exists());
        assert!(dest.join(ENTRY_POINT).is_file());
        assert!(dest.join("backend/src/main.rs").is_file());
        assert!(!dest.join("node_modules").exists());
        assert!(!dest.join("backend/target").exists());
    }

    #[test]
    fn register_rejects_name_collisions_and_keeps_source() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("ripsync-servers");
        let registry = Registry::new(&root);
        make_project(&root, "chat");
        let source = make_project(dir.path(), "chat");
        fs::write(source.join("notes.txt"), "keep me").unwrap();

        let err = registry.register(&source, "chat").unwrap_err();

        assert!(matches!(err, Error::NameCollision { .. }));
        assert!(source.join("notes.txt").is_file());
    }

    #[test]
    fn register_from_the_registry_root_is_refused() {
        let dir = TempDir::new().unwrap();
        let root = make_project(dir.path(), "ripsync-servers");
        let registry = Registry::new(&root);

        let err = registry.register(&root, "ripsync-servers").unwrap_err();

        assert!(matches!(err, Error::MoveIntoSelf { .. }));
        // no copy was started inside the root
        assert!(!root.join("ripsync-servers").exists());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 1);
        assert!(root.join(ENTRY_POINT).is_file());
    }

    #[test]
    fn register_an_ancestor_of_the_registry_is_refused() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let root = home.join("ripsync-servers");
        let registry = Registry::new(&root);
        make_project(&root, "chat");
        fs::write(home.join("notes.txt"), "keep me").unwrap();

        let err = registry.register(&home, "home").unwrap_err();

        assert!(matches!(err, Error::MoveIntoSelf { .. }));
        assert!(!root.join("home").exists());
        assert!(home.join("notes.txt").is_file());
        assert!(root.join("chat").join(ENTRY_POINT).is_file());
    }

    #[test]
    fn remove_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("ripsync-servers");
        let registry = Registry::new(&root);
        make_project(&root, "chat");

        assert!(registry.remove_all().unwrap());
        assert!(!root.exists());
        assert!(!registry.remove_all().unwrap());
    }

    #[test]
    fn exists_checks_directory_presence_only() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::new(dir.path());
        fs::create_dir_all(dir.path().join("bare")).unwrap();

        assert!(registry.exists("bare"));
        assert!(!registry.exists("missing"));
    }
}

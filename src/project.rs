//! Project layout conventions
//!
//! A directory is a RipSync server project iff it contains the entry-point
//! file directly inside it. That is the whole contract: the file's contents
//! are never parsed or validated by the registry or the resolver.

use std::path::Path;

/// File whose presence marks a directory as a runnable project
pub const ENTRY_POINT: &str = "ripsync.toml";

/// Backend component directory inside a project
pub const BACKEND_DIR: &str = "backend";

/// Front-end component directory inside a project
pub const FRONTEND_DIR: &str = "p2p-frontend-setup";

/// Check whether `dir` holds the entry-point file
pub fn is_project(dir: &Path) -> bool {
    dir.join(ENTRY_POINT).is_file()
}

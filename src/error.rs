//! Error types for the RipSync lifecycle and pipelines

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Lifecycle and pipeline error taxonomy.
///
/// Every variant is terminal for the operation that raised it: pipelines are
/// fail-fast and never retry, merge, or roll back partial state.
#[derive(Error, Debug)]
pub enum Error {
    /// Scaffold destination already present
    #[error("server \"{name}\" already exists at {}", path.display())]
    AlreadyExists { name: String, path: PathBuf },

    /// Current directory's project already registered under this name
    #[error("a server named \"{name}\" is already registered at {}", path.display())]
    AlreadyRegistered { name: String, path: PathBuf },

    /// Registry destination occupied
    #[error("registry already contains \"{name}\" at {}", path.display())]
    NameCollision { name: String, path: PathBuf },

    /// Registration destination lies inside the source tree
    #[error("cannot move {} to a subdirectory of itself, {}", src.display(), dest.display())]
    MoveIntoSelf { src: PathBuf, dest: PathBuf },

    /// No candidate location contained the entry point
    #[error("could not find a server named \"{name}\"")]
    NotFound { name: String },

    /// Required compiler toolchain unavailable
    #[error("{tool} is not installed or not in PATH. Install Rust from https://rustup.rs")]
    ToolchainMissing { tool: String },

    /// Structural precondition missing from the project tree
    #[error("{what} not found in {}", dir.display())]
    MissingComponent { what: String, dir: PathBuf },

    /// Dependency installation reported non-zero exit or failed to spawn
    #[error("failed to install {what}")]
    InstallFailed { what: String },

    /// Backend compilation reported non-zero exit or failed to spawn
    #[error("backend build failed")]
    BuildFailed,

    /// Environment setup pipeline failed
    #[error("setup failed: {reason}")]
    SetupFailed { reason: String },

    /// The launch supervisor could not be spawned
    #[error("failed to start servers")]
    LaunchFailed,

    /// First-run marker could not be persisted; logged, never fatal
    #[error("Failed to save config file: {0}")]
    ConfigWriteFailed(#[source] std::io::Error),

    /// Interactive prompt could not be completed
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Filesystem failure during a registry or scaffold operation
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a setup failure with a human-readable reason
    pub fn setup(reason: impl Into<String>) -> Self {
        Self::SetupFailed {
            reason: reason.into(),
        }
    }

    /// Create a missing-component error
    pub fn missing(what: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self::MissingComponent {
            what: what.into(),
            dir: dir.into(),
        }
    }

    /// Create an install failure naming what was being installed
    pub fn install(what: impl Into<String>) -> Self {
        Self::InstallFailed { what: what.into() }
    }
}

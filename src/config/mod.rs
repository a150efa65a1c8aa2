//! Per-user paths and the first-run marker
//!
//! RipSync keeps two pieces of per-user state: the registry of installed
//! servers under the home directory, and a small JSON config file that
//! records whether the CLI has been run before. Both locations are resolved
//! once at startup and threaded through the command handlers, so tests can
//! point them at temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Directory name of the per-user registry, created under the home directory
pub const REGISTRY_DIR: &str = "ripsync-servers";

/// Directory name of the config dir, created under the platform config root
pub const CONFIG_DIR: &str = "ripsync";

const CONFIG_FILE: &str = "config.json";

/// Resolved per-user locations
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root of the server registry, `~/ripsync-servers`
    pub registry_root: PathBuf,

    /// Config directory, `~/.config/ripsync` or the platform equivalent
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the standard per-user locations.
    ///
    /// Falls back to the current directory when the platform reports no home
    /// or config directory; that only happens in stripped-down containers,
    /// and a relative registry still works there.
    pub fn from_system() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let config_root = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
        Self {
            registry_root: home.join(REGISTRY_DIR),
            config_dir: config_root.join(CONFIG_DIR),
        }
    }

    /// Location of the JSON config file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

/// On-disk shape of the config file
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(rename = "firstRun")]
    first_run: bool,
}

/// Whether this invocation is the user's first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstRun {
    Yes,
    No,
}

impl FirstRun {
    /// Read the marker from disk.
    ///
    /// A missing or unreadable config file means first run; corruption never
    /// aborts the CLI, it only re-triggers the welcome flow.
    pub fn load(paths: &Paths) -> Self {
        match read_marker(&paths.config_file()) {
            Ok(false) => Self::No,
            Ok(true) => Self::Yes,
            Err(err) => {
                debug!("no usable config file, treating as first run: {err}");
                Self::Yes
            }
        }
    }

    /// True on the user's first invocation
    pub fn is_first(self) -> bool {
        self == Self::Yes
    }
}

fn read_marker(path: &Path) -> std::io::Result<bool> {
    let content = fs::read_to_string(path)?;
    let config: ConfigFile = serde_json::from_str(&content).map_err(std::io::Error::other)?;
    Ok(config.first_run)
}

/// Record that the welcome flow has been shown, so later invocations skip it.
///
/// Failure to persist is logged and swallowed; the worst case is seeing the
/// welcome screen again.
pub fn mark_as_run(paths: &Paths) {
    if let Err(err) = write_marker(paths) {
        warn!("{}", crate::error::Error::ConfigWriteFailed(err));
    }
}

fn write_marker(paths: &Paths) -> std::io::Result<()> {
    fs::create_dir_all(&paths.config_dir)?;
    let config = ConfigFile { first_run: false };
    let json = serde_json::to_string_pretty(&config).map_err(std::io::Error::other)?;
    fs::write(paths.config_file(), json)
}

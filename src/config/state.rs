// Application state module
// Immutable per-server state shared by every connection task

use std::io;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Canonical directory files are served from
    pub root: PathBuf,
    pub index_files: Vec<String>,
    pub access_log: bool,
    /// Value of the `Server` response header
    pub server_name: String,
}

impl AppState {
    /// Build state from configuration, resolving and canonicalizing the root directory
    pub fn new(config: &Config) -> io::Result<Self> {
        let root = resolve_root(config.files.root.as_deref())?;
        Ok(Self::with_root(root, config))
    }

    /// Build state around an already resolved root
    pub fn with_root(root: PathBuf, config: &Config) -> Self {
        Self {
            root,
            index_files: config.files.index_files.clone(),
            access_log: config.logging.access_log,
            server_name: format!("devserve/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Resolve the directory to serve.
///
/// An explicit root wins; otherwise the directory containing the running
/// executable is used, so requests resolve the same way wherever the process
/// was started from.
pub fn resolve_root(explicit: Option<&Path>) -> io::Result<PathBuf> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let exe = std::env::current_exe()?;
            exe.parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))?
        }
    };
    root.canonicalize()
}

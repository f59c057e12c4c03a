//! Post-install patcher
//!
//! Removes files known to conflict with freshly installed content. Runs
//! after every full install, fresh or reinstall; the delta update path skips
//! it because updates never re-land the offending files.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{InstallerError, Result};
use crate::lifecycle::PostInstallPatcher;

/// Paths relative to the target directory that must not survive an install.
/// Shipped in older content archives; they shadow the platform binaries on
/// current builds.
const BLACKLIST: &[&str] = &[
    "tf2classic/bin/client.dylib",
    "tf2classic/bin/server.dylib",
    "tf2classic/bin/libtier0_srv.so",
    "tf2classic/maps/graphs",
];

/// Removes blacklisted files and stale caches after content placement
pub struct BlacklistPatcher;

impl BlacklistPatcher {
    pub fn new() -> Self {
        Self
    }
}

impl PostInstallPatcher for BlacklistPatcher {
    fn apply(&self, target: &Path) -> Result<()> {
        for entry in BLACKLIST {
            let path = target.join(entry);
            let outcome = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else if path.exists() {
                fs::remove_file(&path)
            } else {
                continue;
            };
            outcome.map_err(|e| InstallerError::PatchFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        remove_stale_caches(target)
    }
}

/// Sweep compiled caches left over from a previous version; the engine
/// rebuilds them on first launch
fn remove_stale_caches(target: &Path) -> Result<()> {
    let root = target.join("tf2classic");
    if !root.is_dir() {
        return Ok(());
    }

    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some("cache") {
            fs::remove_file(entry.path()).map_err(|e| InstallerError::PatchFailed {
                path: entry.path().display().to_string(),
                reason: e.to_string(),
            })?;
        }
    }
    Ok(())
}

//! Version resolution
//!
//! Reads and writes the locally persisted version record, fetches the remote
//! version manifest, and compares the two into an update decision.
//!
//! The manifest is an ordered list, oldest first. Comparison policy: a local
//! version exactly one release behind the newest takes the delta update path;
//! anything further behind, or a version the manifest no longer lists, gets a
//! full reinstall.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{InstallerError, Result};
use crate::lifecycle::{RemoteVersions, UpdateDecision};

/// Relative path of the local version record beneath the target directory
pub const LOCAL_VERSION_FILE: &str = "tf2classic/rev.txt";

/// How many releases behind the newest still qualifies for a delta update
pub const REINSTALL_THRESHOLD: usize = 1;

const DEFAULT_VERSION_URL: &str = "https://versions.tf2classic.com/versions.json";
const VERSION_URL_ENV: &str = "TF2C_VERSION_URL";
const USER_AGENT: &str = concat!("tf2c-installer/", env!("CARGO_PKG_VERSION"));

/// Read the locally recorded version identifier, if any
pub fn read_local_version(target: &Path) -> Option<String> {
    let raw = fs::read_to_string(target.join(LOCAL_VERSION_FILE)).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Record the installed version identifier; called after every successful
/// update so the next run compares against the right baseline
pub fn write_local_version(target: &Path, version: &str) -> Result<()> {
    let path = target.join(LOCAL_VERSION_FILE);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, format!("{version}\n")).map_err(|e| InstallerError::Io {
        message: format!("failed to write {}: {e}", path.display()),
    })
}

/// Compare the local version against the remote manifest.
///
/// `manifest` is ordered oldest to newest. An empty manifest, which the
/// fetcher rejects before it gets here, degrades to a reinstall rather than
/// a panic.
pub fn compare(local: Option<&str>, manifest: &[String]) -> UpdateDecision {
    let Some(newest_idx) = manifest.len().checked_sub(1) else {
        return UpdateDecision::Reinstall;
    };
    let Some(local) = local else {
        return UpdateDecision::Reinstall;
    };
    match manifest.iter().position(|v| v == local) {
        None => UpdateDecision::Reinstall,
        Some(idx) if idx == newest_idx => UpdateDecision::UpToDate,
        Some(idx) if newest_idx - idx > REINSTALL_THRESHOLD => UpdateDecision::Reinstall,
        Some(_) => UpdateDecision::Update,
    }
}

#[derive(Debug, Deserialize)]
struct VersionManifest {
    versions: Vec<String>,
}

/// Fetches the version manifest over HTTP
pub struct HttpRemoteVersions;

impl HttpRemoteVersions {
    pub fn new() -> Self {
        Self
    }

    fn manifest_url(&self) -> String {
        std::env::var(VERSION_URL_ENV).unwrap_or_else(|_| DEFAULT_VERSION_URL.to_string())
    }
}

impl RemoteVersions for HttpRemoteVersions {
    fn fetch_manifest(&self) -> Result<Vec<String>> {
        let url = self.manifest_url();
        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| InstallerError::VersionFetchFailed {
                reason: format!("request to {url} failed: {e}"),
            })?;

        let manifest: VersionManifest =
            response
                .into_json()
                .map_err(|e| InstallerError::VersionFetchFailed {
                    reason: format!("malformed version manifest: {e}"),
                })?;

        if manifest.versions.is_empty() {
            return Err(InstallerError::VersionFetchFailed {
                reason: "version manifest is empty".to_string(),
            });
        }
        Ok(manifest.versions)
    }
}

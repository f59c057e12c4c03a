//! Download engine
//!
//! Fetches the game content archives and unpacks them into the target
//! directory. Full installs and delta updates use the same mechanics against
//! different endpoints. Both are idempotent from the controller's point of
//! view: the archive is staged to a throwaway temp file per attempt and
//! extraction overwrites in place, so a failed attempt can be re-run safely.

use std::fs::{self, File};
use std::io::{self, BufReader, Seek, SeekFrom};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{InstallerError, Result};
use crate::lifecycle::DownloadEngine;
use crate::progress::DownloadProgress;

const DEFAULT_CONTENT_URL: &str = "https://versions.tf2classic.com/packages/tf2classic-latest.tar.gz";
const DEFAULT_UPDATE_URL: &str = "https://versions.tf2classic.com/packages/tf2classic-delta.tar.gz";
const CONTENT_URL_ENV: &str = "TF2C_CONTENT_URL";
const UPDATE_URL_ENV: &str = "TF2C_UPDATE_URL";
const USER_AGENT: &str = concat!("tf2c-installer/", env!("CARGO_PKG_VERSION"));

/// Downloads and unpacks content archives over HTTP
pub struct HttpDownloadEngine;

impl HttpDownloadEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DownloadEngine for HttpDownloadEngine {
    fn install_full(&self, target: &Path) -> Result<()> {
        let url =
            std::env::var(CONTENT_URL_ENV).unwrap_or_else(|_| DEFAULT_CONTENT_URL.to_string());
        fetch_and_unpack(&url, target, "install")
    }

    fn apply_update(&self, target: &Path) -> Result<()> {
        let url = std::env::var(UPDATE_URL_ENV).unwrap_or_else(|_| DEFAULT_UPDATE_URL.to_string());
        fetch_and_unpack(&url, target, "update")
    }
}

/// Download a tar.gz archive from `url` and unpack it over `target`.
///
/// The body is staged to an anonymous temp file before extraction so a
/// broken transfer never touches the installed tree.
fn fetch_and_unpack(url: &str, target: &Path, action: &str) -> Result<()> {
    fs::create_dir_all(target).map_err(|e| InstallerError::DownloadFailed {
        action: action.to_string(),
        reason: format!("failed to create {}: {e}", target.display()),
    })?;

    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| InstallerError::DownloadFailed {
            action: action.to_string(),
            reason: format!("request to {url} failed: {e}"),
        })?;

    let total = response
        .header("Content-Length")
        .and_then(|v| v.parse::<u64>().ok());
    let progress = DownloadProgress::new(total, "Downloading content");

    let mut staging = tempfile::tempfile().map_err(|e| InstallerError::DownloadFailed {
        action: action.to_string(),
        reason: format!("failed to create staging file: {e}"),
    })?;

    let mut reader = progress.wrap_read(response.into_reader());
    if let Err(e) = io::copy(&mut reader, &mut staging) {
        progress.abandon();
        return Err(InstallerError::DownloadFailed {
            action: action.to_string(),
            reason: format!("transfer from {url} failed: {e}"),
        });
    }
    progress.finish();

    unpack_archive(staging, target, action)
}

fn unpack_archive(mut staging: File, target: &Path, action: &str) -> Result<()> {
    staging
        .seek(SeekFrom::Start(0))
        .map_err(|e| InstallerError::DownloadFailed {
            action: action.to_string(),
            reason: format!("failed to rewind staging file: {e}"),
        })?;

    let decoder = GzDecoder::new(BufReader::new(staging));
    let mut archive = tar::Archive::new(decoder);
    archive
        .unpack(target)
        .map_err(|e| InstallerError::DownloadFailed {
            action: action.to_string(),
            reason: format!("failed to unpack archive: {e}"),
        })?;
    Ok(())
}

//! Error types and handling for the installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every variant is terminal for the current run: the lifecycle controller
//! never retries. Retries, where they exist at all, live inside the
//! download and version collaborators.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    #[error("Failed to resolve installation path '{path}': {reason}")]
    #[diagnostic(
        code(tf2c::paths::resolution_failed),
        help("Check that the directory can be created and that you have write access to it")
    )]
    PathResolutionFailed { path: String, reason: String },

    #[error("Failed to fetch the remote version list: {reason}")]
    #[diagnostic(
        code(tf2c::version::fetch_failed),
        help("Check your network connection and try again")
    )]
    VersionFetchFailed { reason: String },

    #[error("Download failed during {action}: {reason}")]
    #[diagnostic(
        code(tf2c::download::failed),
        help("A failed attempt can be safely re-run; re-invoke the same command")
    )]
    DownloadFailed { action: String, reason: String },

    #[error("Post-install patching failed at '{path}': {reason}")]
    #[diagnostic(code(tf2c::patch::failed))]
    PatchFailed { path: String, reason: String },

    #[error("TF2 Classic isn't installed at '{path}'")]
    #[diagnostic(
        code(tf2c::lifecycle::not_installed),
        help("Consider using --install instead")
    )]
    NotInstalled { path: String },

    #[error("Unrecognised command: {message}")]
    #[diagnostic(code(tf2c::cli::invalid_command), help("Try --help"))]
    InvalidCommand { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(tf2c::fs::io_error))]
    Io { message: String },
}

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        InstallerError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_resolution_error_display() {
        let err = InstallerError::PathResolutionFailed {
            path: "/opt/sourcemods".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("/opt/sourcemods"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_version_fetch_error_code() {
        let err = InstallerError::VersionFetchFailed {
            reason: "connection timed out".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("tf2c::version::fetch_failed".to_string())
        );
    }

    #[test]
    fn test_download_error_names_action() {
        let err = InstallerError::DownloadFailed {
            action: "install".to_string(),
            reason: "server returned 503".to_string(),
        };
        assert!(err.to_string().contains("install"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_not_installed_error_display() {
        let err = InstallerError::NotInstalled {
            path: "/tmp/sourcemods".to_string(),
        };
        assert!(err.to_string().contains("isn't installed"));
        assert!(err.to_string().contains("/tmp/sourcemods"));
    }

    #[test]
    fn test_invalid_command_error_display() {
        let err = InstallerError::InvalidCommand {
            message: "unexpected argument '--frobnicate'".to_string(),
        };
        assert!(err.to_string().contains("Unrecognised command"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: InstallerError = io_err.into();
        assert!(matches!(err, InstallerError::Io { .. }));
    }
}

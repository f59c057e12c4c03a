//! Installation lifecycle controller
//!
//! The one component with branching state. It inspects the target directory
//! and the remote version manifest, resolves to exactly one action, and
//! sequences the side-effecting steps: path resolution, content download,
//! post-install patching.
//!
//! The pipeline is strictly linear with a single branch point after the
//! update decision: path -> state -> decision -> action. Both the interactive
//! wizard and the scripted entry points drive this same pipeline; they differ
//! only in how the target path and confirmations are supplied.

use std::path::{Path, PathBuf};

use crate::error::{InstallerError, Result};
use crate::paths;
use crate::prompt;
use crate::version;

/// Whether prompts may be shown during this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Scripted,
}

/// What the invocation asked for. The wizard decides on its own; the
/// scripted verbs constrain the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Decide between install and update from on-disk and remote state
    Auto,
    /// Force a full install, reinstalling in place if already present
    Install,
    /// Update an existing installation; error if there is none
    Update,
}

/// Whether the target directory holds an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    NotInstalled,
    Installed,
}

/// Result of comparing the local version against the remote manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    UpToDate,
    Update,
    Reinstall,
}

/// The single action a run resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Update,
    NoOp,
}

/// Immutable per-run inputs, fixed before the controller starts
#[derive(Debug, Clone)]
pub struct RunContext {
    pub mode: RunMode,
    pub intent: Intent,
    /// Explicit target directory; `None` means detect or prompt
    pub target: Option<PathBuf>,
}

impl RunContext {
    pub fn interactive() -> Self {
        Self {
            mode: RunMode::Interactive,
            intent: Intent::Auto,
            target: None,
        }
    }

    pub fn scripted_install(target: Option<PathBuf>) -> Self {
        Self {
            mode: RunMode::Scripted,
            intent: Intent::Install,
            target,
        }
    }

    pub fn scripted_update(target: Option<PathBuf>) -> Self {
        Self {
            mode: RunMode::Scripted,
            intent: Intent::Update,
            target,
        }
    }
}

/// Fetches the ordered list of available remote versions
pub trait RemoteVersions {
    /// Returns version identifiers ordered oldest to newest. Implementations
    /// must reject an empty manifest as a fetch failure.
    fn fetch_manifest(&self) -> Result<Vec<String>>;
}

/// Places game content into the target directory
pub trait DownloadEngine {
    /// Full install: binaries plus the complete content set
    fn install_full(&self, target: &Path) -> Result<()>;
    /// Delta update: content changes only
    fn apply_update(&self, target: &Path) -> Result<()>;
}

/// Corrective file operations after content placement
pub trait PostInstallPatcher {
    fn apply(&self, target: &Path) -> Result<()>;
}

/// Map installation state and update decision to the single action to take.
///
/// An uninstalled target always routes to a full install, whatever the
/// version comparison would have said.
pub fn decide(state: InstallState, decision: Option<UpdateDecision>) -> Action {
    match (state, decision) {
        (InstallState::NotInstalled, _) => Action::Install,
        // An installed target with no decision means the caller skipped the
        // version check (forced install); the only safe action is a full
        // install.
        (InstallState::Installed, Some(UpdateDecision::Reinstall) | None) => Action::Install,
        (InstallState::Installed, Some(UpdateDecision::Update)) => Action::Update,
        (InstallState::Installed, Some(UpdateDecision::UpToDate)) => Action::NoOp,
    }
}

/// Drives one run from path resolution to completion
pub struct Controller<'a> {
    versions: &'a dyn RemoteVersions,
    downloads: &'a dyn DownloadEngine,
    patcher: &'a dyn PostInstallPatcher,
}

impl<'a> Controller<'a> {
    pub fn new(
        versions: &'a dyn RemoteVersions,
        downloads: &'a dyn DownloadEngine,
        patcher: &'a dyn PostInstallPatcher,
    ) -> Self {
        Self {
            versions,
            downloads,
            patcher,
        }
    }

    /// Run the full pipeline and return the action that was performed
    pub fn run(&self, ctx: &RunContext) -> Result<Action> {
        let target = match (ctx.mode, &ctx.target) {
            (RunMode::Interactive, None) => paths::resolve_interactive()?,
            (_, explicit) => paths::resolve_scripted(explicit.as_deref())?,
        };

        let state = paths::install_state(&target);

        if ctx.intent == Intent::Update && state == InstallState::NotInstalled {
            return Err(InstallerError::NotInstalled {
                path: target.display().to_string(),
            });
        }

        // The remote manifest is consulted only for an existing installation;
        // a forced install skips it the same way a fresh one does.
        let (decision, newest) = match (state, ctx.intent) {
            (InstallState::NotInstalled, _) => (None, None),
            (InstallState::Installed, Intent::Install) => {
                prompt::status("TF2 Classic is already installed. Assuming a reinstallation.");
                (Some(UpdateDecision::Reinstall), None)
            }
            (InstallState::Installed, Intent::Auto | Intent::Update) => {
                let local = version::read_local_version(&target);
                let manifest = self.versions.fetch_manifest()?;
                let newest = manifest.last().cloned();
                (Some(version::compare(local.as_deref(), &manifest)), newest)
            }
        };

        let action = decide(state, decision);
        match action {
            Action::Install => {
                if state == InstallState::NotInstalled {
                    prompt::status(
                        "Starting the download for TF2 Classic... \
                         You may see some errors that are safe to ignore.",
                    );
                }
                self.downloads.install_full(&target)?;
                self.patcher.apply(&target)?;
                // The archive carries its own rev.txt, but the manifest is
                // authoritative: a decision-driven reinstall must leave the
                // marker at the newest version or the next run reinstalls
                // again.
                if let Some(newest) = &newest {
                    version::write_local_version(&target, newest)?;
                }
            }
            Action::Update => {
                self.downloads.apply_update(&target)?;
                if let Some(newest) = newest {
                    version::write_local_version(&target, &newest)?;
                }
            }
            Action::NoOp => {}
        }

        Ok(action)
    }
}

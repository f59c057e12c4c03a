//! TF2 Classic installer
//!
//! Determines whether a target directory holds no installation, a current
//! one, or a stale one, and drives the right action: fresh install, in-place
//! update, or forced reinstall. Runs either as an interactive wizard (no
//! arguments) or scripted from fixed command-line arguments.

use clap::Parser;
use clap::error::ErrorKind;

mod cli;
mod download;
mod error;
mod lifecycle;
mod patch;
mod paths;
mod progress;
mod prompt;
mod version;

use cli::Cli;
use download::HttpDownloadEngine;
use error::InstallerError;
use lifecycle::{Action, Controller, RunMode};
use patch::BlacklistPatcher;
use version::HttpRemoteVersions;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let message = e
                .to_string()
                .lines()
                .next()
                .unwrap_or("invalid arguments")
                .trim_start_matches("error: ")
                .to_string();
            eprintln!("Error: {}", InstallerError::InvalidCommand { message });
            std::process::exit(1);
        }
    };

    let ctx = cli.run_context();
    let interactive = ctx.mode == RunMode::Interactive;

    let versions = HttpRemoteVersions::new();
    let engine = HttpDownloadEngine::new();
    let patcher = BlacklistPatcher::new();
    let controller = Controller::new(&versions, &engine, &patcher);

    match controller.run(&ctx) {
        Ok(action) => {
            match action {
                Action::Install => prompt::success(
                    "The installation has successfully completed. Remember to restart Steam!",
                ),
                Action::Update => prompt::success("The update has successfully completed."),
                Action::NoOp => prompt::status("TF2 Classic is already up to date."),
            }
            if interactive {
                prompt::wait_for_enter();
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if interactive {
                prompt::wait_for_enter();
            }
            std::process::exit(1);
        }
    }
}

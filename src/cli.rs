//! CLI definitions using clap derive API
//!
//! The surface is flag-style rather than subcommands, matching how the tool
//! is driven from wrapper scripts: `--install [PATH]`, `--update [PATH]`,
//! `--help`. No arguments at all enters the interactive wizard.

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::lifecycle::RunContext;

/// Installation utility for TF2 Classic
#[derive(Parser, Debug)]
#[command(
    name = "tf2c-installer",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Installation utility for TF2 Classic",
    long_about = "If no arguments are provided, the installer runs in setup mode, asking a \
                  series of questions to install the game for a regular user. This is what's \
                  used when opening the installer from the desktop.\n\n\
                  PATH is the folder containing TF2 Classic's folder. This is usually the \
                  sourcemods folder for clients, or the Source dedicated server folder for \
                  servers. If PATH isn't provided, it is replaced with the detected sourcemods \
                  folder in the Steam directory, falling back to the current work directory.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  tf2c-installer\n    \
                  tf2c-installer --install ~/.steam/steam/steamapps/sourcemods\n    \
                  tf2c-installer --update ~/.steam/steam/steamapps/sourcemods"
)]
pub struct Cli {
    /// Install TF2 Classic into a new folder inside PATH
    #[arg(long, value_name = "PATH", num_args = 0..=1, conflicts_with = "update")]
    pub install: Option<Option<PathBuf>>,

    /// Update the pre-existing TF2 Classic installation in its folder inside PATH
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub update: Option<Option<PathBuf>>,
}

impl Cli {
    /// Fix the run context for this invocation
    pub fn run_context(&self) -> RunContext {
        match (&self.install, &self.update) {
            (Some(path), _) => RunContext::scripted_install(path.clone()),
            (_, Some(path)) => RunContext::scripted_update(path.clone()),
            (None, None) => RunContext::interactive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{Intent, RunMode};

    #[test]
    fn test_cli_parsing_no_args_is_interactive() {
        let cli = Cli::try_parse_from(["tf2c-installer"]).unwrap();
        let ctx = cli.run_context();
        assert_eq!(ctx.mode, RunMode::Interactive);
        assert_eq!(ctx.intent, Intent::Auto);
        assert_eq!(ctx.target, None);
    }

    #[test]
    fn test_cli_parsing_install_with_path() {
        let cli = Cli::try_parse_from(["tf2c-installer", "--install", "/tmp/sourcemods"]).unwrap();
        let ctx = cli.run_context();
        assert_eq!(ctx.mode, RunMode::Scripted);
        assert_eq!(ctx.intent, Intent::Install);
        assert_eq!(ctx.target, Some(PathBuf::from("/tmp/sourcemods")));
    }

    #[test]
    fn test_cli_parsing_install_without_path_autodetects() {
        let cli = Cli::try_parse_from(["tf2c-installer", "--install"]).unwrap();
        let ctx = cli.run_context();
        assert_eq!(ctx.intent, Intent::Install);
        assert_eq!(ctx.target, None);
    }

    #[test]
    fn test_cli_parsing_update_with_path() {
        let cli = Cli::try_parse_from(["tf2c-installer", "--update", "/tmp/sourcemods"]).unwrap();
        let ctx = cli.run_context();
        assert_eq!(ctx.mode, RunMode::Scripted);
        assert_eq!(ctx.intent, Intent::Update);
        assert_eq!(ctx.target, Some(PathBuf::from("/tmp/sourcemods")));
    }

    #[test]
    fn test_cli_parsing_install_conflicts_with_update() {
        let result = Cli::try_parse_from(["tf2c-installer", "--install", "--update"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_rejects_unknown_flag() {
        let result = Cli::try_parse_from(["tf2c-installer", "--frobnicate"]);
        assert!(result.is_err());
    }
}

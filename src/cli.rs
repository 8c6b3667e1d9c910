//! CLI interface for cz-emoji.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub mod commit;
pub mod config;
pub mod parse;
pub mod types;

/// cz-emoji: emoji commit message prompter.
#[derive(Parser)]
#[command(name = "cz-emoji")]
#[command(about = "Builds emoji commit messages from structured answers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Configuration inspection.
    Config(config::ConfigCommand),
    /// Lists the commit types offered by the type selector.
    Types(types::TypesCommand),
    /// Renders a commit message from an answer script.
    Commit(commit::CommitCommand),
    /// Splits an emoji commit header into its parts.
    Parse(parse::ParseCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Config(config_cmd) => config_cmd.execute(),
            Commands::Types(types_cmd) => types_cmd.execute(),
            Commands::Commit(commit_cmd) => commit_cmd.execute().await,
            Commands::Parse(parse_cmd) => parse_cmd.execute(),
        }
    }
}

/// Directory configuration is resolved from: `--cwd` or the process
/// working directory.
pub(crate) fn working_dir(cwd: Option<PathBuf>) -> Result<PathBuf> {
    match cwd {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_config_show() {
        let cli = Cli::try_parse_from(["cz-emoji", "config", "show", "--cwd", "/tmp"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn commit_requires_answers() {
        assert!(Cli::try_parse_from(["cz-emoji", "commit"]).is_err());
        assert!(Cli::try_parse_from(["cz-emoji", "commit", "--answers", "a.json"]).is_ok());
    }

    #[test]
    fn explicit_working_dir_wins() {
        let dir = PathBuf::from("/somewhere/else");
        assert_eq!(working_dir(Some(dir.clone())).unwrap(), dir);
    }
}

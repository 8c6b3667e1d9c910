//! Configuration-related CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{Config, ConfigResolver, ResolvedConfig};

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the resolved configuration and where it came from.
    Show(ShowCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Directory to resolve the configuration from.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// JSON document printed by `config show`.
#[derive(Serialize)]
struct ConfigReport<'a> {
    source: String,
    format: &'static str,
    config: &'a Config,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let cwd = super::working_dir(self.cwd)?;
        let resolved = ConfigResolver::new(&cwd).resolve();
        println!("{}", render_report(&resolved)?);
        Ok(())
    }
}

/// Renders the resolved configuration as pretty JSON.
fn render_report(resolved: &ResolvedConfig) -> Result<String> {
    let report = ConfigReport {
        source: resolved.source.to_string(),
        format: resolved.config.format(),
        config: &resolved.config,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize configuration")
}

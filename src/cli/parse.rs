//! Header parsing command.

use anyhow::{Context, Result};
use clap::Parser;

use crate::message::parse_header;

/// Parse command options.
#[derive(Parser)]
pub struct ParseCommand {
    /// Header line, e.g. "✨ feat(core): add parser (#12)".
    #[arg(value_name = "HEADER")]
    pub header: String,
}

impl ParseCommand {
    /// Executes the parse command.
    pub fn execute(self) -> Result<()> {
        let parsed = parse_header(&self.header)
            .with_context(|| format!("Not an emoji commit header: {}", self.header))?;
        let json = serde_json::to_string_pretty(&parsed).context("Failed to serialize header")?;
        println!("{json}");
        Ok(())
    }
}

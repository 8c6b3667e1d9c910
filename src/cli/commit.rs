//! Commit command: runs the prompter over a recorded answer script.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::prompt::{Prompter, ScriptedPromptEngine};

/// Commit command options.
#[derive(Parser)]
pub struct CommitCommand {
    /// JSON object mapping question names to answers.
    #[arg(long, value_name = "FILE")]
    pub answers: PathBuf,

    /// Directory to resolve the configuration from.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

impl CommitCommand {
    /// Executes the commit command.
    pub async fn execute(self) -> Result<()> {
        let cwd = super::working_dir(self.cwd)?;
        let mut engine = ScriptedPromptEngine::from_file(&self.answers)?;

        Prompter::new(&cwd)
            .prompter(&mut engine, |message| println!("{message}"))
            .await
    }
}

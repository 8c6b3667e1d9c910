//! Type listing command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::choices::TypeIndex;
use crate::config::Config;

/// Types command options.
#[derive(Parser)]
pub struct TypesCommand {
    /// Fuzzy query; only matching types are listed, best first.
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Directory to resolve the configuration from.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

impl TypesCommand {
    /// Executes the types command.
    pub fn execute(self) -> Result<()> {
        let cwd = super::working_dir(self.cwd)?;
        let index = TypeIndex::from_config(&Config::resolve(&cwd));
        let query = self.search.as_deref().unwrap_or("");

        let listing = render_listing(&index, query);
        if listing.is_empty() {
            anyhow::bail!("No commit type matches `{query}`");
        }
        println!("{listing}");
        Ok(())
    }
}

/// One selector line per matching choice.
fn render_listing(index: &TypeIndex, query: &str) -> String {
    index
        .search(query)
        .iter()
        .map(|choice| choice.display_name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_without_query_covers_catalog() {
        let config = Config::default();
        let listing = render_listing(&TypeIndex::from_config(&config), "");
        assert_eq!(listing.lines().count(), config.types.len());
        assert!(listing.starts_with("feat "));
    }

    #[test]
    fn listing_with_query_puts_best_match_first() {
        let listing = render_listing(&TypeIndex::from_config(&Config::default()), "docs");
        assert!(listing.lines().next().unwrap().starts_with("docs "));
    }
}

//! Config file discovery.
//!
//! Lookups run in a fixed order and the first one that yields a layer wins:
//! `package.json` searched upwards, `.czrc` searched upwards, then the
//! built-in defaults. Both searches start in the working directory itself,
//! so a `.czrc` sitting there is always the nearest rc file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::{Config, ConfigLayer, ConfigSource, ResolvedConfig, NAMESPACE};

/// Manifest file carrying a nested `config` object.
pub const MANIFEST_FILE: &str = "package.json";

/// Dedicated rc file with the same shape as the manifest.
pub const RC_FILE: &str = ".czrc";

/// Finds `file_name` in `start` or the closest ancestor that has it.
pub fn find_up(start: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let candidate = current.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Resolves the effective configuration for one working directory.
pub struct ConfigResolver {
    cwd: PathBuf,
}

impl ConfigResolver {
    /// Creates a resolver rooted at `cwd`.
    pub fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
        }
    }

    /// Runs the lookup chain and merges the winning layer over the defaults.
    pub fn resolve(&self) -> ResolvedConfig {
        let (layer, source) = self.discover();
        debug!("Using configuration from {source}");

        let config = match layer {
            Some(layer) => Config::default().merged_with(layer),
            None => Config::default(),
        };

        ResolvedConfig { config, source }
    }

    fn discover(&self) -> (Option<ConfigLayer>, ConfigSource) {
        if let Some(path) = find_up(&self.cwd, MANIFEST_FILE) {
            if let Some(layer) = try_load(&path) {
                return (Some(layer), ConfigSource::Manifest(path));
            }
        }

        // Covers the working-directory rc file too: find_up checks cwd first.
        if let Some(path) = find_up(&self.cwd, RC_FILE) {
            if let Some(layer) = try_load(&path) {
                return (Some(layer), ConfigSource::RcFile(path));
            }
        }

        (None, ConfigSource::Defaults)
    }
}

/// Loads a layer, logging and swallowing every failure.
fn try_load(path: &Path) -> Option<ConfigLayer> {
    match load_layer(path) {
        Ok(Some(layer)) => Some(layer),
        Ok(None) => {
            debug!("No {NAMESPACE} section in {}", path.display());
            None
        }
        Err(e) => {
            warn!("Skipping {}: {e:#}", path.display());
            None
        }
    }
}

/// Reads and parses a manifest or rc file.
pub fn load_layer(path: &Path) -> Result<Option<ConfigLayer>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    ConfigLayer::from_json_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_FORMAT, DEFAULT_SUBJECT_MAX_LENGTH};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn find_up_walks_parents() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = write(temp_dir.path(), MANIFEST_FILE, "{}");

        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_up(&nested, MANIFEST_FILE), Some(manifest));
        assert_eq!(find_up(&nested, "definitely-not-here.json"), None);
    }

    #[test]
    fn find_up_ignores_directories_with_the_same_name() {
        let temp_dir = TempDir::new().unwrap();
        let rc = write(temp_dir.path(), RC_FILE, "{}");
        let nested = temp_dir.path().join("pkg");
        fs::create_dir_all(nested.join(RC_FILE)).unwrap();

        assert_eq!(find_up(&nested, RC_FILE), Some(rc));
    }

    #[test]
    fn manifest_section_is_applied() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = write(
            temp_dir.path(),
            MANIFEST_FILE,
            r#"{"name":"demo","config":{"@paalan/cz-emoji":{"conventional":false,"subjectMaxLength":60}}}"#,
        );

        let resolved = ConfigResolver::new(temp_dir.path()).resolve();
        assert_eq!(resolved.source, ConfigSource::Manifest(manifest));
        assert_eq!(resolved.config.subject_max_length, 60);
        assert_eq!(resolved.config.format(), DEFAULT_FORMAT);
    }

    #[test]
    fn manifest_without_section_falls_back_to_rc() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), MANIFEST_FILE, r#"{"name":"demo"}"#);
        let rc = write(
            temp_dir.path(),
            RC_FILE,
            r#"{"config":{"@paalan/cz-emoji":{"emojiSymbol":false}}}"#,
        );

        let nested = temp_dir.path().join("src");
        fs::create_dir_all(&nested).unwrap();

        let resolved = ConfigResolver::new(&nested).resolve();
        assert_eq!(resolved.source, ConfigSource::RcFile(rc));
        assert!(!resolved.config.emoji_symbol);
    }

    #[test]
    fn rc_in_working_directory_wins_over_parent_rc() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            RC_FILE,
            r#"{"config":{"@paalan/cz-emoji":{"subjectMaxLength":40}}}"#,
        );
        let nested = temp_dir.path().join("pkg");
        fs::create_dir_all(&nested).unwrap();
        let local = write(
            &nested,
            RC_FILE,
            r#"{"config":{"@paalan/cz-emoji":{"emojiSymbol":false}}}"#,
        );

        let resolved = ConfigResolver::new(&nested).resolve();
        assert_eq!(resolved.source, ConfigSource::RcFile(local));
        assert!(!resolved.config.emoji_symbol);
        assert_eq!(
            resolved.config.subject_max_length,
            DEFAULT_SUBJECT_MAX_LENGTH
        );
    }

    #[test]
    fn sectionless_rc_in_working_directory_stops_the_search() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            RC_FILE,
            r#"{"config":{"@paalan/cz-emoji":{"subjectMaxLength":40}}}"#,
        );
        let nested = temp_dir.path().join("pkg");
        fs::create_dir_all(&nested).unwrap();
        write(&nested, RC_FILE, "{}");

        let resolved = ConfigResolver::new(&nested).resolve();
        assert_eq!(resolved.source, ConfigSource::Defaults);
    }

    #[test]
    fn unscoped_manifest_key_is_still_read() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = write(
            temp_dir.path(),
            MANIFEST_FILE,
            r#"{"config":{"cz-emoji":{"subjectMaxLength":40}}}"#,
        );

        let resolved = ConfigResolver::new(temp_dir.path()).resolve();
        assert_eq!(resolved.source, ConfigSource::Manifest(manifest));
        assert_eq!(resolved.config.subject_max_length, 40);
    }

    #[test]
    fn only_the_first_successful_source_is_used() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            MANIFEST_FILE,
            r#"{"config":{"@paalan/cz-emoji":{"subjectMaxLength":40}}}"#,
        );
        write(
            temp_dir.path(),
            RC_FILE,
            r#"{"config":{"@paalan/cz-emoji":{"emojiSymbol":false}}}"#,
        );

        let config = Config::resolve(temp_dir.path());
        assert_eq!(config.subject_max_length, 40);
        assert!(config.emoji_symbol);
    }

    #[test]
    fn malformed_files_degrade_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), MANIFEST_FILE, "{ broken");
        write(
            temp_dir.path(),
            RC_FILE,
            r#"{"config":{"@paalan/cz-emoji":{"types":"nope"}}}"#,
        );

        let resolved = ConfigResolver::new(temp_dir.path()).resolve();
        assert_eq!(resolved.source, ConfigSource::Defaults);
        assert_eq!(resolved.config, Config::default());
        assert_eq!(
            resolved.config.subject_max_length,
            DEFAULT_SUBJECT_MAX_LENGTH
        );
    }

    #[test]
    fn load_layer_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_layer(&temp_dir.path().join(RC_FILE)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

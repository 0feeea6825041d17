//! CLI configuration loaded from TOML.
//!
//! ```toml
//! save_dir = "saves"
//! catalogs = ["packs/extra.json"]
//!
//! [rules]
//! achievement_bonus = 50
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tf_core::Rules;

/// Config file looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "taleforge.toml";

/// Save directory used when neither the command line nor the config names one.
pub const DEFAULT_SAVE_DIR: &str = ".taleforge/saves";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Where save files live.
    pub save_dir: Option<PathBuf>,
    /// Scene packs loaded after the built-in story, before command-line packs.
    pub catalogs: Vec<PathBuf>,
    /// Reducer tuning.
    pub rules: Rules,
}

impl CliConfig {
    /// Load the config.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        let config = Self::parse(&content)
            .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse config text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.rules.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// The save directory, preferring a command-line override.
    pub fn save_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.save_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.rules, Rules::default());
    }

    #[test]
    fn full_config() {
        let config = CliConfig::parse(
            r#"
save_dir = "my-saves"
catalogs = ["a.json", "b.json"]

[rules]
achievement_bonus = 50
"#,
        )
        .unwrap();
        assert_eq!(config.save_dir, Some(PathBuf::from("my-saves")));
        assert_eq!(config.catalogs.len(), 2);
        assert_eq!(config.rules.achievement_bonus, 50);
        assert_eq!(config.rules.experience_per_level, 100);
    }

    #[test]
    fn rejects_bad_rules() {
        let err = CliConfig::parse("[rules]\nexperience_per_level = 0\n").unwrap_err();
        assert!(err.contains("experience_per_level"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(CliConfig::parse("savedir = \"x\"\n").is_err());
    }

    #[test]
    fn save_dir_precedence() {
        let config = CliConfig {
            save_dir: Some(PathBuf::from("from-config")),
            ..CliConfig::default()
        };
        assert_eq!(
            config.save_dir(Some(Path::new("from-cli"))),
            PathBuf::from("from-cli")
        );
        assert_eq!(config.save_dir(None), PathBuf::from("from-config"));
        assert_eq!(
            CliConfig::default().save_dir(None),
            PathBuf::from(DEFAULT_SAVE_DIR)
        );
    }

    #[test]
    fn explicit_missing_file_fails() {
        let err = CliConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.contains("cannot read config"));
    }
}

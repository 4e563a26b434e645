//! Configuration management.
//!
//! Runtime configuration is [`TrackerConfig`]; the YAML file shape is
//! [`ConfigFile`]. The file keeps flat `keywords` and `no_suffix` lists so
//! hand-written configs stay short; the loader folds them into ordered
//! [`KeywordRule`]s where each keyword carries its own suffix policy.

use crate::matcher::KeywordRule;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default topic label.
pub const DEFAULT_TOPIC: &str = "Fruits";
/// Default cooldown between reported keyword hits, in minutes.
pub const DEFAULT_COOLDOWN_MINUTES: u32 = 120;
/// Default record file, resolved against the working directory.
pub const DEFAULT_STATE_FILE: &str = "dayzero.json";
/// Config file name looked up in the working directory and the platform
/// config directory.
pub const DEFAULT_CONFIG_FILE: &str = "dayzero.yaml";

/// Main configuration for dayzero.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Human-readable topic label used in replies.
    pub topic: String,
    /// Ordered keyword rules; order is alternation precedence.
    pub keywords: Vec<KeywordRule>,
    /// Cooldown window in minutes.
    pub cooldown_minutes: u32,
    /// Path of the record file.
    pub state_file: PathBuf,
    /// Escalates the default log filter to debug level.
    pub debug: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            keywords: default_keywords(),
            cooldown_minutes: DEFAULT_COOLDOWN_MINUTES,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            debug: false,
        }
    }
}

impl TrackerConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let file: ConfigFile = serde_yaml_ng::from_str(&raw).map_err(|e| {
            Error::Config(format!("cannot parse config file {}: {e}", path.display()))
        })?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default locations.
    ///
    /// Tries `dayzero.yaml` in the working directory, then the platform
    /// config directory. A missing file is not an error; built-in defaults
    /// apply. An existing file that fails to parse is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a default-location file exists but
    /// cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_file(local);
        }
        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Builds runtime configuration from a parsed config file, filling in
    /// defaults for absent keys.
    #[must_use]
    pub fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        let no_suffix: HashSet<String> = file
            .no_suffix
            .unwrap_or_default()
            .iter()
            .map(|phrase| phrase.trim().to_lowercase())
            .collect();

        let keywords = file.keywords.map_or(defaults.keywords, |phrases| {
            phrases
                .into_iter()
                .map(|phrase| {
                    let allow_suffix = !no_suffix.contains(&phrase.trim().to_lowercase());
                    KeywordRule {
                        phrase,
                        allow_suffix,
                    }
                })
                .collect()
        });

        Self {
            topic: file.topic.unwrap_or(defaults.topic),
            keywords,
            cooldown_minutes: file.cooldown_minutes.unwrap_or(defaults.cooldown_minutes),
            state_file: file.state_file.unwrap_or(defaults.state_file),
            debug: file.debug.unwrap_or(defaults.debug),
        }
    }

    /// Returns the cooldown window as a duration.
    #[must_use]
    pub fn cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.cooldown_minutes))
    }

    /// Sets the topic label.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Replaces the keyword rules.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<KeywordRule>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Sets the cooldown window in minutes.
    #[must_use]
    pub const fn with_cooldown_minutes(mut self, minutes: u32) -> Self {
        self.cooldown_minutes = minutes;
        self
    }

    /// Sets the record file path.
    #[must_use]
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = path.into();
        self
    }

    /// Sets the debug flag.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// YAML config file shape. All keys are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Topic label.
    pub topic: Option<String>,
    /// Ordered keyword phrases.
    pub keywords: Option<Vec<String>>,
    /// Keywords (matched case-insensitively after trimming) that must hit
    /// as exact tokens, with no suffix growth.
    pub no_suffix: Option<Vec<String>>,
    /// Cooldown window in minutes.
    pub cooldown_minutes: Option<u32>,
    /// Record file path.
    pub state_file: Option<PathBuf>,
    /// Debug logging flag.
    pub debug: Option<bool>,
}

/// Returns the platform config file path, when a home directory exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("dayzero").join(DEFAULT_CONFIG_FILE))
}

/// Built-in keyword rules used when the config file has no `keywords` key.
fn default_keywords() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new("apple"),
        KeywordRule::new("banana"),
        KeywordRule::exact("kiwi"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_usable() {
        let config = TrackerConfig::default();

        assert_eq!(config.topic, "Fruits");
        assert!(!config.keywords.is_empty());
        assert_eq!(config.cooldown_minutes, 120);
        assert_eq!(config.cooldown(), chrono::Duration::hours(2));
        assert!(!config.debug);
    }

    #[test]
    fn test_from_config_file_folds_no_suffix_list() {
        let file = ConfigFile {
            keywords: Some(vec![
                "apple".to_string(),
                "Banana Bread".to_string(),
                "kiwi".to_string(),
            ]),
            no_suffix: Some(vec!["  KIWI ".to_string()]),
            ..ConfigFile::default()
        };

        let config = TrackerConfig::from_config_file(file);

        assert_eq!(
            config.keywords,
            vec![
                KeywordRule::new("apple"),
                KeywordRule::new("Banana Bread"),
                KeywordRule::exact("kiwi"),
            ]
        );
    }

    #[test]
    fn test_explicit_empty_keyword_list_is_kept() {
        // An empty list is a configuration mistake the matcher rejects at
        // startup; it must not be silently replaced with defaults.
        let file = ConfigFile {
            keywords: Some(Vec::new()),
            ..ConfigFile::default()
        };

        let config = TrackerConfig::from_config_file(file);

        assert!(config.keywords.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dayzero.yaml");
        std::fs::write(
            &path,
            "topic: Vegetables\n\
             keywords:\n\
             - carrot\n\
             - pea\n\
             no_suffix:\n\
             - pea\n\
             cooldown_minutes: 90\n\
             state_file: veg.json\n\
             debug: true\n",
        )
        .unwrap();

        let config = TrackerConfig::load_from_file(&path).unwrap();

        assert_eq!(config.topic, "Vegetables");
        assert_eq!(
            config.keywords,
            vec![KeywordRule::new("carrot"), KeywordRule::exact("pea")]
        );
        assert_eq!(config.cooldown_minutes, 90);
        assert_eq!(config.state_file, PathBuf::from("veg.json"));
        assert!(config.debug);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = TrackerConfig::load_from_file(&dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dayzero.yaml");
        std::fs::write(&path, "keywords: {not: [valid").unwrap();

        let result = TrackerConfig::load_from_file(&path);

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = TrackerConfig::default()
            .with_topic("Coffee")
            .with_keywords(vec![KeywordRule::new("espresso")])
            .with_cooldown_minutes(30)
            .with_state_file("coffee.json")
            .with_debug(true);

        assert_eq!(config.topic, "Coffee");
        assert_eq!(config.keywords.len(), 1);
        assert_eq!(config.cooldown(), chrono::Duration::minutes(30));
        assert_eq!(config.state_file, PathBuf::from("coffee.json"));
        assert!(config.debug);
    }
}

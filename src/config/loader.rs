//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary)
//! 2. Environment variables
//! 3. `.genpass.toml` in the current directory
//! 4. `~/.config/genpass/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::constants::{DEFAULT_SEPARATOR, DEFAULT_WORDS_PATH};
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid word separator {0:?}: must be non-empty and single-line")]
    InvalidSeparator(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub words: WordsConfig,
    pub output: OutputConfig,
}

/// Word list settings for `word` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    /// Dictionary file, one word per line.
    pub path: PathBuf,
    /// Optional list of words never to use.
    pub bad_words: Option<PathBuf>,
    /// Joins passphrase words.
    pub separator: String,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_WORDS_PATH),
            bad_words: None,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Echo template comments and blank lines into the output.
    pub keep_comments: bool,
}

/// A config file as written on disk. Keys left out keep the value from
/// the layer below; keys that are present always win, even when they
/// spell out the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    words: WordsFile,
    output: OutputFile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct WordsFile {
    path: Option<PathBuf>,
    bad_words: Option<PathBuf>,
    separator: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputFile {
    keep_comments: Option<bool>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then `.genpass.toml` from `local_dir`, then
    /// applies environment variable overrides.
    pub fn load(local_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        Self::load_layers(Self::global_config_path().as_deref(), local_dir, env)
    }

    /// Same as [`Config::load`] with an explicit global config path.
    pub fn load_layers(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                let global = Self::load_file(global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(dir) = local_dir {
            let local_path = dir.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        check_separator(&config.words.separator)?;
        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        debug!(path = %path.display(), "loading config file");
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge a config file into this one (every key the file sets wins).
    fn merge(&mut self, other: ConfigFile) {
        if let Some(path) = other.words.path {
            self.words.path = path;
        }
        if let Some(bad_words) = other.words.bad_words {
            self.words.bad_words = Some(bad_words);
        }
        if let Some(separator) = other.words.separator {
            self.words.separator = separator;
        }

        if let Some(keep_comments) = other.output.keep_comments {
            self.output.keep_comments = keep_comments;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(path) = env.path(crate::constants::ENV_WORDS) {
            self.words.path = path;
        }
        if let Some(path) = env.path(crate::constants::ENV_BAD_WORDS) {
            self.words.bad_words = Some(path);
        }
        if let Some(sep) = env.get(crate::constants::ENV_SEPARATOR) {
            self.words.separator = sep;
        }
    }
}

/// Reject separators that would break the one-line-per-key output format.
pub fn check_separator(separator: &str) -> Result<(), ConfigError> {
    if separator.is_empty() || separator.contains(['\n', '\r']) {
        return Err(ConfigError::InvalidSeparator(separator.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.words.path, PathBuf::from("/usr/share/dict/words"));
        assert_eq!(config.words.separator, "-");
        assert!(config.words.bad_words.is_none());
        assert!(!config.output.keep_comments);
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[words]
path = "/opt/words.txt"
bad_words = "/opt/bad.txt"
separator = "."

[output]
keep_comments = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.words.path, PathBuf::from("/opt/words.txt"));
        assert_eq!(config.words.bad_words, Some(PathBuf::from("/opt/bad.txt")));
        assert_eq!(config.words.separator, ".");
        assert!(config.output.keep_comments);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[words]\nseparator = \"_\"\n").unwrap();
        assert_eq!(config.words.separator, "_");
        assert_eq!(config.words.path, WordsConfig::default().path);
    }

    #[test]
    fn merge_overrides_only_keys_that_are_set() {
        let mut base = Config::default();
        base.words.bad_words = Some(PathBuf::from("/global/bad"));

        let text = "[words]\npath = \"/local/words\"\n[output]\nkeep_comments = true\n";
        base.merge(toml::from_str(text).unwrap());

        assert_eq!(base.words.path, PathBuf::from("/local/words"));
        assert_eq!(base.words.bad_words, Some(PathBuf::from("/global/bad")));
        assert_eq!(base.words.separator, "-");
        assert!(base.output.keep_comments);
    }

    #[test]
    fn local_file_can_switch_keep_comments_off() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(&global, "[output]\nkeep_comments = true\n").unwrap();
        let local = dir.path().join(".genpass.toml");
        std::fs::write(&local, "[output]\nkeep_comments = false\n").unwrap();

        let global = Some(global.as_path());
        let config = Config::load_layers(global, Some(dir.path()), &no_env()).unwrap();
        assert!(!config.output.keep_comments);
    }

    #[test]
    fn local_file_can_restore_default_values() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(&global, "[words]\npath = \"/g/words\"\nseparator = \".\"\n").unwrap();
        let local = dir.path().join(".genpass.toml");
        let restore = "[words]\npath = \"/usr/share/dict/words\"\nseparator = \"-\"\n";
        std::fs::write(&local, restore).unwrap();

        let global = Some(global.as_path());
        let config = Config::load_layers(global, Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn local_file_overrides_global_file() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(&global, "[words]\npath = \"/g/words\"\nseparator = \" \"\n").unwrap();
        std::fs::write(
            dir.path().join(".genpass.toml"),
            "[words]\npath = \"/l/words\"\n",
        )
        .unwrap();

        let global = Some(global.as_path());
        let config = Config::load_layers(global, Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.words.path, PathBuf::from("/l/words"));
        assert_eq!(config.words.separator, " ");
    }

    #[test]
    fn env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".genpass.toml"),
            "[words]\npath = \"/l/words\"\n",
        )
        .unwrap();
        let env = Env::mock([
            ("GENPASS_WORDS", "/env/words"),
            ("GENPASS_BAD_WORDS", "/env/bad"),
            ("GENPASS_SEPARATOR", "+"),
        ]);

        let config = Config::load_layers(None, Some(dir.path()), &env).unwrap();
        assert_eq!(config.words.path, PathBuf::from("/env/words"));
        assert_eq!(config.words.bad_words, Some(PathBuf::from("/env/bad")));
        assert_eq!(config.words.separator, "+");
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".genpass.toml"), "[words\n").unwrap();

        let err = Config::load_layers(None, Some(dir.path()), &no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFile { .. }));
        assert!(err.to_string().contains(".genpass.toml"));
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_layers(
            Some(dir.path().join("absent.toml").as_path()),
            Some(dir.path()),
            &no_env(),
        )
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn separator_validation() {
        assert!(check_separator("-").is_ok());
        assert!(check_separator(" ").is_ok());
        assert!(check_separator("").is_err());
        assert!(check_separator("a\nb").is_err());
    }
}

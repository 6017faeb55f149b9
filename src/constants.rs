//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and default locations so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "genpass";

/// Crate version, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple the binary was compiled for (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename, looked up in the current directory.
pub const CONFIG_FILENAME: &str = ".genpass.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "genpass";

/// Template read by `generate` and `check` when `-i` is not given.
pub const DEFAULT_TEMPLATE: &str = "passwords.ini.in";

/// Standard dictionary location on most Unix systems.
pub const DEFAULT_WORDS_PATH: &str = "/usr/share/dict/words";

/// Separator placed between passphrase words.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Largest accepted template length (bytes for hex/base64, words for word).
pub const MAX_LENGTH: usize = 4096;

/// Output path meaning "standard output".
pub const STDOUT_PATH: &str = "-";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_WORDS: &str = "GENPASS_WORDS";
pub const ENV_BAD_WORDS: &str = "GENPASS_BAD_WORDS";
pub const ENV_SEPARATOR: &str = "GENPASS_SEPARATOR";
pub const ENV_LOG: &str = "GENPASS_LOG";

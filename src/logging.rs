//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr so they never mix with secrets written to stdout.

use tracing_subscriber::EnvFilter;

use crate::constants::ENV_LOG;
use crate::env::Env;

/// Filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `GENPASS_LOG` takes precedence over `-v`.
pub fn init(verbosity: u8, env: &Env) {
    let directive = env
        .get(ENV_LOG)
        .unwrap_or_else(|| level_for(verbosity).to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| {
        eprintln!("Warning: ignoring invalid {ENV_LOG} value: {directive}");
        EnvFilter::new(level_for(verbosity))
    });

    // A subscriber may already be installed (e.g. in tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

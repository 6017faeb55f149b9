//! Output rendering: `key=value` lines to a file or stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::generator::GeneratedSecret;

/// Errors while writing the output.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    Stdout(std::io::Error),
}

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `None` and `-` mean stdout.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p != Path::new(crate::constants::STDOUT_PATH) => {
                Destination::File(p.to_path_buf())
            }
            _ => Destination::Stdout,
        }
    }
}

/// A single line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Secret(GeneratedSecret),
    /// A template comment or blank line echoed as-is.
    Verbatim(String),
}

impl From<GeneratedSecret> for OutputLine {
    fn from(secret: GeneratedSecret) -> Self {
        OutputLine::Secret(secret)
    }
}

/// Render lines, each terminated by `\n`.
pub fn render(lines: &[OutputLine]) -> String {
    let mut out = String::new();
    for line in lines {
        match line {
            OutputLine::Secret(s) => {
                out.push_str(&s.key);
                out.push('=');
                out.push_str(&s.value);
            }
            OutputLine::Verbatim(text) => out.push_str(text),
        }
        out.push('\n');
    }
    out
}

/// Write rendered output in one shot.
///
/// Files are written to a sibling temporary file and renamed over the
/// destination, so a failed run never leaves a half-written secrets file.
/// The temporary file is created with owner-only permissions on Unix.
pub fn write_output(dest: &Destination, contents: &str) -> Result<(), OutputError> {
    match dest {
        Destination::Stdout => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(contents.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(OutputError::Stdout)
        }
        Destination::File(path) => {
            write_file_atomic(path, contents).map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })
        }
    }
}

fn write_file_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

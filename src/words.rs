//! Dictionary loading for passphrase generation.
//!
//! The pool is built once per run from a newline-delimited words file and
//! an optional bad-words file. Every trimmed, non-blank line is a word;
//! exclusion is an exact match.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors while loading word lists.
#[derive(Error, Debug)]
pub enum WordsError {
    #[error("`--words` file not found: {0}")]
    WordsNotFound(PathBuf),

    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Dictionary words and the words excluded from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    /// Dictionary words, deduplicated, in file order.
    pub words: IndexSet<String>,
    pub excluded: HashSet<String>,
}

impl WordPool {
    /// Build a pool from in-memory list contents.
    pub fn from_lists(words: &str, excluded: Option<&str>) -> Self {
        Self {
            words: non_blank_lines(words).collect(),
            excluded: excluded
                .map(|text| non_blank_lines(text).collect())
                .unwrap_or_default(),
        }
    }

    /// Load the pool from disk.
    ///
    /// The words file is required. The bad-words file is optional: a missing
    /// one is logged and treated as empty, other read errors still fail.
    pub fn load(words_path: &Path, bad_words_path: Option<&Path>) -> Result<Self, WordsError> {
        let words = read_list(words_path)?
            .ok_or_else(|| WordsError::WordsNotFound(words_path.to_path_buf()))?;
        let excluded = match bad_words_path {
            Some(path) => {
                let list = read_list(path)?;
                if list.is_none() {
                    warn!(path = %path.display(), "bad-words file not found");
                }
                list
            }
            None => None,
        };

        let pool = Self::from_lists(&words, excluded.as_deref());
        debug!(
            words = pool.words.len(),
            excluded = pool.excluded.len(),
            effective = pool.effective().len(),
            path = %words_path.display(),
            "loaded word pool"
        );
        Ok(pool)
    }

    /// Words minus excluded words, in dictionary order.
    pub fn effective(&self) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| !self.excluded.contains(w.as_str()))
            .map(String::as_str)
            .collect()
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
}

/// Read a list file; `Ok(None)` when it does not exist.
fn read_list(path: &Path) -> Result<Option<String>, WordsError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(WordsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_non_blank_line() {
        let list = "Alpha\n\n  café  \nnaïve\napple's\nwell-known\n   \n";
        let pool = WordPool::from_lists(list, None);
        let words: Vec<_> = pool.words.iter().map(String::as_str).collect();
        assert_eq!(words, vec!["Alpha", "café", "naïve", "apple's", "well-known"]);
    }

    #[test]
    fn duplicates_collapse() {
        let pool = WordPool::from_lists("kiwi\nkiwi\nlime\n", None);
        assert_eq!(pool.words.len(), 2);
    }

    #[test]
    fn excluded_words_leave_the_effective_pool() {
        let pool = WordPool::from_lists("alpha\nbeta\ngamma\n", Some("beta\n\n gamma \n"));
        assert_eq!(pool.effective(), vec!["alpha"]);
    }

    #[test]
    fn exclusion_is_exact_match() {
        let pool = WordPool::from_lists("Alpha\nalpha\n", Some("alpha\n"));
        assert_eq!(pool.effective(), vec!["Alpha"]);
    }

    #[test]
    fn excluding_everything_empties_the_pool() {
        let list = "bla\nblabla\n";
        let pool = WordPool::from_lists(list, Some(list));
        assert!(pool.effective().is_empty());
    }

    #[test]
    fn load_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words");
        let bad = dir.path().join("bad");
        std::fs::write(&words, "one\ntwo\nthree\n").unwrap();
        std::fs::write(&bad, "two\n").unwrap();

        let pool = WordPool::load(&words, Some(bad.as_path())).unwrap();
        assert_eq!(pool.effective(), vec!["one", "three"]);
    }

    #[test]
    fn missing_words_file_is_reported() {
        let err = WordPool::load(Path::new("/this/file/does/not/exist"), None).unwrap_err();
        assert!(matches!(err, WordsError::WordsNotFound(_)));
        assert!(err.to_string().contains("`--words` file not found"));
    }

    #[test]
    fn missing_bad_words_file_excludes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words");
        std::fs::write(&words, "one\ntwo\n").unwrap();

        let missing = dir.path().join("nope");
        let pool = WordPool::load(&words, Some(missing.as_path())).unwrap();
        assert!(pool.excluded.is_empty());
        assert_eq!(pool.effective(), vec!["one", "two"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_bad_words_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words");
        std::fs::write(&words, "one\n").unwrap();

        // A directory exists but cannot be read as a list.
        let err = WordPool::load(&words, Some(dir.path())).unwrap_err();
        assert!(matches!(err, WordsError::Read { .. }));
    }
}

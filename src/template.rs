//! Template parsing.
//!
//! A template is a text file of `key=length:kind` lines. Blank lines and
//! lines whose first non-whitespace character is `#` are trivia: they
//! produce no record but are kept so they can optionally be echoed into
//! the output at their original position.
//!
//! Parsing is pure and fails fast on the first malformed line.

use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

use crate::constants::MAX_LENGTH;

/// Generation strategy requested by a template line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Lowercase hexadecimal encoding of `length` random bytes.
    Hex,
    /// Padded standard base64 encoding of `length` random bytes.
    Base64,
    /// Passphrase of `length` dictionary words.
    Word,
}

/// One parsed `key=length:kind` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRecord {
    pub key: String,
    /// Byte count for `hex`/`base64`, word count for `word`. Always >= 1.
    pub length: usize,
    pub kind: Kind,
}

/// A line of the template, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Record(TemplateRecord),
    /// Blank or comment line, stored without its line terminator.
    Trivia(String),
}

/// A fully parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub entries: Vec<Entry>,
}

impl Template {
    /// Records in file order, skipping trivia.
    pub fn records(&self) -> impl Iterator<Item = &TemplateRecord> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Record(r) => Some(r),
            Entry::Trivia(_) => None,
        })
    }

    /// Whether any record requests a word passphrase.
    pub fn needs_words(&self) -> bool {
        self.records().any(|r| r.kind == Kind::Word)
    }
}

/// Why a template line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected `key=length:kind`, no `=` found")]
    MissingEquals,

    #[error("key is empty")]
    EmptyKey,

    #[error("expected `length:kind` after `=`, no `:` found")]
    MissingColon,

    #[error("expected exactly one `:` after `=`")]
    TooManyFields,

    #[error("length `{0}` is not a positive integer")]
    InvalidLength(String),

    #[error("length {length} exceeds the maximum of {max}")]
    LengthTooLarge { length: usize, max: usize },

    #[error("kind `{0}` is not 'hex', 'base64' or 'word'")]
    UnknownKind(String),
}

/// A malformed template line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}: `{content}`")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// The raw line, without its terminator.
    pub content: String,
    pub reason: ParseErrorKind,
}

/// Parse the full text of a template.
pub fn parse_template(text: &str) -> Result<Template, ParseError> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            entries.push(Entry::Trivia(raw.to_string()));
            continue;
        }
        let record = parse_line(trimmed).map_err(|reason| ParseError {
            line: idx + 1,
            content: raw.to_string(),
            reason,
        })?;
        entries.push(Entry::Record(record));
    }
    Ok(Template { entries })
}

/// Parse a template and keep only its records.
pub fn parse_records(text: &str) -> Result<Vec<TemplateRecord>, ParseError> {
    let template = parse_template(text)?;
    Ok(template.records().cloned().collect())
}

fn parse_line(line: &str) -> Result<TemplateRecord, ParseErrorKind> {
    let (key, params) = line.split_once('=').ok_or(ParseErrorKind::MissingEquals)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseErrorKind::EmptyKey);
    }

    let (length, kind) = params.split_once(':').ok_or(ParseErrorKind::MissingColon)?;
    if kind.contains(':') {
        return Err(ParseErrorKind::TooManyFields);
    }

    let length = length.trim();
    let length = match length.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => return Err(ParseErrorKind::InvalidLength(length.to_string())),
    };
    if length > MAX_LENGTH {
        return Err(ParseErrorKind::LengthTooLarge {
            length,
            max: MAX_LENGTH,
        });
    }

    let kind = kind.trim();
    let kind = Kind::from_str(kind)
        .map_err(|_| ParseErrorKind::UnknownKind(kind.to_string()))?;

    Ok(TemplateRecord {
        key: key.to_string(),
        length,
        kind,
    })
}

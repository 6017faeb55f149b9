//! End-to-end generation: parse → load words (if needed) → generate → render.
//!
//! Every step fails fast. Nothing is written until all values have been
//! generated, so an error never leaves partial output behind.

use std::path::PathBuf;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, check_separator};
use crate::generator::{GenerateError, SecretGenerator};
use crate::render::{self, Destination, OutputError, OutputLine};
use crate::template::{self, Entry, ParseError, Template};
use crate::words::{WordPool, WordsError};

/// Any failure during a run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to read template {path}: {source}")]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Words(#[from] WordsError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fully resolved options for one run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub template: PathBuf,
    pub output: Destination,
    pub words: PathBuf,
    pub bad_words: Option<PathBuf>,
    pub separator: String,
    pub keep_comments: bool,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Number of `key=value` lines produced.
    pub secrets: usize,
    /// Estimated entropy of the weakest generated value, in bits.
    pub min_entropy_bits: Option<f64>,
}

/// Generate the output for `options.template` and write it.
pub fn generate_file(options: &GenerateOptions) -> Result<Outcome, RunError> {
    check_separator(&options.separator)?;

    let path = &options.template;
    let text = std::fs::read_to_string(path).map_err(|source| RunError::ReadTemplate {
        path: path.clone(),
        source,
    })?;
    let template = template::parse_template(&text)?;

    let pool = if template.needs_words() {
        let bad_words = options.bad_words.as_deref();
        Some(WordPool::load(&options.words, bad_words)?)
    } else {
        debug!("no word records, skipping word list");
        None
    };

    let (lines, outcome) = generate_lines(
        &template,
        pool.as_ref(),
        &options.separator,
        options.keep_comments,
        OsRng,
    )?;
    render::write_output(&options.output, &render::render(&lines))?;

    info!(secrets = outcome.secrets, "wrote secrets");
    Ok(outcome)
}

/// Generate rendered output for in-memory template text.
pub fn generate_str(
    text: &str,
    pool: Option<&WordPool>,
    separator: &str,
    keep_comments: bool,
) -> Result<String, RunError> {
    check_separator(separator)?;
    let template = template::parse_template(text)?;
    let (lines, _) = generate_lines(&template, pool, separator, keep_comments, OsRng)?;
    Ok(render::render(&lines))
}

/// Generate one output line per record, in template order.
pub fn generate_lines<R: RngCore + CryptoRng>(
    template: &Template,
    pool: Option<&WordPool>,
    separator: &str,
    keep_comments: bool,
    rng: R,
) -> Result<(Vec<OutputLine>, Outcome), RunError> {
    let mut generator = SecretGenerator::new(rng);
    if let Some(pool) = pool {
        generator = generator.with_words(pool, separator);
    }

    let mut lines: Vec<OutputLine> = Vec::with_capacity(template.entries.len());
    let mut outcome = Outcome::default();
    for entry in &template.entries {
        match entry {
            Entry::Record(record) => {
                let secret = generator.generate(record)?;
                let bits = generator.entropy_bits(record);
                debug!(key = %record.key, kind = %record.kind, bits, "generated secret");

                outcome.secrets += 1;
                outcome.min_entropy_bits =
                    Some(outcome.min_entropy_bits.map_or(bits, |m| m.min(bits)));
                lines.push(secret.into());
            }
            Entry::Trivia(text) if keep_comments => {
                lines.push(OutputLine::Verbatim(text.clone()));
            }
            Entry::Trivia(_) => {}
        }
    }
    Ok((lines, outcome))
}

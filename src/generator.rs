//! Secret generation.
//!
//! Dispatches each [`TemplateRecord`] to one of three strategies. All
//! randomness comes from an RNG bounded by [`CryptoRng`]; production code
//! passes [`rand::rngs::OsRng`].

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use crate::template::{Kind, TemplateRecord};
use crate::words::WordPool;

/// Errors from secret generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no words available to generate `{key}`: word list is empty or fully excluded")]
    EmptyPool { key: String },
}

/// A generated `key=value` pair.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedSecret {
    pub key: String,
    pub value: String,
}

impl fmt::Debug for GeneratedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedSecret")
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Produces secret values from template records.
pub struct SecretGenerator<'a, R> {
    rng: R,
    words: Vec<&'a str>,
    separator: String,
}

impl<'a, R: RngCore + CryptoRng> SecretGenerator<'a, R> {
    /// A generator without a word pool. `word` records fail with
    /// [`GenerateError::EmptyPool`] until one is attached.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            words: Vec::new(),
            separator: crate::constants::DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Attach a word pool and the separator used to join passphrase words.
    pub fn with_words(mut self, pool: &'a WordPool, separator: impl Into<String>) -> Self {
        self.words = pool.effective();
        self.separator = separator.into();
        self
    }

    /// Generate the value for a single record.
    pub fn generate(&mut self, record: &TemplateRecord) -> Result<GeneratedSecret, GenerateError> {
        let value = match record.kind {
            Kind::Hex => hex::encode(self.random_bytes(record.length)),
            Kind::Base64 => STANDARD.encode(self.random_bytes(record.length)),
            Kind::Word => self.passphrase(record)?,
        };
        Ok(GeneratedSecret {
            key: record.key.clone(),
            value,
        })
    }

    /// Estimated entropy of a value generated for `record`, in bits.
    pub fn entropy_bits(&self, record: &TemplateRecord) -> f64 {
        match record.kind {
            Kind::Hex | Kind::Base64 => 8.0 * record.length as f64,
            Kind::Word if self.words.is_empty() => 0.0,
            Kind::Word => record.length as f64 * (self.words.len() as f64).log2(),
        }
    }

    fn random_bytes(&mut self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    fn passphrase(&mut self, record: &TemplateRecord) -> Result<String, GenerateError> {
        let empty = || GenerateError::EmptyPool {
            key: record.key.clone(),
        };
        if self.words.is_empty() {
            return Err(empty());
        }

        let mut chosen = Vec::with_capacity(record.length);
        for _ in 0..record.length {
            let word = self.words.choose(&mut self.rng).ok_or_else(empty)?;
            chosen.push(*word);
        }
        Ok(chosen.join(self.separator.as_str()))
    }
}

//! A bare text record to store in an index.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// A piece of text with a relevance score.
///
/// Records compare and hash by text and score, so they can be stored in a
/// trie's value sets. Scores are always finite, which keeps that equality
/// lawful.
#[derive(Debug, Clone)]
pub struct Record {
    text: String,
    score: f64,
}

impl Record {
    /// Creates a record with a score of zero.
    pub fn new(text: impl Into<String>) -> Self {
        Record {
            text: text.into(),
            score: 0.0,
        }
    }

    /// Creates a record with the given score.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScore`] if `score` is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::Record;
    ///
    /// let record = Record::with_score("Haskell", 2.5).unwrap();
    /// assert_eq!(record.score(), 2.5);
    ///
    /// assert!(Record::with_score("Haskell", f64::NAN).is_err());
    /// ```
    pub fn with_score(text: impl Into<String>, score: f64) -> Result<Self> {
        let text = text.into();
        if !score.is_finite() {
            return Err(Error::InvalidScore { text, score });
        }

        // -0.0 and 0.0 compare equal, so they must hash the same
        let score = if score == 0.0 { 0.0 } else { score };
        Ok(Record { text, score })
    }

    /// Returns the record's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the record's score, zero unless one was given.
    pub fn score(&self) -> f64 {
        self.score
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.score.to_bits() == other.score.to_bits()
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.score.to_bits().hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

//! Errors returned by the fallible constructors of this crate.
//!
//! Trie operations themselves never fail.

use thiserror::Error;

/// Errors that can occur when building values for an index
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A record score was NaN or infinite
    #[error("invalid score {score} for record {text:?}: scores must be finite")]
    InvalidScore { text: String, score: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

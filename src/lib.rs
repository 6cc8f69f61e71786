//! # Prefix Index
//!
//! A character-keyed hash trie mapping string keys to sets of values, built for
//! autocomplete-style lookup.
//!
//! Each key is a path from the root, one character per level. The node a key
//! ends at holds the set of values stored under that exact key, so a prefix
//! query only has to find one node and gather everything beneath it.
//!
//! ## Features
//!
//! - **Exact and prefix lookup**: `get_all` for one key, `get_any` for every
//!   key starting with a fragment
//! - **Set semantics**: storing a value twice under one key is a no-op
//! - **Eager pruning**: removals detach nodes they leave empty, so the tree
//!   never keeps dead branches around
//! - **Prefix Views**: borrow the subtree under a fragment and iterate it
//!   lazily instead of copying it into a set
//! - **Pluggable key units**: branch per `char` (default) or per UTF-8 byte
//!
//! The trie does no normalization of its own: callers decide how raw text
//! becomes keys (case folding, tokenizing) and how results are ranked.
//!
//! ## Example
//!
//! ```rust
//! use prefix_index::{Index, StringTrie};
//!
//! let mut trie = StringTrie::new();
//!
//! trie.put("cat", 1);
//! trie.put("car", 2);
//! trie.put("dog", 3);
//!
//! // Exact lookup
//! assert_eq!(trie.get_all("cat").len(), 1);
//!
//! // Prefix lookup
//! assert_eq!(trie.get_any("ca").len(), 2);
//!
//! // Removing the last value under a key prunes its branch
//! trie.remove("cat");
//! assert_eq!(trie.len(), 2);
//! ```

mod error;
mod index;
mod key_converter;
mod node;
mod prefix_view;
mod record;
mod trie;

// Re-export public types
pub use crate::error::{Error, Result};
pub use crate::index::{Index, PrefixIndex};
pub use crate::key_converter::{ByteUnits, CharUnits, KeyUnits};
pub use crate::prefix_view::{PrefixView, Values};
pub use crate::record::Record;
pub use crate::trie::{HashTrie, StringTrie};

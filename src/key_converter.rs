//! Defines how a `&str` key is split into the units the trie branches on.
use std::fmt::Debug;
use std::hash::Hash;

/// A trait for types that split a string key into trie units.
///
/// Each unit produced by [`KeyUnits::units`] consumes exactly one level of the
/// trie, so the choice of converter decides the fan-out of every node.
pub trait KeyUnits {
    /// The unit a single trie edge is labelled with.
    type Unit: Copy + Eq + Hash + Debug;

    /// Iterator over the units of a borrowed key.
    type Units<'a>: Iterator<Item = Self::Unit>;

    /// Splits `key` into its units, in order.
    fn units(key: &str) -> Self::Units<'_>;
}

/// Splits keys into Unicode scalar values. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharUnits;

impl KeyUnits for CharUnits {
    type Unit = char;
    type Units<'a> = std::str::Chars<'a>;

    fn units(key: &str) -> Self::Units<'_> {
        key.chars()
    }
}

/// Splits keys into their UTF-8 bytes.
///
/// A prefix lookup with a fragment that ends inside a multi-byte character
/// still matches, since the trie only sees bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteUnits;

impl KeyUnits for ByteUnits {
    type Unit = u8;
    type Units<'a> = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn units(key: &str) -> Self::Units<'_> {
        key.as_bytes().iter().copied()
    }
}

//! The index contract callers program against.
//!
//! `Index` exposes every mutation in two granularities: a collection form that
//! implementors provide, and a single-value form provided here in terms of it.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::iter;

use crate::key_converter::KeyUnits;
use crate::trie::HashTrie;

/// A mapping from string keys to sets of values.
///
/// Absent keys and values are never errors: lookups come back empty and
/// mutations report `false`.
pub trait Index<V> {
    /// Removes everything from the index.
    fn clear(&mut self);

    /// Returns a copy of the values stored at exactly `key`.
    fn get_all(&self, key: &str) -> HashSet<V>;

    /// Returns `true` if the index holds no values.
    fn is_empty(&self) -> bool;

    /// Returns the number of key/value associations.
    fn len(&self) -> usize;

    /// Associates all `values` with `key`. Returns `true` if anything was added.
    fn put_all<I>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = V>;

    /// Removes and returns every value stored at exactly `key`.
    fn remove(&mut self, key: &str) -> HashSet<V>;

    /// Removes `values` from `key`. Returns `true` if anything was removed.
    fn remove_all<I, Q>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<V>;

    /// Removes `values` from every key. Returns `true` if anything was removed.
    fn purge_all<I, Q>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<V>;

    /// Associates a single `value` with `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::{Index, StringTrie};
    ///
    /// let mut trie = StringTrie::new();
    /// assert!(trie.put("cat", 1));
    /// assert!(!trie.put("cat", 1));
    /// ```
    fn put(&mut self, key: &str, value: V) -> bool {
        self.put_all(key, iter::once(value))
    }

    /// Removes a single `value` from `key`.
    fn remove_value(&mut self, key: &str, value: &V) -> bool {
        self.remove_all(key, iter::once(value))
    }

    /// Removes a single `value` from every key that holds it.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::{Index, StringTrie};
    ///
    /// let mut trie = StringTrie::new();
    /// trie.put("cat", 1);
    /// trie.put("kitten", 1);
    ///
    /// assert!(trie.purge(&1));
    /// assert!(trie.is_empty());
    /// assert!(!trie.purge(&1));
    /// ```
    fn purge(&mut self, value: &V) -> bool {
        self.purge_all(iter::once(value))
    }
}

/// An index that can also answer prefix queries.
pub trait PrefixIndex<V>: Index<V> {
    /// Returns every value stored under a key that starts with `fragment`.
    fn get_any(&self, fragment: &str) -> HashSet<V>;
}

impl<V, C> Index<V> for HashTrie<V, C>
where
    V: Clone + Eq + Hash,
    C: KeyUnits,
{
    fn clear(&mut self) {
        HashTrie::clear(self)
    }

    fn get_all(&self, key: &str) -> HashSet<V> {
        HashTrie::get_all(self, key)
    }

    fn is_empty(&self) -> bool {
        HashTrie::is_empty(self)
    }

    fn len(&self) -> usize {
        HashTrie::len(self)
    }

    fn put_all<I>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = V>,
    {
        HashTrie::put_all(self, key, values)
    }

    fn remove(&mut self, key: &str) -> HashSet<V> {
        HashTrie::remove(self, key)
    }

    fn remove_all<I, Q>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<V>,
    {
        HashTrie::remove_all(self, key, values)
    }

    fn purge_all<I, Q>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<V>,
    {
        HashTrie::purge_all(self, values)
    }
}

impl<V, C> PrefixIndex<V> for HashTrie<V, C>
where
    V: Clone + Eq + Hash,
    C: KeyUnits,
{
    fn get_any(&self, fragment: &str) -> HashSet<V> {
        HashTrie::get_any(self, fragment)
    }
}

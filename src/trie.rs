//! The main trie implementation.
//!
//! This module contains the `HashTrie` type, which maps string keys to sets of
//! values and answers both exact-key and prefix queries.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;
use std::marker::PhantomData;

use log::debug;
use once_cell::sync::OnceCell;

use crate::key_converter::{CharUnits, KeyUnits};
use crate::node::Node;
use crate::prefix_view::PrefixView;

/// A mutable, character-keyed trie mapping each key to a set of values.
///
/// Every key addresses a path from the root, one unit per level (a `char` with
/// the default [`CharUnits`] converter). The node at the end of the path holds
/// the set of values associated with that exact key. Nodes left with neither
/// children nor values are pruned as soon as a removal empties them.
///
/// The trie is not internally synchronized. Wrap it in a lock to share it
/// between threads.
pub struct HashTrie<V, C: KeyUnits = CharUnits> {
    /// The root node of the trie, addressed by the empty key
    pub(crate) root: Node<C::Unit, V>,

    /// Cached number of values stored in the trie
    ///
    /// Calculated lazily by walking every node, dropped on every mutation
    /// that changed something.
    size: OnceCell<usize>,

    /// Phantom data to carry the key converter type
    _converter: PhantomData<C>,
}

/// A hash trie whose keys are split into Unicode scalar values.
pub type StringTrie<V> = HashTrie<V, CharUnits>;

impl<V, C: KeyUnits> HashTrie<V, C> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::StringTrie;
    ///
    /// let trie = StringTrie::<u32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        HashTrie {
            root: Node::new(),
            size: OnceCell::with_value(0),
            _converter: PhantomData,
        }
    }

    /// Returns the number of key/value associations stored in the trie.
    ///
    /// A value stored under two keys counts twice. The first call after a
    /// mutation walks the whole trie; later calls are answered from a cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::{Index, StringTrie};
    ///
    /// let mut trie = StringTrie::new();
    /// trie.put("cat", 1);
    /// trie.put("car", 1);
    /// assert_eq!(trie.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        *self.size.get_or_init(|| self.root.subtree_size())
    }

    /// Returns `true` if the trie stores no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Discards every node, leaving a single empty root.
    pub fn clear(&mut self) {
        debug!(
            "clearing trie with {} direct children of the root",
            self.root.children.len()
        );
        self.root = Node::new();
        self.size = OnceCell::with_value(0);
    }

    fn invalidate_size(&mut self) {
        self.size.take();
    }

    // Walks the path for `key` and returns the node it ends at, if the whole
    // path exists.
    pub(crate) fn find(&self, key: &str) -> Option<&Node<C::Unit, V>> {
        let mut current = &self.root;

        for unit in C::units(key) {
            current = current.children.get(&unit)?;
        }

        Some(current)
    }

    /// Creates a view of the subtree under `fragment`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::{Index, StringTrie};
    ///
    /// let mut trie = StringTrie::new();
    /// trie.put("hello", 1);
    /// trie.put("help", 2);
    ///
    /// let view = trie.view("hel");
    /// assert!(view.exists());
    /// assert_eq!(view.len(), 2);
    /// ```
    pub fn view(&self, fragment: &str) -> PrefixView<'_, V, C> {
        PrefixView::new(fragment, self.find(fragment))
    }

    /// Returns `true` if at least one value is stored at exactly `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).map_or(false, |node| !node.values.is_empty())
    }

    /// Returns `true` if some stored key starts with `fragment`.
    ///
    /// The empty fragment only matches when the trie is not empty.
    pub fn contains_prefix(&self, fragment: &str) -> bool {
        self.find(fragment).map_or(false, |node| !node.is_empty())
    }
}

impl<V, C> HashTrie<V, C>
where
    V: Eq + Hash,
    C: KeyUnits,
{
    /// Returns a copy of the values stored at exactly `key`.
    ///
    /// The result is empty if no such key was ever stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::{Index, StringTrie};
    ///
    /// let mut trie = StringTrie::new();
    /// trie.put("cat", 1);
    ///
    /// assert!(trie.get_all("cat").contains(&1));
    /// assert!(trie.get_all("ca").is_empty());
    /// ```
    pub fn get_all(&self, key: &str) -> HashSet<V>
    where
        V: Clone,
    {
        self.find(key)
            .map(|node| node.values.clone())
            .unwrap_or_default()
    }

    /// Returns every value stored under any key that starts with `fragment`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::{Index, StringTrie};
    ///
    /// let mut trie = StringTrie::new();
    /// trie.put("cat", 1);
    /// trie.put("car", 2);
    /// trie.put("dog", 3);
    ///
    /// let found = trie.get_any("ca");
    /// assert_eq!(found.len(), 2);
    /// assert!(found.contains(&1) && found.contains(&2));
    /// ```
    pub fn get_any(&self, fragment: &str) -> HashSet<V>
    where
        V: Clone,
    {
        self.view(fragment).to_set()
    }

    /// Associates every value in `values` with `key`.
    ///
    /// Missing nodes along the path are created. Returns `true` if at least
    /// one value was not already stored at `key`. An empty `values` leaves the
    /// trie untouched.
    pub fn put_all<I>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return false;
        }

        let mut current = &mut self.root;
        for unit in C::units(key) {
            current = current.children.entry(unit).or_default();
        }

        let changed = current.insert_values(values);
        if changed {
            self.invalidate_size();
        }
        changed
    }

    /// Removes and returns the whole value set stored at exactly `key`.
    ///
    /// Nodes on the path that are left empty are pruned. The result is empty
    /// if the key was not stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_index::{Index, StringTrie};
    ///
    /// let mut trie = StringTrie::new();
    /// trie.put("cat", 1);
    /// trie.put("car", 2);
    ///
    /// assert!(trie.remove("cat").contains(&1));
    /// assert_eq!(trie.len(), 1);
    /// assert!(trie.remove("cat").is_empty());
    /// ```
    pub fn remove(&mut self, key: &str) -> HashSet<V> {
        let removed = self
            .root
            .edit_path(C::units(key), |node| std::mem::take(&mut node.values))
            .unwrap_or_default();
        if !removed.is_empty() {
            self.invalidate_size();
        }
        removed
    }

    /// Removes the given values from the set stored at exactly `key`.
    ///
    /// Returns `true` if any of them was stored there. If the set becomes
    /// empty, nodes on the path left empty are pruned.
    pub fn remove_all<I, Q>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<V>,
    {
        let changed = self
            .root
            .edit_path(C::units(key), |node| node.remove_values(values))
            .unwrap_or(false);
        if changed {
            self.invalidate_size();
        }
        changed
    }

    /// Removes every given value from every key in the trie.
    ///
    /// Every node is visited. Returns `true` if at least one association was
    /// removed anywhere.
    pub fn purge_all<I, Q>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<V>,
    {
        let targets: Vec<Q> = values.into_iter().collect();
        if targets.is_empty() {
            return false;
        }

        let changed_nodes = self.root.purge(&targets);
        debug!(
            "purged {} value(s) from {} node(s)",
            targets.len(),
            changed_nodes
        );

        if changed_nodes > 0 {
            self.invalidate_size();
        }
        changed_nodes > 0
    }
}

// Default implementation
impl<V, C: KeyUnits> Default for HashTrie<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: KeyUnits> Clone for HashTrie<V, C> {
    fn clone(&self) -> Self {
        HashTrie {
            root: self.root.clone(),
            size: self.size.clone(),
            _converter: PhantomData,
        }
    }
}

impl<V: fmt::Debug, C: KeyUnits> fmt::Debug for HashTrie<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTrie")
            .field("root", &self.root)
            .finish()
    }
}

// Two tries are equal when they store the same values under the same keys.
// Pruning keeps the node structure canonical, so comparing nodes is enough.
impl<V, C> PartialEq for HashTrie<V, C>
where
    V: Eq + Hash,
    C: KeyUnits,
{
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<V, C> Eq for HashTrie<V, C>
where
    V: Eq + Hash,
    C: KeyUnits,
{
}

impl<K, V, C> FromIterator<(K, V)> for HashTrie<V, C>
where
    K: AsRef<str>,
    V: Eq + Hash,
    C: KeyUnits,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut trie = HashTrie::new();
        trie.extend(iter);
        trie
    }
}

impl<K, V, C> Extend<(K, V)> for HashTrie<V, C>
where
    K: AsRef<str>,
    V: Eq + Hash,
    C: KeyUnits,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put_all(key.as_ref(), std::iter::once(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_converter::ByteUnits;

    fn sample() -> StringTrie<u32> {
        vec![("cat", 1), ("car", 2), ("dog", 3)].into_iter().collect()
    }

    fn set(values: &[u32]) -> HashSet<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_new_trie() {
        let trie: StringTrie<u32> = HashTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert!(trie.get_any("").is_empty());
    }

    #[test]
    fn test_concrete_scenario() {
        let mut trie = sample();

        assert_eq!(trie.get_all("cat"), set(&[1]));
        assert_eq!(trie.get_any("ca"), set(&[1, 2]));
        assert_eq!(trie.get_any("c"), set(&[1, 2]));
        assert_eq!(trie.get_any("do"), set(&[3]));
        assert!(trie.get_any("z").is_empty());
        assert_eq!(trie.len(), 3);

        assert_eq!(trie.remove("cat"), set(&[1]));
        assert_eq!(trie.get_any("ca"), set(&[2]));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_get_all_is_exact() {
        let trie = sample();

        assert!(trie.get_all("ca").is_empty());
        assert!(trie.get_all("cats").is_empty());
        assert!(trie.get_all("").is_empty());
    }

    #[test]
    fn test_returned_sets_are_copies() {
        let trie = sample();

        let mut found = trie.get_all("cat");
        found.insert(99);
        let mut any = trie.get_any("c");
        any.clear();

        assert_eq!(trie.get_all("cat"), set(&[1]));
        assert_eq!(trie.get_any("c"), set(&[1, 2]));
    }

    #[test]
    fn test_put_reports_change() {
        let mut trie: StringTrie<u32> = HashTrie::new();

        assert!(trie.put_all("key", vec![1, 2]));
        assert!(!trie.put_all("key", vec![2, 1]));
        assert!(trie.put_all("key", vec![2, 3]));
        assert_eq!(trie.get_all("key"), set(&[1, 2, 3]));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_put_empty_collection_creates_no_nodes() {
        let mut trie: StringTrie<u32> = HashTrie::new();

        assert!(!trie.put_all("ghost", Vec::new()));
        assert!(trie.is_empty());
        assert!(trie.root.children.is_empty());
    }

    #[test]
    fn test_empty_key_addresses_root() {
        let mut trie: StringTrie<u32> = HashTrie::new();

        assert!(trie.put_all("", vec![7]));
        assert!(!trie.is_empty());
        assert_eq!(trie.get_all(""), set(&[7]));

        trie.put_all("a", vec![8]);
        assert_eq!(trie.get_any(""), set(&[7, 8]));

        assert_eq!(trie.remove(""), set(&[7]));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_remove_prunes_path() {
        let mut trie: StringTrie<u32> = HashTrie::new();
        trie.put_all("abc", vec![1]);
        trie.put_all("abcde", vec![2]);

        assert_eq!(trie.remove("abcde"), set(&[2]));

        // 'd' and 'e' are gone, "abc" is intact
        let c = trie.find("abc").unwrap();
        assert!(c.children.is_empty());
        assert_eq!(trie.get_all("abc"), set(&[1]));

        assert_eq!(trie.remove("abc"), set(&[1]));
        assert!(trie.root.children.is_empty());
        assert!(trie.is_empty());
    }

    #[test]
    fn test_remove_stops_at_non_empty_ancestor() {
        let mut trie: StringTrie<u32> = HashTrie::new();
        trie.put_all("ab", vec![1]);
        trie.put_all("abx", vec![2]);
        trie.put_all("aby", vec![3]);

        trie.remove("abx");

        assert!(trie.find("abx").is_none());
        assert!(trie.find("aby").is_some());
        assert_eq!(trie.get_any("ab"), set(&[1, 3]));
    }

    #[test]
    fn test_remove_nonexistent() {
        let mut trie = sample();

        assert!(trie.remove("ca").is_empty());
        assert!(trie.remove("cow").is_empty());
        assert!(trie.remove("cattle").is_empty());
        assert_eq!(trie.len(), 3);
        // "ca" is an interior node and must survive
        assert_eq!(trie.get_any("ca"), set(&[1, 2]));
    }

    #[test]
    fn test_remove_all_values() {
        let mut trie: StringTrie<u32> = HashTrie::new();
        trie.put_all("key", vec![1, 2, 3]);

        assert!(trie.remove_all("key", &[1u32, 9]));
        assert!(!trie.remove_all("key", &[1u32]));
        assert!(!trie.remove_all("other", &[2u32]));
        assert_eq!(trie.get_all("key"), set(&[2, 3]));

        assert!(trie.remove_all("key", vec![2u32, 3]));
        assert!(trie.is_empty());
        assert!(trie.root.children.is_empty());
    }

    #[test]
    fn test_purge_all() {
        let mut trie: StringTrie<u32> = HashTrie::new();
        trie.put_all("cat", vec![1, 2]);
        trie.put_all("car", vec![1]);
        trie.put_all("dog", vec![1, 3]);

        assert!(trie.purge_all(vec![1u32]));
        assert_eq!(trie.len(), 2);
        assert!(trie.find("car").is_none());
        assert_eq!(trie.get_any(""), set(&[2, 3]));

        assert!(!trie.purge_all(vec![1u32]));
        assert!(!trie.purge_all(Vec::<u32>::new()));
    }

    #[test]
    fn test_clear() {
        let mut trie = sample();
        trie.clear();

        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert!(trie.get_any("c").is_empty());

        trie.put_all("cat", vec![4]);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_size_cache_tracks_mutations() {
        let mut trie = sample();
        assert_eq!(trie.len(), 3);

        trie.put_all("cow", vec![4]);
        assert_eq!(trie.len(), 4);
        trie.remove_all("cow", &[4u32]);
        assert_eq!(trie.len(), 3);
        trie.purge_all(vec![3u32]);
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_insert_then_remove_restores_structure() {
        let original = sample();
        let mut trie = original.clone();

        trie.put_all("cartography", vec![10]);
        trie.put_all("zebra", vec![11]);
        assert_ne!(trie, original);

        trie.remove("cartography");
        trie.remove_all("zebra", &[11u32]);
        assert_eq!(trie, original);
    }

    #[test]
    fn test_contains_key_and_prefix() {
        let trie = sample();

        assert!(trie.contains_key("cat"));
        assert!(!trie.contains_key("ca"));
        assert!(trie.contains_prefix("ca"));
        assert!(trie.contains_prefix(""));
        assert!(!trie.contains_prefix("cats"));
        assert!(!StringTrie::<u32>::new().contains_prefix(""));
    }

    #[test]
    fn test_unicode_keys() {
        let mut trie: StringTrie<u32> = HashTrie::new();
        trie.put_all("café", vec![1]);
        trie.put_all("cafè", vec![2]);

        assert_eq!(trie.get_any("caf"), set(&[1, 2]));
        assert_eq!(trie.get_any("café"), set(&[1]));
    }

    #[test]
    fn test_byte_units() {
        let mut trie: HashTrie<u32, ByteUnits> = HashTrie::new();
        trie.put_all("café", vec![1]);
        trie.put_all("cafè", vec![2]);

        // 'é' and 'è' share their first UTF-8 byte, so "café" branches late
        assert_eq!(trie.root.subtree_size(), 2);
        let caf = trie.find("caf").unwrap();
        assert_eq!(caf.children.len(), 1);
        assert_eq!(trie.get_any("caf"), set(&[1, 2]));
        assert_eq!(trie.get_all("café"), set(&[1]));
        assert_eq!(trie.remove("cafè"), set(&[2]));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_long_key() {
        let key = "a".repeat(100_000);
        let mut trie = StringTrie::new();

        assert!(trie.put_all(&key, vec![1]));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get_any("aaa"), set(&[1]));
        assert!(trie.contains_key(&key));

        let copy = trie.clone();
        assert_eq!(copy, trie);

        assert_eq!(trie.remove(&key), set(&[1]));
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert!(trie.root.children.is_empty());

        trie.put_all(&key, vec![1, 2]);
        assert!(trie.remove_all(&key, vec![1u32, 2]));
        assert!(trie.root.children.is_empty());

        trie.put_all(&key, vec![3]);
        assert!(trie.purge_all(vec![3u32]));
        assert!(trie.root.children.is_empty());

        // Dropping a trie that still holds the whole chain
        trie.put_all(&key, vec![4]);
        drop(copy);
        drop(trie);
    }
}

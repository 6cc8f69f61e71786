//! Prefix view into a hash trie.
//!
//! This module provides the `PrefixView` type, a borrowed handle on the
//! subtree of every key starting with a given fragment. It backs the
//! autocomplete lookup of the trie.

use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::key_converter::{CharUnits, KeyUnits};
use crate::node::Node;

/// A lightweight view into the subtree defined by a key fragment.
///
/// The fragment is looked up once, when the view is created. The view borrows
/// the trie, so the trie cannot change while a view is alive.
///
/// # Examples
///
/// ```
/// use prefix_index::{Index, StringTrie};
///
/// let mut trie = StringTrie::new();
/// trie.put("hello", 1);
/// trie.put("help", 2);
/// trie.put("world", 3);
///
/// let view = trie.view("hel");
///
/// assert!(view.contains(&1));
/// assert!(!view.contains(&3));
///
/// let mut found: Vec<i32> = view.iter().copied().collect();
/// found.sort();
/// assert_eq!(found, vec![1, 2]);
/// ```
pub struct PrefixView<'a, V, C: KeyUnits = CharUnits> {
    /// The key fragment defining this view
    fragment: String,

    /// The node the fragment ends at, if the path exists
    node: Option<&'a Node<C::Unit, V>>,
}

/// An iterator over the values of a `PrefixView`.
///
/// Performs a depth-first traversal of the subtree. A value stored under
/// several keys is yielded once per key; no order is guaranteed.
pub struct Values<'a, U, V> {
    /// Nodes still to visit
    stack: Vec<&'a Node<U, V>>,

    /// Values of the node being visited
    current: Option<hash_set::Iter<'a, V>>,
}

impl<'a, V, C: KeyUnits> PrefixView<'a, V, C> {
    pub(crate) fn new(fragment: &str, node: Option<&'a Node<C::Unit, V>>) -> Self {
        PrefixView {
            fragment: fragment.to_owned(),
            node,
        }
    }

    /// Returns the key fragment for this view.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns whether the path for the fragment exists in the trie.
    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    /// Returns the number of key/value associations under the fragment.
    pub fn len(&self) -> usize {
        self.node.map_or(0, Node::subtree_size)
    }

    /// Returns whether no value is stored under the fragment.
    pub fn is_empty(&self) -> bool {
        self.node.map_or(true, Node::is_empty)
    }

    /// Returns an iterator over every value stored under the fragment.
    pub fn iter(&self) -> Values<'a, C::Unit, V> {
        Values {
            stack: self.node.into_iter().collect(),
            current: None,
        }
    }
}

impl<'a, V, C> PrefixView<'a, V, C>
where
    V: Eq + Hash,
    C: KeyUnits,
{
    /// Returns whether `value` is stored under any key starting with the fragment.
    pub fn contains(&self, value: &V) -> bool {
        self.node.map_or(false, |node| node.subtree_contains(value))
    }

    /// Collects the distinct values under the fragment into an owned set.
    pub fn to_set(&self) -> HashSet<V>
    where
        V: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, V, C: KeyUnits> Clone for PrefixView<'a, V, C> {
    fn clone(&self) -> Self {
        PrefixView {
            fragment: self.fragment.clone(),
            node: self.node,
        }
    }
}

impl<'a, V, C: KeyUnits> fmt::Debug for PrefixView<'a, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("fragment", &self.fragment)
            .field("exists", &self.exists())
            .finish()
    }
}

impl<'v, 'a, V, C: KeyUnits> IntoIterator for &'v PrefixView<'a, V, C> {
    type Item = &'a V;
    type IntoIter = Values<'a, C::Unit, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, U, V> Iterator for Values<'a, U, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(Iterator::next) {
                return Some(value);
            }

            let node = self.stack.pop()?;
            self.stack.extend(node.children.values());
            self.current = Some(node.values.iter());
        }
    }
}

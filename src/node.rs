//! Internal node implementation for the hash trie.
//!
//! A `Node` owns its children outright; dropping a node drops its subtree.
//! Nodes are only reachable from the root of the trie that owns them.
//!
//! A key of n units is a chain of n nodes, so every walk over a subtree here
//! keeps its own stack instead of recursing.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use log::trace;

/// Internal node type for the hash trie.
///
/// Each node holds the set of values stored at the exact key that ends here,
/// and a map from the next key unit to the child node.
pub(crate) struct Node<U, V> {
    /// Child nodes indexed by the key unit leading to them
    pub children: HashMap<U, Node<U, V>>,

    /// Values associated with the key ending at this node
    pub values: HashSet<V>,
}

impl<U, V> Node<U, V> {
    /// Creates a new empty node
    pub fn new() -> Self {
        Node {
            children: HashMap::new(),
            values: HashSet::new(),
        }
    }

    /// Returns whether this node has neither children nor values.
    ///
    /// Only the root of a trie is ever allowed to be empty.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.values.is_empty()
    }

    /// Returns the number of values stored in this subtree
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            count += node.values.len();
            stack.extend(node.children.values());
        }

        count
    }
}

impl<U, V> Default for Node<U, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Frees the subtree one node at a time. Each popped node has had its
// children moved out, so its own drop does not descend any further.
impl<U, V> Drop for Node<U, V> {
    fn drop(&mut self) {
        let mut stack: Vec<Node<U, V>> = self.children.drain().map(|(_, child)| child).collect();

        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

impl<U: Copy, V> Node<U, V> {
    /// Returns the key units and value set of every node in this subtree
    /// that stores at least one value.
    pub fn entries(&self) -> Vec<(Vec<U>, &HashSet<V>)> {
        let mut entries = Vec::new();
        let mut path: Vec<U> = Vec::new();
        let mut stack: Vec<(usize, Option<U>, &Node<U, V>)> = vec![(0, None, self)];

        while let Some((depth, unit, node)) = stack.pop() {
            // Siblings of an ancestor may have been visited in between
            path.truncate(depth.saturating_sub(1));
            if let Some(unit) = unit {
                path.push(unit);
            }

            if !node.values.is_empty() {
                entries.push((path.clone(), &node.values));
            }

            for (unit, child) in &node.children {
                stack.push((depth + 1, Some(*unit), child));
            }
        }

        entries
    }
}

impl<U, V> Node<U, V>
where
    U: Copy + Eq + Hash + Debug,
    V: Eq + Hash,
{
    /// Adds every value to this node's set. Returns true if any was new.
    pub fn insert_values<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = V>,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.values.insert(value) | changed)
    }

    /// Removes every value from this node's set. Returns true if any was present.
    pub fn remove_values<I, Q>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<V>,
    {
        if self.values.is_empty() {
            return false;
        }

        values
            .into_iter()
            .fold(false, |changed, value| {
                self.values.remove(Borrow::<V>::borrow(&value)) | changed
            })
    }

    /// Returns whether `value` is stored anywhere in this subtree
    pub fn subtree_contains(&self, value: &V) -> bool {
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.values.contains(value) {
                return true;
            }
            stack.extend(node.children.values());
        }

        false
    }

    /// Detaches the child reached through `unit`.
    pub fn prune(&mut self, unit: U) {
        trace!("pruning empty node at unit {:?}", unit);
        self.children.remove(&unit);
    }

    fn descend_mut(&mut self, units: &[U]) -> Option<&mut Node<U, V>> {
        let mut current = self;
        for unit in units {
            current = current.children.get_mut(unit)?;
        }
        Some(current)
    }

    /// Applies `edit` to the node at the end of `units`, then detaches the
    /// branch of that path left empty. Returns `None` if the path does not
    /// exist.
    ///
    /// The detached branch hangs off the deepest node on the path that still
    /// holds values or another child; everything above it stays. This node
    /// itself is never detached.
    pub fn edit_path<I, R, F>(&mut self, units: I, edit: F) -> Option<R>
    where
        I: IntoIterator<Item = U>,
        F: FnOnce(&mut Node<U, V>) -> R,
    {
        let path: Vec<U> = units.into_iter().collect();

        let terminal = self.descend_mut(&path)?;
        let result = edit(&mut *terminal);
        if path.is_empty() || !terminal.is_empty() {
            return Some(result);
        }

        let mut cut = 0;
        let mut current: &Node<U, V> = self;
        for (depth, unit) in path.iter().enumerate() {
            if depth > 0 && (!current.values.is_empty() || current.children.len() > 1) {
                cut = depth;
            }
            match current.children.get(unit) {
                Some(child) => current = child,
                None => break,
            }
        }

        if let Some(parent) = self.descend_mut(&path[..cut]) {
            parent.prune(path[cut]);
        }

        Some(result)
    }

    /// Removes every target value from every node in this subtree, detaching
    /// branches left empty. Returns the number of nodes whose value set changed.
    ///
    /// This node itself is never detached, even if it ends up empty.
    pub fn purge<Q>(&mut self, targets: &[Q]) -> usize
    where
        Q: Borrow<V>,
    {
        let holders: Vec<Vec<U>> = self
            .entries()
            .into_iter()
            .filter(|(_, values)| {
                targets
                    .iter()
                    .any(|target| values.contains(Borrow::<V>::borrow(target)))
            })
            .map(|(path, _)| path)
            .collect();

        // A holder keeps its ancestors alive until its own edit, so pruning
        // one path never removes another holder.
        let mut changed = 0;
        for path in holders {
            let removed = self.edit_path(path, |node| {
                node.remove_values(targets.iter().map(Borrow::<V>::borrow))
            });
            if removed.unwrap_or(false) {
                changed += 1;
            }
        }

        changed
    }
}

impl<U, V> Clone for Node<U, V>
where
    U: Copy + Eq + Hash,
    V: Clone,
{
    fn clone(&self) -> Self {
        // Parents come before their children in `order`, so building the
        // copies back to front attaches every child before its parent moves.
        let mut order: Vec<(Option<(usize, U)>, &Node<U, V>)> = vec![(None, self)];
        let mut next = 0;
        while next < order.len() {
            let node = order[next].1;
            for (unit, child) in &node.children {
                order.push((Some((next, *unit)), child));
            }
            next += 1;
        }

        let mut copies: Vec<Option<Node<U, V>>> = order
            .iter()
            .map(|(_, node)| {
                Some(Node {
                    children: HashMap::with_capacity(node.children.len()),
                    values: node.values.clone(),
                })
            })
            .collect();

        for index in (1..order.len()).rev() {
            if let (Some((parent, unit)), Some(copy)) = (order[index].0, copies[index].take()) {
                if let Some(parent) = copies[parent].as_mut() {
                    parent.children.insert(unit, copy);
                }
            }
        }

        copies
            .first_mut()
            .and_then(Option::take)
            .unwrap_or_default()
    }
}

impl<U, V> PartialEq for Node<U, V>
where
    U: Eq + Hash,
    V: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];

        while let Some((left, right)) = stack.pop() {
            if left.values != right.values || left.children.len() != right.children.len() {
                return false;
            }
            for (unit, child) in &left.children {
                match right.children.get(unit) {
                    Some(other_child) => stack.push((child, other_child)),
                    None => return false,
                }
            }
        }

        true
    }
}

impl<U, V> Eq for Node<U, V>
where
    U: Eq + Hash,
    V: Eq + Hash,
{
}

// Formats as a flat map from key units to values
impl<U, V> fmt::Debug for Node<U, V>
where
    U: Copy + Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

//! Basic use of the prefix index
use prefix_index::{Index, StringTrie};
use std::collections::HashSet;

fn main() {
    // Create a new trie with string keys
    let mut trie = StringTrie::new();

    // Insert some values
    trie.put("cat", 1);
    trie.put("car", 2);
    trie.put("dog", 3);

    let set = |values: &[i32]| values.iter().copied().collect::<HashSet<_>>();

    // Exact lookups
    assert_eq!(trie.get_all("cat"), set(&[1]));
    assert!(trie.get_all("ca").is_empty());

    // Prefix lookups
    assert_eq!(trie.get_any("ca"), set(&[1, 2]));
    assert_eq!(trie.get_any("c"), set(&[1, 2]));
    assert_eq!(trie.get_any("do"), set(&[3]));
    assert!(trie.get_any("z").is_empty());
    assert_eq!(trie.len(), 3);

    // Remove a whole key
    assert_eq!(trie.remove("cat"), set(&[1]));
    assert_eq!(trie.get_any("ca"), set(&[2]));
    assert_eq!(trie.len(), 2);

    println!("{:?}", trie.view("ca"));
}

//! Suggests programming languages for each query given on the command line.
//!
//! ```text
//! cargo run --example autocomplete -- ja c
//! ```
use prefix_index::{Index, Record, StringTrie};

const LANGUAGES: &[&str] = &[
    "ActionScript",
    "AppleScript",
    "Asp",
    "BASIC",
    "C",
    "C++",
    "Clojure",
    "COBOL",
    "ColdFusion",
    "Erlang",
    "Fortran",
    "Groovy",
    "Haskell",
    "Java",
    "JavaScript",
    "Lisp",
    "Perl",
    "PHP",
    "Python",
    "Ruby",
    "Scala",
    "Scheme",
];

fn main() {
    let mut trie = StringTrie::new();
    for name in LANGUAGES {
        trie.put(&name.to_lowercase(), Record::new(*name));
    }

    for query in std::env::args().skip(1) {
        let mut matches: Vec<Record> = trie.get_any(&query.to_lowercase()).into_iter().collect();
        matches.sort_by(|a, b| a.text().cmp(b.text()));

        println!("Query: {}", query);
        for record in matches {
            println!("- {}", record);
        }
    }
}

use std::collections::BTreeMap;

/// Large destinations offered by default in the search box.
pub const POPULAR_DESTINATIONS: &[&str] = &[
    "Dubai",
    "Singapore",
    "New York",
    "Tokyo",
    "London",
    "Paris",
    "Hong Kong",
    "Los Angeles",
    "Sydney",
    "Bangkok",
    "Seoul",
    "San Francisco",
    "Chicago",
    "Berlin",
    "Shanghai",
    "Barcelona",
];

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// Case-insensitive prefix trie for destination suggestions.
#[derive(Debug, Default, Clone)]
pub struct DestinationTrie {
    root: TrieNode,
    len: usize,
}

impl DestinationTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_popular_destinations() -> Self {
        let mut trie = Self::new();
        for place in POPULAR_DESTINATIONS {
            trie.insert(place);
        }
        trie
    }

    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.to_lowercase().chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    /// Number of distinct stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every stored word starting with `prefix`, case-insensitively.
    ///
    /// Suggestions keep `prefix` exactly as typed and append the stored
    /// lowercase remainder. Shorter words come before their extensions and
    /// siblings are ordered by character.
    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        let mut node = &self.root;
        for ch in prefix.to_lowercase().chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        let mut words = Vec::new();
        let mut buffer = prefix.to_string();
        collect_words(node, &mut buffer, &mut words);
        words
    }
}

fn collect_words(node: &TrieNode, buffer: &mut String, words: &mut Vec<String>) {
    if node.terminal {
        words.push(buffer.clone());
    }
    for (ch, child) in &node.children {
        buffer.push(*ch);
        collect_words(child, buffer, words);
        buffer.pop();
    }
}

use std::collections::HashMap;

/// Ordered collection of Markdown reference-style link definitions.
///
/// Keys are unique. Inserting an existing key replaces its URL but keeps the
/// position where the key was first seen, so the footer order is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkRegistry {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `url` under `ref_key` and returns the inline link text
    /// `[name][ref_key]`.
    ///
    /// A colliding `ref_key` silently takes the new URL (last writer wins).
    pub fn create_link(&mut self, name: &str, ref_key: &str, url: &str) -> String {
        self.insert(ref_key, url);
        format!("[{name}][{ref_key}]")
    }

    /// Inserts or overwrites a definition. Returns the previous URL if the
    /// key was already present.
    pub fn insert(&mut self, ref_key: &str, url: &str) -> Option<String> {
        match self.index.get(ref_key) {
            Some(&pos) => Some(std::mem::replace(
                &mut self.entries[pos].1,
                url.to_string(),
            )),
            None => {
                self.index.insert(ref_key.to_string(), self.entries.len());
                self.entries.push((ref_key.to_string(), url.to_string()));
                None
            }
        }
    }

    pub fn get(&self, ref_key: &str) -> Option<&str> {
        self.index
            .get(ref_key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains_key(&self, ref_key: &str) -> bool {
        self.index.contains_key(ref_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Definitions in insertion order as `(ref_key, url)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, url)| (key.as_str(), url.as_str()))
    }
}

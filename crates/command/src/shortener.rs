use crate::collaborators::NameShortener;
use std::collections::{BTreeSet, HashMap};

const SEPARATORS: [char; 3] = ['.', '#', '/'];

/// Labels every name with its shortest suffix that no other name shares.
///
/// Suffixes start after a `.`, `#` or `/`; separators inside a parameter
/// list are ignored, so `String#indexOf(java.lang.String)` shortens to
/// `indexOf(java.lang.String)` and never to `String)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixShortener;

impl SuffixShortener {
    /// Candidate labels from shortest to longest, ending with the full name
    fn suffixes(name: &str) -> Vec<&str> {
        let head_end = name.find('(').unwrap_or(name.len());
        let mut suffixes: Vec<&str> = name[..head_end]
            .char_indices()
            .rev()
            .filter(|(_, ch)| SEPARATORS.contains(ch))
            .map(|(idx, ch)| &name[idx + ch.len_utf8()..])
            .filter(|suffix| !suffix.is_empty())
            .collect();
        suffixes.push(name);
        suffixes
    }
}

impl NameShortener for SuffixShortener {
    fn shorten(&self, names: &BTreeSet<String>) -> HashMap<String, String> {
        let mut usage: HashMap<&str, usize> = HashMap::new();
        for name in names {
            for suffix in Self::suffixes(name) {
                *usage.entry(suffix).or_default() += 1;
            }
        }

        names
            .iter()
            .map(|name| {
                let label = Self::suffixes(name)
                    .into_iter()
                    .find(|suffix| usage.get(suffix).copied() == Some(1))
                    .unwrap_or(name.as_str());
                (name.clone(), label.to_string())
            })
            .collect()
    }
}

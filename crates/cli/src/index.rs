use anyhow::{anyhow, Context as AnyhowContext, Result};
use async_trait::async_trait;
use docbot_command::{DocElement, ElementLoader, LoadedElement, QueryApi, QueryMatch};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use std::path::Path;
use std::sync::Mutex;

/// Matches handed back per query; enough to trigger the preview path
const MAX_QUERY_MATCHES: usize = 50;

/// Documentation index backed by a JSON array of [`DocElement`]s, queried
/// with nucleo-matcher fuzzy scoring
pub struct JsonDocIndex {
    elements: Vec<DocElement>,
    origin: String,
    matcher: Mutex<Matcher>,
}

impl JsonDocIndex {
    pub fn new(elements: Vec<DocElement>, origin: impl Into<String>) -> Self {
        Self {
            elements,
            origin: origin.into(),
            matcher: Mutex::new(Matcher::new(nucleo_matcher::Config::DEFAULT)),
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read index {}", path.display()))?;
        let elements: Vec<DocElement> = serde_json::from_str(&raw)
            .with_context(|| format!("parse index {}", path.display()))?;
        log::info!("Loaded {} elements from {}", elements.len(), path.display());
        Ok(Self::new(elements, path.display().to_string()))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Scores every qualified name against `query`, best first
    fn search(&self, query: &str) -> Result<Vec<(usize, u32)>> {
        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
        let mut matcher = self
            .matcher
            .lock()
            .map_err(|_| anyhow!("fuzzy matcher lock poisoned"))?;

        let mut scored: Vec<(usize, u32)> = self
            .elements
            .iter()
            .enumerate()
            .filter_map(|(idx, element)| {
                let haystack = Utf32String::from(element.qualified_name.as_str());
                let score = pattern.score(haystack.slice(..), &mut matcher)?;
                Some((idx, score))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.cmp(&a.1).then_with(|| {
                self.elements[a.0]
                    .qualified_name
                    .cmp(&self.elements[b.0].qualified_name)
            })
        });
        scored.truncate(MAX_QUERY_MATCHES);
        Ok(scored)
    }
}

/// `java.lang.String#contains(java.lang.CharSequence)` → `String#contains(java.lang.CharSequence)`
fn simple_name(qualified_name: &str) -> &str {
    let head_end = qualified_name.find('(').unwrap_or(qualified_name.len());
    let start = qualified_name[..head_end]
        .rfind('.')
        .map_or(0, |idx| idx + 1);
    &qualified_name[start..]
}

fn without_parameters(name: &str) -> &str {
    name.find('(').map_or(name, |idx| &name[..idx])
}

/// Exact when the query names the element fully or by its simple name,
/// with or without its parameter list
fn is_exact(query: &str, qualified_name: &str) -> bool {
    let simple = simple_name(qualified_name);
    [
        qualified_name,
        without_parameters(qualified_name),
        simple,
        without_parameters(simple),
    ]
    .iter()
    .any(|candidate| candidate.eq_ignore_ascii_case(query))
}

#[async_trait]
impl ElementLoader for JsonDocIndex {
    async fn find_by_qualified_name(&self, qualified_name: &str) -> Result<Vec<LoadedElement>> {
        Ok(self
            .elements
            .iter()
            .filter(|element| element.qualified_name == qualified_name)
            .map(|element| LoadedElement {
                element: element.clone(),
                origin: self.origin.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl QueryApi for JsonDocIndex {
    async fn query(&self, _loader: &dyn ElementLoader, query: &str) -> Result<Vec<QueryMatch>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let scored = self.search(query)?;
        log::debug!("Fuzzy query '{query}': {} hits", scored.len());

        Ok(scored
            .into_iter()
            .map(|(idx, _)| {
                let name = &self.elements[idx].qualified_name;
                QueryMatch::new(name.clone(), is_exact(query, name))
            })
            .collect())
    }
}

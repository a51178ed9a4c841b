use crate::types::{LoadedElement, QueryMatch};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

/// Loads documented elements by qualified name
#[async_trait]
pub trait ElementLoader: Send + Sync {
    /// All elements with this exact qualified name, possibly from several
    /// sources
    async fn find_by_qualified_name(&self, qualified_name: &str)
        -> anyhow::Result<Vec<LoadedElement>>;
}

/// Resolves a free-text query to ranked qualified names
#[async_trait]
pub trait QueryApi: Send + Sync {
    async fn query(
        &self,
        loader: &dyn ElementLoader,
        query: &str,
    ) -> anyhow::Result<Vec<QueryMatch>>;
}

/// Picks short, still distinguishable labels for a set of qualified names
pub trait NameShortener: Send + Sync {
    /// Maps every name in `names` to its label
    fn shorten(&self, names: &BTreeSet<String>) -> HashMap<String, String>;
}

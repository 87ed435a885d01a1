mod builtin;
mod definition;
mod loader;
mod validator;

pub use definition::{QueryDefinition, RawCatalog, RawQueryDefinition};
pub use loader::CatalogLoader;
pub use validator::QueryValidator;

use crate::error::{ClaimboardError, Result};
use std::collections::HashMap;

/// Ordered, read-only registry of named queries.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    queries: Vec<QueryDefinition>,
    query_index: HashMap<String, usize>,
}

impl QueryCatalog {
    /// Build a catalog, keeping the given order as display order.
    pub fn new(definitions: impl IntoIterator<Item = QueryDefinition>) -> Result<Self> {
        let mut queries = Vec::new();
        let mut query_index = HashMap::new();

        for definition in definitions {
            if definition.label.trim().is_empty() {
                return Err(ClaimboardError::CatalogLoad(
                    "Query label must not be empty".to_string(),
                ));
            }
            if query_index.contains_key(&definition.label) {
                return Err(ClaimboardError::DuplicateLabel(definition.label));
            }
            QueryValidator::validate(&definition)?;

            query_index.insert(definition.label.clone(), queries.len());
            queries.push(definition);
        }

        Ok(Self {
            queries,
            query_index,
        })
    }

    /// The food-wastage dashboard queries.
    pub fn food_wastage() -> Result<Self> {
        Self::new(builtin::food_wastage_queries())
    }

    pub fn list(&self) -> Vec<&str> {
        self.queries.iter().map(|q| q.label.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Result<&QueryDefinition> {
        self.query_index
            .get(label)
            .map(|&i| &self.queries[i])
            .ok_or_else(|| ClaimboardError::UnknownQuery(label.to_string()))
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.query_index.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryDefinition> {
        self.queries.iter()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

use super::definition::{QueryDefinition, RawCatalog};
use super::QueryCatalog;
use crate::error::{ClaimboardError, Result};
use std::path::Path;
use tracing::debug;

/// Reads operator-authored catalog files.
///
/// ```yaml
/// queries:
///   - label: Providers by City
///     sql: SELECT * FROM v_fw_providers_by_city;
///     description: Distinct providers per city
/// ```
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load_file(path: impl AsRef<Path>) -> Result<QueryCatalog> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClaimboardError::CatalogLoad(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loading query catalog");
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<QueryCatalog> {
        let raw: RawCatalog = serde_yaml::from_str(content)?;
        if raw.queries.is_empty() {
            return Err(ClaimboardError::CatalogLoad(
                "Catalog defines no queries".to_string(),
            ));
        }
        QueryCatalog::new(raw.queries.into_iter().map(QueryDefinition::from))
    }
}

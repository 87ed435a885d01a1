use super::normalize::normalize;
use super::result_set::ResultSet;
use crate::catalog::QueryDefinition;
use crate::error::{ClaimboardError, Result};
use crate::gateway::{Gateway, GatewayError};
use tracing::debug;

/// Runs catalog queries through a [`Gateway`] and normalizes the output.
///
/// Query text is submitted exactly as authored. There is no templating and no
/// sanitization, so only catalog-owned text may be passed in.
pub struct QueryExecutor<G: Gateway> {
    gateway: G,
}

impl<G: Gateway> QueryExecutor<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Execute one definition. Zero rows is a successful, empty result.
    ///
    /// Every failure (connect, query, result shape) is reported as
    /// [`ClaimboardError::DataAccess`] carrying the underlying cause.
    pub async fn execute(&self, definition: &QueryDefinition) -> Result<ResultSet> {
        self.execute_impl(definition)
            .await
            .map_err(ClaimboardError::DataAccess)
    }

    async fn execute_impl(
        &self,
        definition: &QueryDefinition,
    ) -> std::result::Result<ResultSet, GatewayError> {
        let raw = {
            let mut conn = self.gateway.connect().await?;
            debug!(label = %definition.label, "connection acquired");
            self.gateway.run(&mut conn, &definition.text).await?
        };

        let result = normalize(raw)?;
        debug!(
            label = %definition.label,
            columns = result.column_count(),
            rows = result.row_count(),
            "query executed"
        );
        Ok(result)
    }
}

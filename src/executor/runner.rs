use super::query_executor::QueryExecutor;
use super::result_set::ResultSet;
use crate::catalog::QueryCatalog;
use crate::chart::{ChartSpec, VisualizationSelector};
use crate::error::Result;
use crate::gateway::Gateway;
use tracing::debug;

/// Result of running one catalog entry, ready for presentation.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub label: String,
    pub result: ResultSet,
    selector: VisualizationSelector,
}

impl QueryOutcome {
    /// Chart for the result, if its columns match a rule.
    pub fn chart(&self) -> Option<ChartSpec<'_>> {
        self.selector.select(&self.result)
    }
}

/// Label → execution → chart selection, one request at a time.
pub struct Runner<G: Gateway> {
    catalog: QueryCatalog,
    executor: QueryExecutor<G>,
    selector: VisualizationSelector,
}

impl<G: Gateway> Runner<G> {
    pub fn new(catalog: QueryCatalog, gateway: G) -> Self {
        Self {
            catalog,
            executor: QueryExecutor::new(gateway),
            selector: VisualizationSelector::default(),
        }
    }

    pub fn with_selector(mut self, selector: VisualizationSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    pub fn executor(&self) -> &QueryExecutor<G> {
        &self.executor
    }

    pub async fn run(&self, label: &str) -> Result<QueryOutcome> {
        let definition = self.catalog.get(label)?;
        let result = self.executor.execute(definition).await?;

        let outcome = QueryOutcome {
            label: definition.label.clone(),
            result,
            selector: self.selector,
        };
        debug!(
            label,
            chart = ?outcome.chart().map(|c| c.kind),
            "query outcome ready"
        );
        Ok(outcome)
    }
}

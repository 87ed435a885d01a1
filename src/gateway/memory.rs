use super::{Gateway, GatewayError, RawTable};
use async_trait::async_trait;
use std::collections::HashMap;

/// Fixture-backed store keyed by exact query text.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    tables: HashMap<String, RawTable>,
    unavailable: Option<String>,
}

/// Connection handle for [`MemoryGateway`]; holds nothing.
#[derive(Debug)]
pub struct MemoryConnection {
    _private: (),
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, sql: impl Into<String>, table: RawTable) -> Self {
        self.tables.insert(sql.into(), table);
        self
    }

    /// Make every `connect()` fail with `reason`.
    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    type Connection = MemoryConnection;

    async fn connect(&self) -> Result<MemoryConnection, GatewayError> {
        match &self.unavailable {
            Some(reason) => Err(GatewayError::Connect(reason.clone())),
            None => Ok(MemoryConnection { _private: () }),
        }
    }

    async fn run(
        &self,
        _conn: &mut MemoryConnection,
        sql: &str,
    ) -> Result<RawTable, GatewayError> {
        self.tables
            .get(sql)
            .cloned()
            .ok_or_else(|| GatewayError::Query(format!("relation for query not found: {}", sql)))
    }
}

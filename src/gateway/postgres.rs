use super::{Gateway, GatewayError, RawColumn, RawTable, SourceType};
use crate::config::GatewayConfig;
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgColumn, PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Executor, Postgres, Row, TypeInfo, ValueRef};
use tracing::debug;

/// Postgres store reached through a lazily-connecting sqlx pool.
///
/// Queries go over the simple-query protocol, so every cell arrives in
/// Postgres text format and is handed on untouched for normalization.
#[derive(Debug, Clone)]
pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy(&config.database_url)
            .map_err(|e| GatewayError::Connect(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn raw_columns(columns: &[PgColumn]) -> Vec<RawColumn> {
    columns
        .iter()
        .map(|c| RawColumn::new(c.name(), SourceType::from_type_name(c.type_info().name())))
        .collect()
}

fn cells_of(row: &PgRow) -> Result<Vec<Option<String>>, GatewayError> {
    (0..row.len())
        .map(|idx| {
            let value = row.try_get_raw(idx)?;
            if value.is_null() {
                return Ok(None);
            }
            value.as_str().map(|s| Some(s.to_string())).map_err(|e| {
                GatewayError::MalformedResult(format!("column {} is not text-encoded: {}", idx, e))
            })
        })
        .collect()
}

#[async_trait]
impl Gateway for PostgresGateway {
    type Connection = PoolConnection<Postgres>;

    async fn connect(&self) -> Result<PoolConnection<Postgres>, GatewayError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| GatewayError::Connect(e.to_string()))
    }

    async fn run(
        &self,
        conn: &mut PoolConnection<Postgres>,
        sql: &str,
    ) -> Result<RawTable, GatewayError> {
        let mut table: Option<RawTable> = None;
        {
            let mut rows = sqlx::raw_sql(sql).fetch(&mut **conn);
            while let Some(row) = rows.try_next().await? {
                let cells = cells_of(&row)?;
                table
                    .get_or_insert_with(|| RawTable::new(raw_columns(row.columns())))
                    .push_row(cells);
            }
        }

        // Row descriptions only arrive with rows, so ask the server for the shape.
        let table = match table {
            Some(table) => table,
            None => {
                let described = (&mut **conn).describe(sql).await?;
                RawTable::new(raw_columns(described.columns()))
            }
        };

        debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "postgres query finished"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Needs a reachable server: `CLAIMBOARD_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`
    async fn test_gateway() -> Option<PostgresGateway> {
        let url = std::env::var("CLAIMBOARD_TEST_DATABASE_URL").ok()?;
        let config = GatewayConfig::default().with_database_url(url);
        Some(PostgresGateway::new(&config).unwrap())
    }

    #[tokio::test]
    #[ignore]
    async fn test_rows_arrive_as_text_with_types() {
        let Some(gateway) = test_gateway().await else {
            return;
        };
        let mut conn = gateway.connect().await.unwrap();
        let table = gateway
            .run(
                &mut conn,
                r#"SELECT 'Pune'::text AS "City", 12::int8 AS provider_count, NULL::numeric AS share"#,
            )
            .await
            .unwrap();

        assert_eq!(
            table.columns,
            vec![
                RawColumn::new("City", SourceType::Text),
                RawColumn::new("provider_count", SourceType::Integer),
                RawColumn::new("share", SourceType::Decimal),
            ]
        );
        assert_eq!(
            table.rows,
            vec![vec![Some("Pune".to_string()), Some("12".to_string()), None]]
        );
    }

    #[tokio::test]
    #[ignore]
    async fn test_zero_rows_keep_described_columns() {
        let Some(gateway) = test_gateway().await else {
            return;
        };
        let mut conn = gateway.connect().await.unwrap();
        let table = gateway
            .run(
                &mut conn,
                r#"SELECT 'Pune'::text AS "City", 12::int8 AS provider_count WHERE false;"#,
            )
            .await
            .unwrap();

        assert!(table.rows.is_empty());
        assert_eq!(
            table.columns,
            vec![
                RawColumn::new("City", SourceType::Text),
                RawColumn::new("provider_count", SourceType::Integer),
            ]
        );
    }

    #[tokio::test]
    #[ignore]
    async fn test_zero_rows_still_select_a_chart() {
        let Some(gateway) = test_gateway().await else {
            return;
        };
        let catalog = crate::QueryCatalog::new(vec![crate::QueryDefinition::new(
            "Providers by City",
            r#"SELECT 'Pune'::text AS "City", 12::int8 AS provider_count WHERE false"#,
        )])
        .unwrap();
        let runner = crate::Runner::new(catalog, gateway);

        let outcome = runner.run("Providers by City").await.unwrap();
        assert!(outcome.result.is_empty());
        assert_eq!(outcome.chart().map(|c| c.kind), Some(crate::ChartKind::Bar));
    }
}

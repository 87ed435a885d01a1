//! Data source boundary.
//!
//! The executor only needs two operations from a store: acquire a scoped
//! connection, and run fixed query text on it. Connections release
//! themselves on drop, so every exit path gives them back.

mod memory;
mod postgres;

pub use memory::{MemoryConnection, MemoryGateway};
pub use postgres::PostgresGateway;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("malformed result: {0}")]
    MalformedResult(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Driver-reported column type, used as a coercion hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    /// Timestamp with time zone; the text carries an offset.
    TimestampTz,
    Text,
    Unknown,
}

impl SourceType {
    /// Map a Postgres type name (as reported by the driver) to a hint.
    pub fn from_type_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "INT2" | "INT4" | "INT8" | "SMALLINT" | "INTEGER" | "BIGINT" | "OID" => {
                SourceType::Integer
            }
            "FLOAT4" | "FLOAT8" | "REAL" | "DOUBLE PRECISION" => SourceType::Float,
            "NUMERIC" | "DECIMAL" => SourceType::Decimal,
            "BOOL" | "BOOLEAN" => SourceType::Boolean,
            "DATE" => SourceType::Date,
            "TIMESTAMP" => SourceType::Timestamp,
            "TIMESTAMPTZ" => SourceType::TimestampTz,
            "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" | "UUID" | "CITEXT" => {
                SourceType::Text
            }
            _ => SourceType::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub source_type: SourceType,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            name: name.into(),
            source_type,
        }
    }
}

/// Rows as returned by a store. `None` cells are SQL NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<RawColumn>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<RawColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    /// Builder-style row append. Use `None` for SQL NULL.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.rows
            .push(cells.into_iter().map(|c| c.map(Into::into)).collect());
        self
    }
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Scoped handle; dropping it releases the underlying connection.
    type Connection: Send;

    async fn connect(&self) -> Result<Self::Connection, GatewayError>;

    /// Submit `sql` verbatim and collect the full result.
    async fn run(&self, conn: &mut Self::Connection, sql: &str)
        -> Result<RawTable, GatewayError>;
}

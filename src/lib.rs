pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod present;

pub use catalog::{CatalogLoader, QueryCatalog, QueryDefinition, QueryValidator};
pub use chart::{
    select, ChartKind, ChartSpec, Encoding, VisualizationRule, VisualizationSelector,
    DEFAULT_RULES,
};
pub use config::GatewayConfig;
pub use error::{ClaimboardError, Result};
pub use executor::{
    CellValue, Column, ColumnType, QueryExecutor, QueryOutcome, ResultSet, Runner,
};
pub use gateway::{
    Gateway, GatewayError, MemoryConnection, MemoryGateway, PostgresGateway, RawColumn, RawTable,
    SourceType,
};

use crate::gateway::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimboardError {
    #[error("Unknown query: {0}")]
    UnknownQuery(String),

    #[error("Data access error: {0}")]
    DataAccess(#[source] GatewayError),

    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    #[error("Duplicate query label: {0}")]
    DuplicateLabel(String),

    #[error("Query '{label}' is not a read-only SELECT: {reason}")]
    UnsafeQuery { label: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GatewayError> for ClaimboardError {
    fn from(err: GatewayError) -> Self {
        ClaimboardError::DataAccess(err)
    }
}

pub type Result<T> = std::result::Result<T, ClaimboardError>;

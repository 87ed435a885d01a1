use serde::{Deserialize, Serialize};

/// A named, fixed query offered to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDefinition {
    pub label: String,
    pub text: String,
    pub description: Option<String>,
}

impl QueryDefinition {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// On-disk catalog shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCatalog {
    pub queries: Vec<RawQueryDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawQueryDefinition {
    pub label: String,
    #[serde(alias = "text")]
    pub sql: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<RawQueryDefinition> for QueryDefinition {
    fn from(raw: RawQueryDefinition) -> Self {
        Self {
            label: raw.label.trim().to_string(),
            text: raw.sql.trim().to_string(),
            description: raw.description,
        }
    }
}

use crate::gateway::GatewayError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Canonical per-column type after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// No non-null values and no usable type hint.
    Null,
    Boolean,
    Integer,
    Float,
    Date,
    Timestamp,
    /// Instant, normalized to UTC.
    TimestampTz,
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            ColumnType::Date | ColumnType::Timestamp | ColumnType::TimestampTz
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            CellValue::TimestampTz(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f UTC")),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Normalized query result.
///
/// Column names are unique and keep the source's case. Every row has exactly
/// one cell per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl ResultSet {
    pub fn try_new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Result<Self, GatewayError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(GatewayError::MalformedResult(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(GatewayError::MalformedResult(format!(
                    "row {} has {} values, expected {}",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Zero-based index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::try_new(
            vec![
                Column::new("City", ColumnType::Text),
                Column::new("provider_count", ColumnType::Integer),
            ],
            vec![
                vec![CellValue::Text("Pune".into()), CellValue::Integer(4)],
                vec![CellValue::Text("Agra".into()), CellValue::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_name() {
        let rs = sample();
        assert_eq!(rs.column_index("provider_count"), Some(1));
        assert_eq!(rs.value(0, "City"), Some(&CellValue::Text("Pune".into())));
        assert_eq!(rs.value(1, "provider_count"), Some(&CellValue::Null));
        assert_eq!(rs.value(2, "City"), None);
        assert!(!rs.has_column("city"));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = ResultSet::try_new(
            vec![Column::new("a", ColumnType::Integer)],
            vec![vec![CellValue::Integer(1), CellValue::Integer(2)]],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "malformed result: row 0 has 2 values, expected 1");
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = ResultSet::try_new(
            vec![
                Column::new("City", ColumnType::Text),
                Column::new("City", ColumnType::Text),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResult(_)));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["columns"][1]["type"], "integer");
        assert_eq!(json["rows"][0][0], "Pune");
        assert_eq!(json["rows"][0][1], 4);
        assert!(json["rows"][1][1].is_null());
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2024-03-01");
        assert_eq!(CellValue::Float(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Null.to_string(), "NULL");
    }
}

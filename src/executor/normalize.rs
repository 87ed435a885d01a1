use super::result_set::{CellValue, Column, ColumnType, ResultSet};
use crate::gateway::{GatewayError, RawColumn, RawTable, SourceType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Coercion {
    Integer,
    /// Accepts any finite or infinite binary float.
    Float,
    /// Accepts a decimal only if it survives the trip through f64.
    ExactFloat,
    Boolean,
    Date,
    Timestamp,
    /// Instant with an offset, normalized to UTC.
    TimestampTz,
}

impl Coercion {
    fn column_type(self) -> ColumnType {
        match self {
            Coercion::Integer => ColumnType::Integer,
            Coercion::Float | Coercion::ExactFloat => ColumnType::Float,
            Coercion::Boolean => ColumnType::Boolean,
            Coercion::Date => ColumnType::Date,
            Coercion::Timestamp => ColumnType::Timestamp,
            Coercion::TimestampTz => ColumnType::TimestampTz,
        }
    }
}

/// Narrowest-first coercions tried for a hint. Text is the implicit last resort.
fn candidates(hint: SourceType) -> &'static [Coercion] {
    match hint {
        SourceType::Integer => &[Coercion::Integer],
        SourceType::Float => &[Coercion::Integer, Coercion::Float],
        SourceType::Decimal => &[Coercion::Integer, Coercion::ExactFloat],
        SourceType::Boolean => &[Coercion::Boolean],
        SourceType::Date => &[Coercion::Date],
        SourceType::Timestamp => &[Coercion::Timestamp],
        SourceType::TimestampTz => &[Coercion::TimestampTz],
        SourceType::Text => &[],
        SourceType::Unknown => &[
            Coercion::Integer,
            Coercion::ExactFloat,
            Coercion::Date,
            Coercion::Timestamp,
            Coercion::TimestampTz,
        ],
    }
}

fn type_without_values(hint: SourceType) -> ColumnType {
    match hint {
        SourceType::Integer => ColumnType::Integer,
        SourceType::Float | SourceType::Decimal => ColumnType::Float,
        SourceType::Boolean => ColumnType::Boolean,
        SourceType::Date => ColumnType::Date,
        SourceType::Timestamp => ColumnType::Timestamp,
        SourceType::TimestampTz => ColumnType::TimestampTz,
        SourceType::Text => ColumnType::Text,
        SourceType::Unknown => ColumnType::Null,
    }
}

/// Canonical decimal spelling: no sign on zero, no redundant zeros.
fn canonical_decimal(raw: &str) -> Option<String> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(raw.len());
    if negative && !(int_part == "0" && frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    Some(out)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Postgres prints `timestamptz` as `2024-03-01 10:15:00+05:30` (or `+00`).
fn parse_timestamptz(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Convert one cell, or `None` if that would lose information.
///
/// `strict` additionally requires the raw text to already be in canonical
/// form, so untyped text such as `007` is not silently reformatted.
fn coerce(target: Coercion, raw: &str, strict: bool) -> Option<CellValue> {
    match target {
        Coercion::Integer => {
            let canonical = canonical_decimal(raw)?;
            if (strict && canonical != raw) || canonical.contains('.') {
                return None;
            }
            // -0 is a distinct float8 value with no integer spelling.
            if canonical == "0" && raw.starts_with('-') {
                return None;
            }
            canonical.parse::<i64>().ok().map(CellValue::Integer)
        }
        Coercion::ExactFloat => {
            let canonical = canonical_decimal(raw)?;
            if strict && canonical != raw {
                return None;
            }
            let value = canonical.parse::<f64>().ok()?;
            (value.is_finite() && value.to_string() == canonical).then_some(CellValue::Float(value))
        }
        Coercion::Float => raw.parse::<f64>().ok().map(CellValue::Float),
        Coercion::Boolean => match raw {
            "t" => Some(CellValue::Boolean(true)),
            "f" => Some(CellValue::Boolean(false)),
            _ if raw.eq_ignore_ascii_case("true") => Some(CellValue::Boolean(true)),
            _ if raw.eq_ignore_ascii_case("false") => Some(CellValue::Boolean(false)),
            _ => None,
        },
        Coercion::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .filter(|d| d.format("%Y-%m-%d").to_string() == raw)
            .map(CellValue::Date),
        Coercion::Timestamp => parse_timestamp(raw).map(CellValue::Timestamp),
        Coercion::TimestampTz => parse_timestamptz(raw).map(CellValue::TimestampTz),
    }
}

fn resolve_column(column: &RawColumn, cells: &[Option<&str>]) -> (ColumnType, Vec<CellValue>) {
    if cells.iter().all(Option::is_none) {
        return (
            type_without_values(column.source_type),
            vec![CellValue::Null; cells.len()],
        );
    }

    let strict = column.source_type == SourceType::Unknown;
    for &target in candidates(column.source_type) {
        let converted: Option<Vec<CellValue>> = cells
            .iter()
            .map(|cell| match cell {
                None => Some(CellValue::Null),
                Some(raw) => coerce(target, raw, strict),
            })
            .collect();
        if let Some(values) = converted {
            return (target.column_type(), values);
        }
    }

    if !matches!(column.source_type, SourceType::Text | SourceType::Unknown) {
        warn!(
            column = %column.name,
            source_type = ?column.source_type,
            "values do not convert without loss, keeping column as text"
        );
    }
    let values = cells
        .iter()
        .map(|cell| match cell {
            None => CellValue::Null,
            Some(raw) => CellValue::Text(raw.to_string()),
        })
        .collect();
    (ColumnType::Text, values)
}

/// Turn a raw driver table into a [`ResultSet`].
pub(crate) fn normalize(raw: RawTable) -> Result<ResultSet, GatewayError> {
    let RawTable {
        columns: raw_columns,
        rows: raw_rows,
    } = raw;
    let width = raw_columns.len();

    if let Some((idx, row)) = raw_rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(GatewayError::MalformedResult(format!(
            "row {} has {} values, expected {}",
            idx,
            row.len(),
            width
        )));
    }

    let mut columns = Vec::with_capacity(width);
    let mut rows: Vec<Vec<CellValue>> = (0..raw_rows.len())
        .map(|_| Vec::with_capacity(width))
        .collect();

    for (idx, raw_column) in raw_columns.into_iter().enumerate() {
        let cells: Vec<Option<&str>> = raw_rows.iter().map(|r| r[idx].as_deref()).collect();
        let (column_type, values) = resolve_column(&raw_column, &cells);
        for (row, value) in rows.iter_mut().zip(values) {
            row.push(value);
        }
        columns.push(Column::new(raw_column.name, column_type));
    }

    ResultSet::try_new(columns, rows)
}

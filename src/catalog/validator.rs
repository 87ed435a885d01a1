use super::definition::QueryDefinition;
use crate::error::{ClaimboardError, Result};
use sqlparser::ast::{Query, SetExpr, Statement};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Checks that catalog entries are single, read-only SELECT statements.
///
/// Runs once when a catalog is built. Query text is never rewritten.
pub struct QueryValidator;

impl QueryValidator {
    pub fn validate(definition: &QueryDefinition) -> Result<()> {
        let unsafe_query = |reason: String| ClaimboardError::UnsafeQuery {
            label: definition.label.clone(),
            reason,
        };

        let statements = Parser::parse_sql(&PostgreSqlDialect {}, &definition.text)
            .map_err(|e| unsafe_query(format!("parse error: {}", e)))?;

        match statements.as_slice() {
            [Statement::Query(query)] => check_query(query).map_err(unsafe_query),
            [_] => Err(unsafe_query("statement is not a query".to_string())),
            [] => Err(unsafe_query("no statement found".to_string())),
            _ => Err(unsafe_query(format!(
                "expected one statement, found {}",
                statements.len()
            ))),
        }
    }
}

fn check_query(query: &Query) -> std::result::Result<(), String> {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            check_query(&cte.query)?;
        }
    }
    if !query.locks.is_empty() {
        return Err("row locking clauses are not allowed".to_string());
    }
    check_set_expr(&query.body)
}

fn check_set_expr(body: &SetExpr) -> std::result::Result<(), String> {
    match body {
        SetExpr::Select(select) => {
            if select.into.is_some() {
                return Err("SELECT INTO creates a table".to_string());
            }
            Ok(())
        }
        SetExpr::Query(query) => check_query(query),
        SetExpr::SetOperation { left, right, .. } => {
            check_set_expr(left)?;
            check_set_expr(right)
        }
        SetExpr::Values(_) | SetExpr::Table(_) => Ok(()),
        SetExpr::Insert(_) | SetExpr::Update(_) => {
            Err("data-modifying statement in query body".to_string())
        }
        #[allow(unreachable_patterns)]
        _ => Err("unsupported query body".to_string()),
    }
}

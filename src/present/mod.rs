//! Text renderings used by the command-line sink.

use crate::catalog::QueryCatalog;
use crate::chart::{result_to_values, VisualizationRule};
use crate::error::Result;
use crate::executor::{QueryOutcome, ResultSet};
use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn render_table(result: &ResultSet) -> String {
    if result.column_count() == 0 {
        return "(empty result set)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(result.column_names().into_iter().map(String::from));
    for row in result.rows() {
        builder.push_record(row.iter().map(|cell| cell.to_string()));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    format!("{}\n({} rows)", table, result.row_count())
}

pub fn render_catalog(catalog: &QueryCatalog) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Label", "Description"].map(String::from));
    for (idx, definition) in catalog.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            definition.label.clone(),
            definition.description.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

pub fn render_rules(rules: &[VisualizationRule]) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        ["Order", "Required columns", "Chart", "x / names", "y / values", "Group"]
            .map(String::from),
    );
    for (idx, rule) in rules.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            rule.required.join(", "),
            rule.kind.as_str().to_string(),
            rule.encoding.x.to_string(),
            rule.encoding.y.to_string(),
            rule.encoding.color.unwrap_or("-").to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

/// Machine-readable outcome: columns, records and the chosen chart, if any.
pub fn render_json(outcome: &QueryOutcome) -> Result<String> {
    let document = json!({
        "label": outcome.label,
        "columns": outcome.result.columns(),
        "rows": result_to_values(&outcome.result),
        "chart": outcome.chart(),
    });
    Ok(serde_json::to_string_pretty(&document)?)
}

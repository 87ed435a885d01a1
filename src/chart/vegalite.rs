//! Vega-Lite export for [`ChartSpec`].
//!
//! The renderer is a black box; this only produces the JSON document it
//! consumes, with the result rows inlined as `data.values`.

use super::spec::{ChartKind, ChartSpec};
use crate::executor::{CellValue, ResultSet};
use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Boolean(b) => json!(b),
        CellValue::Integer(i) => json!(i),
        // Non-finite floats become null
        CellValue::Float(f) => json!(f),
        CellValue::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
        CellValue::Timestamp(ts) => json!(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        CellValue::TimestampTz(ts) => json!(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        CellValue::Text(s) => json!(s),
    }
}

/// Rows as an array of `{column: value}` objects.
pub fn result_to_values(result: &ResultSet) -> Vec<Value> {
    result
        .rows()
        .iter()
        .map(|row| {
            let record: Map<String, Value> = result
                .columns()
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.name.clone(), cell_to_json(cell)))
                .collect();
            Value::Object(record)
        })
        .collect()
}

fn field_type(result: &ResultSet, field: &str) -> &'static str {
    match result.column(field).map(|c| c.column_type) {
        Some(t) if t.is_numeric() => "quantitative",
        Some(t) if t.is_temporal() => "temporal",
        _ => "nominal",
    }
}

impl ChartSpec<'_> {
    pub fn to_vega_lite(&self) -> Value {
        let data = self.data;
        let x = self.encoding.x;
        let y = self.encoding.y;

        let (mark, mut encoding) = match self.kind {
            ChartKind::Bar => (
                json!({"type": "bar"}),
                json!({
                    // null keeps the query's own ordering
                    "x": {"field": x, "type": field_type(data, x), "sort": null},
                    "y": {"field": y, "type": field_type(data, y)},
                }),
            ),
            ChartKind::Pie => (
                json!({"type": "arc"}),
                json!({
                    "theta": {"field": y, "type": "quantitative"},
                    "color": {"field": x, "type": "nominal"},
                }),
            ),
            ChartKind::Line => (
                json!({"type": "line", "point": true}),
                json!({
                    "x": {"field": x, "type": field_type(data, x)},
                    "y": {"field": y, "type": field_type(data, y)},
                }),
            ),
        };

        if let Some(color) = self.encoding.color {
            encoding["color"] = json!({"field": color, "type": "nominal"});
        }

        let mut spec = json!({
            "$schema": VEGA_LITE_SCHEMA,
            "title": self.encoding.title,
            "data": {"values": result_to_values(data)},
            "encoding": encoding,
        });

        if self.encoding.show_values && self.kind == ChartKind::Bar {
            spec["layer"] = json!([
                {"mark": mark},
                {
                    "mark": {"type": "text", "baseline": "bottom", "dy": -2},
                    "encoding": {"text": {"field": y, "type": field_type(data, y)}},
                },
            ]);
        } else {
            spec["mark"] = mark;
        }

        spec
    }
}

#[cfg(test)]
mod tests {
    use crate::chart::select;
    use crate::executor::{CellValue, Column, ColumnType, ResultSet};
    use chrono::NaiveDate;

    #[test]
    fn test_bar_with_value_labels() {
        let rs = ResultSet::try_new(
            vec![
                Column::new("City", ColumnType::Text),
                Column::new("provider_count", ColumnType::Integer),
            ],
            vec![vec![CellValue::Text("Pune".into()), CellValue::Integer(12)]],
        )
        .unwrap();
        let vl = select(&rs).unwrap().to_vega_lite();

        assert_eq!(vl["$schema"], super::VEGA_LITE_SCHEMA);
        assert_eq!(vl["title"], "Providers by City");
        assert_eq!(vl["layer"][0]["mark"]["type"], "bar");
        assert_eq!(vl["layer"][1]["mark"]["type"], "text");
        assert_eq!(vl["encoding"]["x"]["field"], "City");
        assert_eq!(vl["encoding"]["x"]["type"], "nominal");
        assert_eq!(vl["encoding"]["y"]["type"], "quantitative");
        assert_eq!(vl["data"]["values"][0]["provider_count"], 12);
    }

    #[test]
    fn test_pie_uses_theta() {
        let rs = ResultSet::try_new(
            vec![
                Column::new("Food_Type", ColumnType::Text),
                Column::new("total_qty", ColumnType::Float),
            ],
            vec![vec![CellValue::Text("Vegan".into()), CellValue::Float(40.5)]],
        )
        .unwrap();
        let vl = select(&rs).unwrap().to_vega_lite();

        assert_eq!(vl["mark"]["type"], "arc");
        assert_eq!(vl["encoding"]["theta"]["field"], "total_qty");
        assert_eq!(vl["encoding"]["color"]["field"], "Food_Type");
        assert!(vl.get("layer").is_none());
    }

    #[test]
    fn test_line_over_dates() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let rs = ResultSet::try_new(
            vec![
                Column::new("claim_date", ColumnType::Date),
                Column::new("completed_count", ColumnType::Integer),
            ],
            vec![vec![CellValue::Date(day), CellValue::Integer(9)]],
        )
        .unwrap();
        let vl = select(&rs).unwrap().to_vega_lite();

        assert_eq!(vl["mark"]["type"], "line");
        assert_eq!(vl["encoding"]["x"]["type"], "temporal");
        assert_eq!(vl["data"]["values"][0]["claim_date"], "2025-01-02");
    }

    #[test]
    fn test_utc_instants_keep_zone() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(4, 45, 0)
            .unwrap()
            .and_utc();
        let rs = ResultSet::try_new(
            vec![
                Column::new("claim_date", ColumnType::TimestampTz),
                Column::new("completed_count", ColumnType::Integer),
            ],
            vec![vec![CellValue::TimestampTz(at), CellValue::Integer(9)]],
        )
        .unwrap();
        let vl = select(&rs).unwrap().to_vega_lite();

        assert_eq!(vl["encoding"]["x"]["type"], "temporal");
        assert_eq!(vl["data"]["values"][0]["claim_date"], "2025-01-02T04:45:00Z");
    }

    #[test]
    fn test_grouped_bar_has_color() {
        let rs = ResultSet::try_new(
            vec![
                Column::new("Name", ColumnType::Text),
                Column::new("City", ColumnType::Text),
                Column::new("total_qty", ColumnType::Integer),
            ],
            vec![],
        )
        .unwrap();
        let vl = select(&rs).unwrap().to_vega_lite();

        assert_eq!(vl["encoding"]["color"]["field"], "City");
        assert_eq!(vl["data"]["values"].as_array().map(Vec::len), Some(0));
    }
}

use super::rules::{VisualizationRule, DEFAULT_RULES};
use super::spec::ChartSpec;
use crate::executor::ResultSet;

/// First-match chart selection over an ordered rule table.
#[derive(Debug, Clone, Copy)]
pub struct VisualizationSelector {
    rules: &'static [VisualizationRule],
}

impl Default for VisualizationSelector {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }
}

impl VisualizationSelector {
    pub fn with_rules(rules: &'static [VisualizationRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [VisualizationRule] {
        self.rules
    }

    /// Never fails; `None` means the result is shown as a table only.
    pub fn select<'a>(&self, result: &'a ResultSet) -> Option<ChartSpec<'a>> {
        self.rules
            .iter()
            .find(|rule| rule.matches(result))
            .map(|rule| rule.build(result))
    }
}

/// Select with the default rule table.
pub fn select(result: &ResultSet) -> Option<ChartSpec<'_>> {
    VisualizationSelector::default().select(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, Encoding};
    use crate::executor::{CellValue, Column, ColumnType};

    fn result_with(names: &[&str], rows: usize) -> ResultSet {
        let columns = names
            .iter()
            .map(|n| Column::new(*n, ColumnType::Text))
            .collect();
        let rows = (0..rows)
            .map(|i| names.iter().map(|_| CellValue::Text(i.to_string())).collect())
            .collect();
        ResultSet::try_new(columns, rows).unwrap()
    }

    #[test]
    fn test_providers_by_city_is_bar() {
        for rows in [0, 1, 25] {
            let rs = result_with(&["City", "provider_count"], rows);
            let chart = select(&rs).unwrap();
            assert_eq!(chart.kind, ChartKind::Bar);
            assert_eq!(chart.encoding.x, "City");
            assert_eq!(chart.encoding.y, "provider_count");
            assert_eq!(chart.data.row_count(), rows);
        }
    }

    #[test]
    fn test_first_match_wins() {
        let rs = result_with(&["City", "provider_count", "Food_Type", "total_qty"], 2);
        let chart = select(&rs).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.encoding.x, "City");
    }

    #[test]
    fn test_food_type_is_pie() {
        let rs = result_with(&["Food_Type", "total_qty", "claims"], 3);
        let chart = select(&rs).unwrap();
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.encoding.names(), "Food_Type");
        assert_eq!(chart.encoding.values(), "total_qty");
        assert_eq!(chart.encoding.title, "Food Type Distribution");
    }

    #[test]
    fn test_completed_by_day_is_line() {
        let rs = result_with(&["claim_date", "completed_count"], 5);
        let chart = select(&rs).unwrap();
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.encoding.x, "claim_date");
    }

    #[test]
    fn test_receivers_by_city_is_bar() {
        let rs = result_with(&["City_receiver", "claim_count"], 5);
        let chart = select(&rs).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.encoding.x, "City_receiver");
        assert_eq!(chart.encoding.y, "claim_count");
    }

    #[test]
    fn test_top_providers_grouped_by_city() {
        let rs = result_with(&["Provider_ID", "Name", "City", "total_qty"], 10);
        let chart = select(&rs).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.encoding.x, "Name");
        assert_eq!(chart.encoding.color, Some("City"));
    }

    #[test]
    fn test_group_dropped_when_column_missing() {
        let rs = result_with(&["Name", "total_qty"], 1);
        let chart = select(&rs).unwrap();
        assert_eq!(chart.encoding.x, "Name");
        assert_eq!(chart.encoding.color, None);
    }

    #[test]
    fn test_no_match_is_table_only() {
        assert!(select(&result_with(&["unrelated_col"], 3)).is_none());
        assert!(select(&result_with(&[], 0)).is_none());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(select(&result_with(&["city", "provider_count"], 1)).is_none());
    }

    #[test]
    fn test_custom_rule_table() {
        static RULES: &[VisualizationRule] = &[VisualizationRule {
            required: &["total_rows"],
            kind: ChartKind::Bar,
            encoding: Encoding {
                x: "total_rows",
                y: "total_rows",
                color: None,
                title: "Rows",
                show_values: false,
            },
        }];
        let selector = VisualizationSelector::with_rules(RULES);
        assert!(selector
            .select(&result_with(&["City", "provider_count"], 1))
            .is_none());
        assert!(selector.select(&result_with(&["total_rows"], 1)).is_some());
    }

    #[test]
    fn test_default_rule_order() {
        let order: Vec<(String, ChartKind)> = VisualizationSelector::default()
            .rules()
            .iter()
            .map(|r| (r.required.join("+"), r.kind))
            .collect();
        let expected = [
            ("City+provider_count", ChartKind::Bar),
            ("Food_Type+total_qty", ChartKind::Pie),
            ("claim_date+completed_count", ChartKind::Line),
            ("City_receiver+claim_count", ChartKind::Bar),
            ("Name+total_qty", ChartKind::Bar),
        ];
        assert_eq!(order.len(), expected.len());
        for ((required, kind), (want_required, want_kind)) in order.iter().zip(expected) {
            assert_eq!(required, want_required);
            assert_eq!(*kind, want_kind);
        }
    }
}

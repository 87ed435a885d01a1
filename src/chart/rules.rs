use super::spec::{ChartKind, ChartSpec, Encoding};
use crate::executor::ResultSet;

/// Chart choice for results that carry all of `required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualizationRule {
    pub required: &'static [&'static str],
    pub kind: ChartKind,
    pub encoding: Encoding,
}

impl VisualizationRule {
    /// Column names are compared exactly, including case.
    pub fn matches(&self, result: &ResultSet) -> bool {
        self.required.iter().all(|name| result.has_column(name))
    }

    /// The color field is optional: it is dropped when the result lacks it.
    pub fn build<'a>(&self, result: &'a ResultSet) -> ChartSpec<'a> {
        let encoding = Encoding {
            color: self.encoding.color.filter(|name| result.has_column(name)),
            ..self.encoding
        };
        ChartSpec {
            kind: self.kind,
            encoding,
            data: result,
        }
    }
}

/// Evaluation order matters: the first matching rule wins.
pub const DEFAULT_RULES: &[VisualizationRule] = &[
    VisualizationRule {
        required: &["City", "provider_count"],
        kind: ChartKind::Bar,
        encoding: Encoding {
            x: "City",
            y: "provider_count",
            color: None,
            title: "Providers by City",
            show_values: true,
        },
    },
    VisualizationRule {
        required: &["Food_Type", "total_qty"],
        kind: ChartKind::Pie,
        encoding: Encoding {
            x: "Food_Type",
            y: "total_qty",
            color: None,
            title: "Food Type Distribution",
            show_values: false,
        },
    },
    VisualizationRule {
        required: &["claim_date", "completed_count"],
        kind: ChartKind::Line,
        encoding: Encoding {
            x: "claim_date",
            y: "completed_count",
            color: None,
            title: "Completed Claims Over Time",
            show_values: false,
        },
    },
    VisualizationRule {
        required: &["City_receiver", "claim_count"],
        kind: ChartKind::Bar,
        encoding: Encoding {
            x: "City_receiver",
            y: "claim_count",
            color: None,
            title: "Receivers by City",
            show_values: true,
        },
    },
    VisualizationRule {
        required: &["Name", "total_qty"],
        kind: ChartKind::Bar,
        encoding: Encoding {
            x: "Name",
            y: "total_qty",
            color: Some("City"),
            title: "Top 10 Providers by Quantity",
            show_values: true,
        },
    },
];

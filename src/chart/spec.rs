use crate::executor::ResultSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
        }
    }
}

/// Field mapping for a chart.
///
/// For pie charts `x` holds the slice names and `y` the slice values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub x: &'static str,
    pub y: &'static str,
    pub color: Option<&'static str>,
    pub title: &'static str,
    /// Draw the value on each bar.
    pub show_values: bool,
}

impl Encoding {
    pub fn names(&self) -> &'static str {
        self.x
    }

    pub fn values(&self) -> &'static str {
        self.y
    }
}

/// Declarative chart over a borrowed result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChartSpec<'a> {
    pub kind: ChartKind,
    pub encoding: Encoding,
    #[serde(skip)]
    pub data: &'a ResultSet,
}

mod rules;
mod selector;
mod spec;
mod vegalite;

pub use rules::{VisualizationRule, DEFAULT_RULES};
pub use selector::{select, VisualizationSelector};
pub use spec::{ChartKind, ChartSpec, Encoding};
pub use vegalite::{result_to_values, VEGA_LITE_SCHEMA};

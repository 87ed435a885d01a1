mod normalize;
mod query_executor;
mod result_set;
mod runner;

pub use query_executor::QueryExecutor;
pub use result_set::{CellValue, Column, ColumnType, ResultSet};
pub use runner::{QueryOutcome, Runner};

pub mod columns;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod utils;
pub mod weeks;

use std::path::Path;

use crate::error::AppError;
use crate::models::MetricsSnapshot;

pub use columns::{resolve_columns, ColumnMap, MetricKey};
pub use export::{write_snapshot, SNAPSHOT_SHEET};
pub use loader::load;
pub use metrics::compute;
pub use weeks::select_weeks;

/// Extraction context: load -> resolve -> select -> compute, one pass,
/// no state held between runs. Each run is independent and idempotent.
#[derive(Debug, Clone)]
pub struct Pipeline {
    header_row: usize,
}

impl Pipeline {
    pub fn new(header_row: usize) -> Self {
        Self { header_row }
    }

    pub fn run(&self, path: &Path) -> Result<MetricsSnapshot, AppError> {
        let sheet = loader::load(path, self.header_row)?;
        let column_map = columns::resolve_columns(&sheet);
        let (current, previous) = weeks::select_weeks(&sheet, &column_map)?;
        Ok(metrics::compute(&current, previous.as_ref(), &column_map))
    }
}

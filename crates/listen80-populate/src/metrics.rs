//! Per-table metrics collected over a populate run.

use listen80_types::Table;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;

/// Metrics for one table, summed over all cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableMetrics {
    /// Rows written to transient files.
    pub rows_generated: u64,
    /// Rows the store accepted.
    pub rows_loaded: u64,
    /// Bytes written to transient files.
    pub bytes_written: u64,
    /// Time spent generating rows.
    pub generation_duration: Duration,
    /// Time spent writing files and importing them.
    pub load_duration: Duration,
    /// Number of bulk imports issued.
    pub batch_count: u64,
}

impl TableMetrics {
    /// Rows generated but not accepted by the store.
    pub fn rows_ignored(&self) -> u64 {
        self.rows_generated.saturating_sub(self.rows_loaded)
    }
}

/// Metrics from a populate run.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    pub tables: BTreeMap<Table, TableMetrics>,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PopulateMetrics {
    pub fn table_mut(&mut self, table: Table) -> &mut TableMetrics {
        self.tables.entry(table).or_default()
    }

    pub fn table(&self, table: Table) -> Option<&TableMetrics> {
        self.tables.get(&table)
    }

    pub fn record_generation(&mut self, table: Table, elapsed: Duration) {
        self.table_mut(table).generation_duration += elapsed;
    }

    /// Total rows accepted across all tables.
    pub fn rows_loaded(&self) -> u64 {
        self.tables.values().map(|t| t.rows_loaded).sum()
    }

    /// Calculate loaded rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_loaded() as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Log one line per table and a total.
    pub fn log_summary(&self) {
        for (table, m) in &self.tables {
            info!(
                "{}: {} rows loaded ({} ignored) in {} batches, {} bytes, generation {:?}, load {:?}",
                table,
                m.rows_loaded,
                m.rows_ignored(),
                m.batch_count,
                m.bytes_written,
                m.generation_duration,
                m.load_duration
            );
        }
        info!(
            "Populate complete: {} rows in {:?} ({:.2} rows/sec)",
            self.rows_loaded(),
            self.total_duration,
            self.rows_per_second()
        );
    }
}

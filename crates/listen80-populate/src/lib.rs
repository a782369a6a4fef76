//! Common types and the cycle pipeline for listen80 populators.
//!
//! This crate is backend-agnostic: it drives a [`DataGenerator`] through the
//! configured number of cycles and hands each record set, as a delimited
//! file, to a [`BulkLoader`]. `listen80-populate-mysql` provides the MySQL
//! loader; [`MemoryLoader`] is used for dry runs and tests.
//!
//! [`DataGenerator`]: listen80_generator::DataGenerator

pub mod args;
mod error;
pub mod files;
pub mod loader;
pub mod memory;
pub mod metrics;
pub mod pipeline;
pub mod snapshot;

pub use args::CommonPopulateArgs;
pub use error::PopulateError;
pub use loader::BulkLoader;
pub use memory::MemoryLoader;
pub use metrics::{PopulateMetrics, TableMetrics};
pub use pipeline::{PopulateOptions, PopulateReport, Populator};
pub use snapshot::{SnapshotExporter, SnapshotSummary};

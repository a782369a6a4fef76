//! listen80 data generator library
//!
//! Seeds the listen80 benchmark database: users, playlists, artists, songs,
//! playlist membership and favorites, generated deterministically from a seed
//! and bulk-imported in cycles.
//!
//! # Crates
//!
//! - `listen80_types` - Record types and the delimited row encoding
//! - `listen80_generator` - Corpus, long-tail sampler and record generators
//! - `listen80_populate` - Cycle pipeline, `BulkLoader` trait, snapshots
//! - `listen80_populate_mysql` - `LOAD DATA LOCAL INFILE` loader
//!
//! # CLI Usage
//!
//! ```bash
//! # Populate the default database with 100000 users and artists
//! listen80-datagen
//!
//! # Smaller dataset, fixed time anchor, snapshots into ./bench
//! listen80-datagen 10000 --cycles 2 --now 2024-06-01T00:00:00Z --output-dir bench
//!
//! # Generate everything without touching MySQL
//! listen80-datagen 1000 --dry-run
//! ```

pub mod populate;

pub use populate::{mask_connection_password, run_populate};

//! Record generators for the listen80 data generator.
//!
//! This crate provides the `DataGenerator` which produces users, playlists,
//! artists, songs and link records from a single seeded RNG.
//!
//! # Architecture
//!
//! ```text
//! GeneratorConfig (seed, now, caps)
//!        │
//!        ▼
//! ┌───────────────────┐
//! │   DataGenerator   │
//! │                   │
//! │  - rng (StdRng)   │
//! │  - corpus         │──── word pools, (raw, bcrypt) password pool
//! │  - sampler        │──── long-tail child counts
//! └─────────┬─────────┘
//!           │
//!           ▼
//!  UserBatch / CatalogBatch / PlaylistSong / PlaylistFavorite
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use listen80_generator::{DataGenerator, GeneratorConfig};
//!
//! let mut generator = DataGenerator::new(GeneratorConfig::new(42, Utc::now())).unwrap();
//! let batch = generator.users(100, true);
//! println!("{} users, {} playlists", batch.users.len(), batch.playlists.len());
//! ```

pub mod corpus;
pub mod generator;
pub mod generators;
pub mod long_tail;

pub use corpus::{Corpus, CorpusConfig, Credential};
pub use generator::{CatalogBatch, DataGenerator, GeneratorConfig, GeneratorError, UserBatch};
pub use generators::catalog::CatalogLimits;
pub use generators::user::{seed_accounts, FavoritingUser};
pub use long_tail::LongTailSampler;

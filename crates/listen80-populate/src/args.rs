//! Common CLI argument definitions shared by populators.

use crate::pipeline::PopulateOptions;
use chrono::{DateTime, Utc};
use clap::Args;
use listen80_generator::{CatalogLimits, CorpusConfig, GeneratorConfig};
use std::path::PathBuf;

/// Arguments that do not depend on the target store.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Target total record count, used to size the user and artist loops
    #[arg(default_value = "100000")]
    pub count: usize,

    /// Number of generate-and-load cycles the count is split into
    #[arg(long, env = "LISTEN80_CYCLES", default_value = "10")]
    pub cycles: usize,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "LISTEN80_SEED", default_value = "42")]
    pub seed: u64,

    /// Upper bound for generated timestamps (RFC 3339, defaults to the current time)
    #[arg(long, env = "LISTEN80_NOW")]
    pub now: Option<DateTime<Utc>>,

    /// Maximum albums per artist
    #[arg(long, env = "LISTEN80_MAX_ALBUMS_PER_ARTIST", default_value = "20")]
    pub max_albums_per_artist: usize,

    /// Maximum songs per album
    #[arg(long, env = "LISTEN80_MAX_SONGS_PER_ALBUM", default_value = "15")]
    pub max_songs_per_album: usize,

    /// Maximum playlists per user (also caps favorites per user)
    #[arg(long, env = "LISTEN80_MAX_PLAYLISTS_PER_USER", default_value = "10000")]
    pub max_playlists_per_user: usize,

    /// Words per name pool
    #[arg(long, env = "LISTEN80_WORD_COUNT", default_value = "10000")]
    pub word_count: usize,

    /// Passwords in the pre-hashed password pool
    #[arg(long, env = "LISTEN80_PASSWORD_COUNT", default_value = "99")]
    pub password_count: usize,

    /// bcrypt cost used for the password pool
    #[arg(long, env = "LISTEN80_BCRYPT_COST", default_value = "4")]
    pub bcrypt_cost: u32,

    /// Maximum records per snapshot file
    #[arg(long, env = "LISTEN80_SNAPSHOT_SIZE", default_value = "10000")]
    pub snapshot_size: usize,

    /// Directory for the transient delimited files
    #[arg(long, env = "LISTEN80_TMP_DIR", default_value = "/tmp")]
    pub tmp_dir: PathBuf,

    /// Directory users.json and songs.json are written to
    #[arg(long, env = "LISTEN80_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Dry-run mode: load into an in-memory store instead of the database
    #[arg(long, env = "LISTEN80_DRY_RUN")]
    pub dry_run: bool,
}

impl CommonPopulateArgs {
    /// Generator configuration, anchored at `--now` or the given fallback.
    pub fn generator_config(&self, fallback_now: DateTime<Utc>) -> GeneratorConfig {
        let mut config = GeneratorConfig::new(self.seed, self.now.unwrap_or(fallback_now));
        config.corpus = CorpusConfig {
            word_count: self.word_count,
            password_count: self.password_count,
            bcrypt_cost: self.bcrypt_cost,
        };
        config.catalog = CatalogLimits {
            max_albums_per_artist: self.max_albums_per_artist,
            max_songs_per_album: self.max_songs_per_album,
        };
        config.max_playlists_per_user = self.max_playlists_per_user;
        config
    }

    pub fn populate_options(&self) -> PopulateOptions {
        PopulateOptions {
            total_count: self.count,
            cycles: self.cycles,
            tmp_dir: self.tmp_dir.clone(),
            output_dir: self.output_dir.clone(),
            snapshot_size: self.snapshot_size,
        }
    }
}

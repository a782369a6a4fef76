//! The two-phase generate-and-load pipeline.
//!
//! Phase one runs `cycles` batches of users, playlists, artists and songs,
//! each written to a transient file and bulk-imported before the next batch
//! is generated. Phase two reads back the store-assigned playlist and song
//! ids and generates the link tables from them.

use crate::error::PopulateError;
use crate::files;
use crate::loader::BulkLoader;
use crate::metrics::PopulateMetrics;
use crate::snapshot::{SnapshotExporter, SnapshotSummary};
use listen80_generator::{DataGenerator, FavoritingUser, GeneratorConfig};
use listen80_types::{DelimitedRow, Song, SongSnapshot, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Offset applied to the generator seed for the snapshot sampler's RNG.
const SNAPSHOT_SEED_OFFSET: u64 = 0x5eed;

/// Sizing and locations for a populate run.
#[derive(Debug, Clone)]
pub struct PopulateOptions {
    /// Target total count; each cycle generates `total_count / cycles` users
    /// and as many artists.
    pub total_count: usize,
    pub cycles: usize,
    /// Directory for the transient delimited files.
    pub tmp_dir: PathBuf,
    /// Directory for `users.json` and `songs.json`.
    pub output_dir: PathBuf,
    pub snapshot_size: usize,
}

impl PopulateOptions {
    fn validate(&self) -> Result<(), PopulateError> {
        if self.cycles == 0 {
            return Err(PopulateError::Config(
                "cycles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn per_cycle(&self) -> usize {
        self.total_count / self.cycles.max(1)
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct PopulateReport {
    pub metrics: PopulateMetrics,
    pub snapshots: SnapshotSummary,
}

/// Drives a [`DataGenerator`] against a [`BulkLoader`].
pub struct Populator {
    generator: DataGenerator,
    options: PopulateOptions,
    snapshots: SnapshotExporter,
    metrics: PopulateMetrics,
    /// Generated users kept for favorite generation after all cycles.
    favoriting: Vec<FavoritingUser>,
}

impl Populator {
    /// Create a populator, building the generator's corpus up front.
    pub fn new(config: GeneratorConfig, options: PopulateOptions) -> Result<Self, PopulateError> {
        options.validate()?;

        let snapshot_rng = StdRng::seed_from_u64(config.seed.wrapping_add(SNAPSHOT_SEED_OFFSET));
        let started = Instant::now();
        let generator = DataGenerator::new(config)?;
        debug!("Generator ready in {:?}", started.elapsed());

        Ok(Self {
            generator,
            snapshots: SnapshotExporter::new(options.snapshot_size, snapshot_rng),
            options,
            metrics: PopulateMetrics::default(),
            favoriting: Vec::new(),
        })
    }

    pub fn metrics(&self) -> &PopulateMetrics {
        &self.metrics
    }

    /// Run the whole pipeline once against `loader`.
    pub async fn run<L: BulkLoader>(
        &mut self,
        loader: &mut L,
    ) -> Result<PopulateReport, PopulateError> {
        let started = Instant::now();

        info!("Truncating {} tables", Table::ALL.len());
        loader
            .truncate(&Table::ALL)
            .await
            .map_err(PopulateError::loader)?;

        let per_cycle = self.options.per_cycle();
        info!(
            "Populating {} cycles of {} users and {} artists (seed={}, now={})",
            self.options.cycles,
            per_cycle,
            per_cycle,
            self.generator.config().seed,
            self.generator.config().now
        );

        for cycle in 0..self.options.cycles {
            self.run_cycle(loader, cycle, per_cycle).await?;
        }

        let snapshots = self.snapshots.write(&self.options.output_dir)?;

        self.run_links(loader).await?;

        self.metrics.total_duration = started.elapsed();
        self.metrics.log_summary();

        Ok(PopulateReport {
            metrics: self.metrics.clone(),
            snapshots,
        })
    }

    /// Generate and load one batch of base entities.
    ///
    /// Generation time of the user batch is booked on `user`, of the catalog
    /// batch on `artist`.
    async fn run_cycle<L: BulkLoader>(
        &mut self,
        loader: &mut L,
        cycle: usize,
        count: usize,
    ) -> Result<(), PopulateError> {
        info!("Cycle {}/{}", cycle + 1, self.options.cycles);

        let started = Instant::now();
        let batch = self.generator.users(count, cycle == 0);
        self.metrics.record_generation(Table::User, started.elapsed());

        self.load(loader, &batch.users).await?;
        self.load(loader, &batch.playlists).await?;
        self.snapshots.consider_users(batch.snapshots);
        self.favoriting.extend(batch.favoriting);

        let started = Instant::now();
        let catalog = self.generator.catalog(count);
        self.metrics.record_generation(Table::Artist, started.elapsed());

        self.load(loader, &catalog.artists).await?;

        let ulids: Vec<String> = catalog.artists.iter().map(|a| a.ulid.clone()).collect();
        let artist_ids = loader
            .artist_ids(&ulids)
            .await
            .map_err(PopulateError::loader)?;

        let drafts = catalog.songs.len();
        let songs: Vec<Song> = catalog
            .songs
            .into_iter()
            .filter_map(|draft| {
                let artist_id = artist_ids.get(&draft.artist_ulid).copied()?;
                Some(draft.resolve(artist_id))
            })
            .collect();
        if songs.len() < drafts {
            warn!(
                "Skipped {} songs whose artist was not loaded",
                drafts - songs.len()
            );
        }

        self.load(loader, &songs).await?;
        self.snapshots
            .consider_songs(songs.iter().map(SongSnapshot::from));

        Ok(())
    }

    /// Read back playlist and song ids, then generate and load the links.
    async fn run_links<L: BulkLoader>(&mut self, loader: &mut L) -> Result<(), PopulateError> {
        let playlists = loader
            .playlists()
            .await
            .map_err(PopulateError::loader)?;
        let song_ids = loader
            .song_ids()
            .await
            .map_err(PopulateError::loader)?;
        info!(
            "Generating links for {} playlists and {} songs",
            playlists.len(),
            song_ids.len()
        );

        let started = Instant::now();
        let links = self.generator.playlist_songs(&playlists, &song_ids);
        self.metrics
            .record_generation(Table::PlaylistSong, started.elapsed());
        self.load(loader, &links).await?;
        drop(links);

        let started = Instant::now();
        let favorites = self
            .generator
            .playlist_favorites(&self.favoriting, &playlists);
        self.metrics
            .record_generation(Table::PlaylistFavorite, started.elapsed());
        self.load(loader, &favorites).await?;

        Ok(())
    }

    /// Write `rows` to the table's transient file, import it and remove it.
    async fn load<L: BulkLoader, T: DelimitedRow + Sync>(
        &mut self,
        loader: &mut L,
        rows: &[T],
    ) -> Result<u64, PopulateError> {
        let table = T::TABLE;
        if rows.is_empty() {
            debug!("No rows for {}", table);
            return Ok(0);
        }

        let started = Instant::now();
        let path = files::table_file(&self.options.tmp_dir, table);
        let bytes = files::write_rows(&path, rows)?;

        let result = loader.load_file(table, &path).await;
        let removed = files::remove_file(&path);
        let loaded = match result {
            Ok(loaded) => {
                removed?;
                loaded
            }
            Err(e) => {
                if let Err(cleanup) = removed {
                    warn!("Failed to remove {}: {}", path.display(), cleanup);
                }
                return Err(PopulateError::loader(e));
            }
        };

        let metrics = self.metrics.table_mut(table);
        metrics.rows_generated += rows.len() as u64;
        metrics.rows_loaded += loaded;
        metrics.bytes_written += bytes;
        metrics.load_duration += started.elapsed();
        metrics.batch_count += 1;

        info!("Loaded {} of {} rows into {}", loaded, rows.len(), table);
        Ok(loaded)
    }
}

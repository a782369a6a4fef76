//! Main data generator owning the RNG, corpus and sampler.

use crate::corpus::{Corpus, CorpusConfig};
use crate::generators::catalog::{generate_artist, CatalogLimits};
use crate::generators::links::{
    favorites_by_user, favorites_of_playlist, generate_playlist_songs,
};
use crate::generators::user::{generate_user, seed_accounts, seed_users, FavoritingUser};
use crate::long_tail::{LongTailSampler, DEFAULT_POOL_SIZE};
use chrono::{DateTime, Utc};
use listen80_types::{
    Artist, ExistingPlaylist, Playlist, PlaylistFavorite, PlaylistSong, SongDraft, User,
    UserSnapshot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::{debug, info};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// A word pool came out too small to build names from
    #[error("Corpus pool '{pool}' has {size} words, need at least {needed}")]
    CorpusTooSmall {
        pool: &'static str,
        size: usize,
        needed: usize,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Everything that parameterizes a [`DataGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the single RNG all randomness comes from.
    pub seed: u64,
    /// Upper bound for every generated timestamp.
    pub now: DateTime<Utc>,
    pub corpus: CorpusConfig,
    pub catalog: CatalogLimits,
    pub max_playlists_per_user: usize,
    /// Precomputed long-tail draws.
    pub sampler_pool_size: usize,
    /// Power-law exponent; 1.0 gives `floor(1 / U)`.
    pub power_exponent: f64,
}

impl GeneratorConfig {
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            seed,
            now,
            corpus: CorpusConfig::default(),
            catalog: CatalogLimits::default(),
            max_playlists_per_user: 10_000,
            sampler_pool_size: DEFAULT_POOL_SIZE,
            power_exponent: 1.0,
        }
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if !(self.power_exponent.is_finite() && self.power_exponent > 0.0) {
            return Err(GeneratorError::Config(format!(
                "power exponent must be positive, got {}",
                self.power_exponent
            )));
        }
        if self.corpus.password_count == 0 {
            return Err(GeneratorError::Config(
                "password pool must hold at least one password".to_string(),
            ));
        }
        Ok(())
    }
}

/// Users and playlists produced for one cycle.
#[derive(Debug, Clone, Default)]
pub struct UserBatch {
    pub users: Vec<User>,
    pub playlists: Vec<Playlist>,
    /// Generated (non-seed) users, for favorite generation after loading.
    pub favoriting: Vec<FavoritingUser>,
    /// Snapshot candidates for the generated (non-seed) users.
    pub snapshots: Vec<UserSnapshot>,
}

/// Artists and songs produced for one cycle.
#[derive(Debug, Clone, Default)]
pub struct CatalogBatch {
    pub artists: Vec<Artist>,
    pub songs: Vec<SongDraft>,
}

/// Data generator that produces deterministic records.
///
/// All randomness flows from one seeded RNG, and all timestamps are bounded
/// by the configured `now`, so the same config and call sequence always
/// produce the same records.
pub struct DataGenerator {
    rng: StdRng,
    corpus: Corpus,
    sampler: LongTailSampler,
    /// Every account handed out so far, seed accounts included.
    accounts: HashSet<String>,
    config: GeneratorConfig,
}

impl DataGenerator {
    /// Create a generator, building the corpus and the sampler pool.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        info!(
            "Building corpus: {} words per pool, {} passwords",
            config.corpus.word_count, config.corpus.password_count
        );
        let corpus = Corpus::build(&mut rng, &config.corpus)?;
        let sampler =
            LongTailSampler::new(&mut rng, config.sampler_pool_size, config.power_exponent);

        Ok(Self {
            rng,
            corpus,
            sampler,
            accounts: seed_accounts().map(str::to_string).collect(),
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Generate `count` users with their playlists.
    ///
    /// Accounts never repeat across calls. When `include_seed_users` is set, the three seed users are prepended;
    /// they own no playlists and are not snapshot or favorite candidates.
    pub fn users(&mut self, count: usize, include_seed_users: bool) -> UserBatch {
        let mut batch = UserBatch::default();
        if include_seed_users {
            batch.users.extend(seed_users());
        }

        for _ in 0..count {
            let generated = generate_user(
                &mut self.rng,
                &self.corpus,
                &mut self.sampler,
                &mut self.accounts,
                self.config.max_playlists_per_user,
                self.config.now,
            );
            batch.snapshots.push(generated.snapshot());
            batch.favoriting.push(generated.favoriting());
            batch.users.push(generated.user);
            batch.playlists.extend(generated.playlists);
        }

        debug!(
            "Generated {} users, {} playlists",
            batch.users.len(),
            batch.playlists.len()
        );
        batch
    }

    /// Generate `count` artists with their albums and songs.
    pub fn catalog(&mut self, count: usize) -> CatalogBatch {
        let mut batch = CatalogBatch::default();

        for _ in 0..count {
            let generated = generate_artist(
                &mut self.rng,
                &self.corpus,
                &mut self.sampler,
                self.config.catalog,
                self.config.now,
            );
            batch.artists.push(generated.artist);
            batch.songs.extend(generated.songs);
        }

        debug!(
            "Generated {} artists, {} songs",
            batch.artists.len(),
            batch.songs.len()
        );
        batch
    }

    /// Attach songs to every playlist.
    pub fn playlist_songs(
        &mut self,
        playlists: &[ExistingPlaylist],
        song_ids: &[u64],
    ) -> Vec<PlaylistSong> {
        playlists
            .iter()
            .flat_map(|playlist| generate_playlist_songs(&mut self.rng, playlist.id, song_ids))
            .collect()
    }

    /// Favorites in two passes: per user, then per playlist.
    ///
    /// The passes can produce the same (playlist, user) pair; the bulk import
    /// drops duplicates.
    pub fn playlist_favorites(
        &mut self,
        users: &[FavoritingUser],
        playlists: &[ExistingPlaylist],
    ) -> Vec<PlaylistFavorite> {
        let now = self.config.now;
        let mut favorites = Vec::new();

        for user in users {
            favorites.extend(favorites_by_user(&mut self.rng, user, playlists, now));
        }
        let by_user = favorites.len();

        for playlist in playlists {
            favorites.extend(favorites_of_playlist(
                &mut self.rng,
                &mut self.sampler,
                playlist,
                users,
                now,
            ));
        }

        debug!(
            "Generated {} favorites ({} per-user, {} per-playlist)",
            favorites.len(),
            by_user,
            favorites.len() - by_user
        );
        favorites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::user::seed_accounts;
    use chrono::TimeZone;

    fn test_config(seed: u64) -> GeneratorConfig {
        let mut config =
            GeneratorConfig::new(seed, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        config.corpus = CorpusConfig {
            word_count: 500,
            password_count: 4,
            bcrypt_cost: 4,
        };
        config.max_playlists_per_user = 50;
        config.sampler_pool_size = 1_000;
        config
    }

    #[test]
    fn test_deterministic_generation() {
        let mut gen1 = DataGenerator::new(test_config(42)).unwrap();
        let mut gen2 = DataGenerator::new(test_config(42)).unwrap();

        let users1 = gen1.users(20, true);
        let users2 = gen2.users(20, true);
        assert_eq!(users1.users, users2.users);
        assert_eq!(users1.playlists, users2.playlists);

        let songs1 = gen1.catalog(10);
        let songs2 = gen2.catalog(10);
        assert_eq!(songs1.artists, songs2.artists);
        assert_eq!(songs1.songs, songs2.songs);
    }

    #[test]
    fn test_different_seed_differs() {
        let mut gen1 = DataGenerator::new(test_config(1)).unwrap();
        let mut gen2 = DataGenerator::new(test_config(2)).unwrap();

        assert_ne!(gen1.users(5, false).users, gen2.users(5, false).users);
    }

    #[test]
    fn test_seed_users_only_when_requested() {
        let mut generator = DataGenerator::new(test_config(42)).unwrap();

        let first = generator.users(5, true);
        assert_eq!(first.users.len(), 8);
        assert_eq!(first.snapshots.len(), 5);
        assert_eq!(first.favoriting.len(), 5);
        let accounts: Vec<&str> = first.users[..3].iter().map(|u| u.account.as_str()).collect();
        assert_eq!(accounts, seed_accounts().collect::<Vec<_>>());

        let second = generator.users(5, false);
        assert_eq!(second.users.len(), 5);
    }

    #[test]
    fn test_accounts_unique_across_batches() {
        let mut generator = DataGenerator::new(test_config(42)).unwrap();

        let mut accounts = HashSet::new();
        for first in [true, false, false] {
            for user in generator.users(2_000, first).users {
                assert!(accounts.insert(user.account), "duplicate account");
            }
        }
        assert_eq!(accounts.len(), 6_003);
    }

    #[test]
    fn test_invalid_exponent() {
        let mut config = test_config(42);
        config.power_exponent = 0.0;
        assert!(matches!(
            DataGenerator::new(config),
            Err(GeneratorError::Config(_))
        ));
    }

    #[test]
    fn test_links() {
        let mut generator = DataGenerator::new(test_config(42)).unwrap();
        let now = generator.config().now;
        let batch = generator.users(10, false);

        let playlists: Vec<ExistingPlaylist> = (1..=20)
            .map(|id| ExistingPlaylist { id, created_at: now })
            .collect();
        let song_ids: Vec<u64> = (1..=100).collect();

        let links = generator.playlist_songs(&playlists, &song_ids);
        assert!(links.iter().all(|l| (1..=20).contains(&l.playlist_id)));

        let favorites = generator.playlist_favorites(&batch.favoriting, &playlists);
        assert!(favorites.iter().all(|f| f.created_at == now));
        assert!(favorites.iter().all(|f| batch
            .favoriting
            .iter()
            .any(|u| u.account == f.favorite_user_account)));
    }
}

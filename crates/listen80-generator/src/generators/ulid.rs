//! ULID generator.

use chrono::{DateTime, Utc};
use rand::Rng;
use ulid::Ulid;

/// Generate a ULID whose timestamp part is `at`, with random bits from `rng`.
///
/// ULIDs sort by `at`, so playlists created later sort later.
pub fn generate_ulid<R: Rng>(rng: &mut R, at: DateTime<Utc>) -> String {
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or(0);
    Ulid::from_parts(millis, rng.random::<u128>()).to_string()
}

//! Timestamp generators.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Uniform random timestamp in `[start, end]`, second precision.
///
/// Returns `start` when the range is empty.
pub fn between<R: Rng>(rng: &mut R, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        return start;
    }

    let random_ts = rng.random_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
}

/// Uniform random timestamp within the year before `now`.
pub fn within_past_year<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    between(rng, now - Duration::days(365), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_between_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        for _ in 0..100 {
            let dt = between(&mut rng, start, now());
            assert!(dt >= start && dt <= now());
        }
    }

    #[test]
    fn test_empty_range_returns_start() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(between(&mut rng, now(), now()), now());
        assert_eq!(between(&mut rng, now(), now() - Duration::days(1)), now());
    }

    #[test]
    fn test_within_past_year() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let dt = within_past_year(&mut rng, now());
            assert!(dt <= now());
            assert!(dt >= now() - Duration::days(365));
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let v1 = between(&mut StdRng::seed_from_u64(42), start, now());
        let v2 = between(&mut StdRng::seed_from_u64(42), start, now());
        assert_eq!(v1, v2);
    }
}

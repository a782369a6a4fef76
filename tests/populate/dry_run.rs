//! Dry-run populate: the whole pipeline against the in-memory loader.

use super::small_run_args;
use listen80_datagen::run_populate;
use listen80_types::{SongSnapshot, Table, UserSnapshot};
use tempfile::TempDir;

#[tokio::test]
async fn test_dry_run_writes_snapshots() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("listen80=debug")
        .try_init()
        .ok();

    let dir = TempDir::new()?;
    let report = run_populate(small_run_args(dir.path(), "60", &["--dry-run"])).await?;

    let users: Vec<UserSnapshot> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("users.json"))?)?;
    assert_eq!(users.len(), 25);
    assert_eq!(report.snapshots.users_written, 25);
    assert!(users.iter().all(|u| !u.password.is_empty()));

    let songs: Vec<SongSnapshot> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("songs.json"))?)?;
    let loaded_songs = report.metrics.table(Table::Song).map_or(0, |m| m.rows_loaded);
    assert_eq!(songs.len() as u64, loaded_songs.min(25));

    // Three seed users on top of 2 cycles x 30 generated users.
    let loaded_users = report.metrics.table(Table::User).map_or(0, |m| m.rows_loaded);
    assert!(loaded_users <= 63);
    assert!(loaded_users > 50);

    for table in Table::ALL {
        assert!(!dir.path().join(table.name()).exists());
    }
    Ok(())
}

#[tokio::test]
async fn test_dry_run_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    run_populate(small_run_args(first.path(), "20", &["--dry-run"])).await?;
    run_populate(small_run_args(second.path(), "20", &["--dry-run"])).await?;

    for file in ["users.json", "songs.json"] {
        assert_eq!(
            std::fs::read_to_string(first.path().join(file))?,
            std::fs::read_to_string(second.path().join(file))?,
            "{file} differs between runs with the same seed"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_zero_cycles_fails() {
    let dir = TempDir::new().unwrap();
    let mut args = small_run_args(dir.path(), "20", &["--dry-run"]);
    args.common.cycles = 0;
    assert!(run_populate(args).await.is_err());
}

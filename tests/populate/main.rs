//! Populate integration tests.
//!
//! Each test runs the full command handler:
//! 1. Parses arguments the way the binary does
//! 2. Generates and loads a small dataset with a fixed seed and time anchor
//! 3. Checks the snapshot files and the loaded tables

mod dry_run;
mod mysql_populate;

use clap::Parser;
use listen80_populate_mysql::MySQLPopulateArgs;
use std::path::Path;

pub const SEED: &str = "42";
pub const NOW: &str = "2024-06-01T12:00:00Z";

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    args: MySQLPopulateArgs,
}

/// Arguments for a small run writing into `dir`.
pub fn small_run_args(dir: &Path, count: &str, extra: &[&str]) -> MySQLPopulateArgs {
    let dir = dir.to_str().expect("temp dir is valid UTF-8");
    let mut argv = vec![
        "listen80-datagen",
        count,
        "--cycles",
        "2",
        "--seed",
        SEED,
        "--now",
        NOW,
        "--word-count",
        "500",
        "--password-count",
        "5",
        "--max-playlists-per-user",
        "30",
        "--snapshot-size",
        "25",
        "--tmp-dir",
        dir,
        "--output-dir",
        dir,
    ];
    argv.extend_from_slice(extra);
    TestCli::parse_from(argv).args
}

//! Command-line interface for listen80-datagen
//!
//! # Usage Examples
//!
//! ```bash
//! # Populate with the defaults (100000 users and artists in 10 cycles)
//! listen80-datagen
//!
//! # Custom database and dataset size
//! MYSQL_CONNECTION_STRING=mysql://isucon:isucon@db:3306/isucon_listen80 \
//!   listen80-datagen 20000 --cycles 4 --seed 7
//!
//! # Dry run: generate and write snapshots without MySQL
//! RUST_LOG=debug listen80-datagen 1000 --dry-run --output-dir /tmp/listen80
//! ```

use clap::Parser;
use listen80_datagen::run_populate;
use listen80_populate_mysql::MySQLPopulateArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listen80-datagen")]
#[command(about = "Populate the listen80 benchmark database with synthetic data")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: MySQLPopulateArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_populate(cli.args).await {
        tracing::error!("Populate failed: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

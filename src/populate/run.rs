//! Populate command runner.

use anyhow::Context;
use chrono::Utc;
use listen80_populate::{MemoryLoader, PopulateReport, Populator};
use listen80_populate_mysql::{MySQLLoader, MySQLPopulateArgs};

use super::mask_connection_password;

/// Generate the dataset and load it into MySQL, or into memory for a dry run.
pub async fn run_populate(args: MySQLPopulateArgs) -> anyhow::Result<PopulateReport> {
    let common = &args.common;
    let config = common.generator_config(Utc::now());
    let options = common.populate_options();

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {:?}",
            options.output_dir
        )
    })?;
    std::fs::create_dir_all(&options.tmp_dir)
        .with_context(|| format!("Failed to create temporary directory {:?}", options.tmp_dir))?;

    tracing::info!(
        "Populating {} records in {} cycles (seed={}, now={})",
        options.total_count,
        options.cycles,
        config.seed,
        config.now
    );

    if common.dry_run {
        tracing::info!(
            "[DRY-RUN] Loading into memory instead of {}",
            mask_connection_password(&args.mysql_connection_string)
        );
        let mut populator =
            Populator::new(config, options).context("Failed to prepare the generator")?;
        let mut loader = MemoryLoader::new();
        return populator
            .run(&mut loader)
            .await
            .context("Dry-run populate failed");
    }

    let mut populator =
        Populator::new(config, options.clone()).context("Failed to prepare the generator")?;

    let masked = mask_connection_password(&args.mysql_connection_string);
    tracing::info!("Connecting to MySQL at {}", masked);
    let mut loader = MySQLLoader::connect(&args.mysql_connection_string, &options.tmp_dir)
        .await
        .with_context(|| format!("Failed to connect to MySQL at {masked}"))?;

    let result = populator
        .run(&mut loader)
        .await
        .context("Failed to populate MySQL");

    // Disconnect on both paths; a populate error takes precedence.
    let disconnected = loader
        .disconnect()
        .await
        .context("Failed to disconnect from MySQL");
    let report = result?;
    disconnected?;

    Ok(report)
}

//! Populate command runner.

use anyhow::Context;
use seed_generator::DatasetGenerator;
use seed_populate_sqlite::{PopulateMetrics, SqlitePopulateArgs, SqlitePopulator};

/// Run the populate command: generate a dataset and write it to SQLite.
///
/// Returns `None` in dry-run mode, where the dataset is generated and
/// validated but nothing is written.
pub fn run_populate(args: SqlitePopulateArgs) -> anyhow::Result<Option<PopulateMetrics>> {
    let config = args
        .common
        .resolve_config()
        .context("Invalid generation config")?;
    let mut generator = DatasetGenerator::new(config, args.common.seed);

    if args.common.dry_run {
        let dataset = generator.generate().context("Failed to generate dataset")?;
        for (table, count) in dataset.row_counts() {
            tracing::info!("[DRY-RUN] {}: {} rows", table, count);
        }

        let violations = dataset.validate();
        if !violations.is_empty() {
            for violation in &violations {
                tracing::error!("[DRY-RUN] {}", violation);
            }
            anyhow::bail!("Dataset failed validation with {} violation(s)", violations.len());
        }

        tracing::info!(
            "[DRY-RUN] Would write {} rows to {} (seed={})",
            dataset.total_rows(),
            args.db_path.display(),
            args.common.seed
        );
        return Ok(None);
    }

    tracing::info!(
        "Populating {} (seed={}, reset={})",
        args.db_path.display(),
        args.common.seed,
        args.reset
    );

    let mut populator = SqlitePopulator::open(&args.db_path)
        .with_context(|| format!("Failed to open database {:?}", args.db_path))?
        .with_batch_size(args.common.batch_size);

    populator
        .prepare_store(args.reset)
        .context("Failed to prepare the database")?;

    let metrics = populator
        .populate(&mut generator)
        .context("Failed to populate the database")?;

    for (table, count) in populator.row_counts()? {
        tracing::info!("{}: {} rows", table, count);
    }

    tracing::info!(
        "Generation {:?}, insert {:?}, {} batches ({} recovered), {} parent links",
        metrics.generation_duration,
        metrics.insert_duration,
        metrics.batch_count,
        metrics.fallback_count,
        metrics.parent_links
    );

    populator.close().context("Failed to close the database")?;
    Ok(Some(metrics))
}

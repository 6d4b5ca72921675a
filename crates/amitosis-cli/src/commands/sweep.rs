use super::ensure_parent_dir;
use crate::cli::SweepArgs;
use crate::config::build_sweep_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use amitosis::core::io::trajectory;
use amitosis::engine::progress::ProgressReporter;
use amitosis::workflows;
use tracing::{info, warn};

pub async fn run(args: SweepArgs, show_progress: bool) -> Result<()> {
    info!("Building sweep configuration from {:?}", &args.config);
    let sweep = build_sweep_config(&args)?;

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Sweeping {} parameter combination(s), {} replicate(s) each...",
        sweep.len(),
        sweep.n_reps
    );

    let result = tokio::task::block_in_place(|| workflows::sweep::run(&sweep, &reporter))?;

    if result.records.is_empty() {
        warn!("Sweep completed but produced no trajectory rows.");
    }

    ensure_parent_dir(&args.output)?;
    trajectory::write_to_path(&result.records, &args.output)?;

    println!(
        "✓ {} point(s), {} row(s) written to: {} (seed {})",
        result.points,
        result.records.len(),
        args.output.display(),
        result.seed
    );
    Ok(())
}

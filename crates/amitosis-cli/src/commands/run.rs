use super::ensure_parent_dir;
use crate::cli::RunArgs;
use crate::config::build_run_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use amitosis::core::io::trajectory;
use amitosis::engine::progress::ProgressReporter;
use amitosis::workflows;
use tracing::info;

pub async fn run(args: RunArgs, show_progress: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_run_config(&args)?;

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Evolving {} replicate(s) of {} individuals for {} generations ({})...",
        config.population.n_reps,
        config.population.size,
        config.run.generations,
        config.segregation
    );
    info!("Invoking the evolve workflow...");

    let result = tokio::task::block_in_place(|| workflows::evolve::run(&config, &reporter))?;

    info!(
        "Workflow finished with seed {}, {} snapshot(s).",
        result.seed,
        result.records.len()
    );

    ensure_parent_dir(&args.output)?;
    trajectory::write_to_path(&result.records, &args.output)?;

    if let Some(last) = result.records.last() {
        println!(
            "✓ Generation {}: mean fitness {:.6}. Trajectory written to: {} (seed {})",
            last.generation,
            last.fitness_mean,
            args.output.display(),
            result.seed
        );
    }

    Ok(())
}

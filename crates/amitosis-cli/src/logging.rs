use crate::error::{CliError, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Installs the global subscriber.
///
/// The console follows `-v`/`--quiet`. The optional log file is appended to and always
/// records at least `INFO`, so drawn seeds survive a quiet run.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(console_level(verbosity, quiet));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let layer = fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_thread_ids(true)
                .with_target(true)
                .with_filter(file_level(verbosity));
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

fn console_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn file_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 | 1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!("This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    fn verbosity_maps_to_console_levels() {
        assert_eq!(console_level(0, false), LevelFilter::WARN);
        assert_eq!(console_level(1, false), LevelFilter::INFO);
        assert_eq!(console_level(2, false), LevelFilter::DEBUG);
        assert_eq!(console_level(7, false), LevelFilter::TRACE);
        assert_eq!(console_level(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn log_file_never_drops_below_info() {
        assert_eq!(file_level(0), LevelFilter::INFO);
        assert_eq!(file_level(1), LevelFilter::INFO);
        assert_eq!(file_level(2), LevelFilter::DEBUG);
        assert_eq!(file_level(4), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn file_layer_writes_thread_ids_and_levels() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let file = std::fs::File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            debug!("Snapshot collected at generation 10.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Snapshot collected at generation 10."));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}

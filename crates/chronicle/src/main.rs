//! chronicle - changelog generator driven by configurable commit patterns

mod cli;
mod exit_codes;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose);

    if let Err(e) = cli.execute() {
        output::error(&format!("{:#}", e));
        std::process::exit(exit_codes::for_error(&e));
    }
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG (default: warn, debug with --verbose)
/// - File: always debug-level JSON to ~/.chronicle/logs/
fn init_tracing(verbose: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_level = if verbose { "debug" } else { "warn" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "chronicle.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".chronicle").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}

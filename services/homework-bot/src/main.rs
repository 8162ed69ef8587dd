//! Homework bot CLI
//!
//! Command-line interface for the homework review status notifier.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{check_tokens, engine::current_epoch_secs, load_config, Config};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Homework review status notifier")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (overrides config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Unix timestamp to start watching from (defaults to now)
    #[arg(long)]
    from_date: Option<i64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let mut config = match &args.config {
        Some(config_path) => load_config(config_path)?,
        None => Config::default(),
    };
    config.resolve_secrets();

    if let Some(log_file) = args.log_file.clone() {
        config.logging.file = Some(log_file);
    }

    let _guard = init_logging(args.log_level, config.logging.file.as_deref())?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, from_date={:?}, log_level={:?}",
        args.config,
        args.from_date,
        args.log_level
    );

    if !check_tokens(&config) {
        tracing::error!(
            "Required environment variables are missing: {}",
            config.missing_secrets().join(", ")
        );
        eprintln!("Отсутствуют переменные окружения");
        std::process::exit(1);
    }

    let from_date = args.from_date.unwrap_or_else(current_epoch_secs);
    homework_bot::run(config, from_date).await?;

    Ok(())
}

/// Log to stdout and, when configured, append to a file
fn init_logging(
    level: Level,
    file: Option<&std::path::Path>,
) -> std::io::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let (file_layer, guard) = match file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("log file path {:?} has no file name", path),
                )
            })?;
            std::fs::create_dir_all(directory)?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .init();

    Ok(guard)
}

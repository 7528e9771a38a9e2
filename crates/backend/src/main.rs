pub mod domain;
pub mod shared;
pub mod usecases;

use contracts::usecases::u501_import_from_petpooja::ImportOutcome;
use domain::a001_petpooja_sale::repository::SalesStore;
use shared::config::{self, PetpoojaConfig};
use std::process::ExitCode;
use std::time::Duration;
use usecases::u501_import_from_petpooja::petpooja_api_client::{
    Fetcher, ReqwestTransport, RetryPolicy,
};
use usecases::u501_import_from_petpooja::ImportExecutor;

/// Exit status for configuration problems and unexpected failures
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    match run().await {
        Ok(outcome) => {
            if let ImportOutcome::NoData { .. } = outcome {
                tracing::info!("Exiting without data.");
            }
            ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(EXIT_FATAL))
        }
        Err(e) => {
            tracing::error!("Fatal error: {:#}", e);
            tracing::debug!("{:?}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run() -> anyhow::Result<ImportOutcome> {
    // Credentials first: a missing variable must stop us before any request
    let petpooja = PetpoojaConfig::from_env()?;
    let settings = config::load_settings()?;
    let db_path = config::get_database_path(&settings)?;

    let transport = ReqwestTransport::new(Duration::from_secs(settings.fetch.timeout_secs))?;
    let policy = RetryPolicy {
        max_retries: settings.fetch.max_retries,
        initial_delay: Duration::from_millis(settings.fetch.initial_delay_ms),
    };
    let executor = ImportExecutor::new(Fetcher::new(transport, policy), SalesStore::new(&db_path)?);

    executor.run(&petpooja).await
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("petpooja-sales-fetcher.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn,sea_orm=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

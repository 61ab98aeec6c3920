//! `ticket-desk-seed` - provisions the dashboard tables and loads placeholder rows.
//!
//! Takes no arguments; everything comes from the environment (see
//! [`ticket_desk::config::runtime::RuntimeConfig`]). Exits non-zero on any
//! failure that aborts the run.

use dotenvy::dotenv;
use ticket_desk::config::{database, dataset, runtime::RuntimeConfig};
use ticket_desk::errors::Result;
use ticket_desk::seed;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Read the configuration once
    let config = RuntimeConfig::from_env()
        .inspect_err(|e| error!("Invalid configuration: {}", e))?;
    info!(
        "Seeding {} with policy {:?}",
        config.redacted_database_url(),
        config.policy
    );

    // 4. Load the dataset
    let data = match &config.dataset_path {
        Some(path) => dataset::load_dataset(path),
        None => dataset::default_dataset(),
    }
    .inspect_err(|e| error!("Failed to load seed dataset: {}", e))?;

    // 5. Connect, seed, disconnect
    let db = database::connect(&config)
        .await
        .inspect_err(|e| error!("An error occurred while connecting to the database: {}", e))?;

    let outcome = seed::run(&db, &data, config.policy).await;

    if let Err(e) = db.close().await {
        error!("Failed to close database connection cleanly: {}", e);
    }

    let report = outcome.inspect_err(|e| {
        if e.is_connection() {
            error!("Lost the database connection while seeding: {}", e);
        } else {
            error!(
                "An error occurred while attempting to seed the database: {}",
                e
            );
        }
    })?;
    info!("Seed complete: {}", report);
    if report.total_failed() > 0 {
        error!("{} rows could not be seeded", report.total_failed());
    }

    Ok(())
}

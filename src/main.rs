//! Daily reminder sweep binary.
//!
//! Meant to be invoked once a day by an external scheduler (cron or
//! similar). It evaluates the contribution and bill reminder rules for
//! today's date and dispatches the resulting intents through the configured
//! gateway. Partial delivery failures are logged, never fatal.

use dotenvy::dotenv;
use roomledger::{
    config,
    core::notify::{self, LoggingGateway},
    errors::Result,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();

    let settings = config::settings::load_default_settings()?;
    info!(
        daily_food_budget = settings.daily_food_budget,
        low_balance_threshold = settings.low_balance_threshold,
        "settings loaded"
    );

    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("database ready at {}", config::database::get_database_url());

    let today = chrono::Utc::now().date_naive();
    let gateway = LoggingGateway;

    let mut intents = notify::contribution_reminder_sweep(&db, today).await?;
    intents.extend(notify::bill_reminder_sweep(&db, today).await?);
    info!(count = intents.len(), %today, "reminder intents decided");

    let mut delivered = 0usize;
    let mut failed = 0usize;
    for intent in &intents {
        let report = notify::dispatch(&gateway, intent);
        delivered += report.delivered.len();
        failed += report.failures.len();
    }

    if failed > 0 {
        warn!(delivered, failed, "sweep finished with delivery failures");
    } else {
        info!(delivered, "sweep finished");
    }

    Ok(())
}

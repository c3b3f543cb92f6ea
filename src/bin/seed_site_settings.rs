//! Inserts the default site settings. Rows that already exist are left untouched.

use std::process::ExitCode;

use sqlx::PgPool;

use siteadmin::{
    config::DatabaseConfig,
    settings::{defaults::default_settings, repo::PgSettingsStore, seed::run_seed},
    state::connect,
    telemetry,
};

async fn open_pool() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    let pool = connect(&config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let pool = match open_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "seeding failed");
            return ExitCode::FAILURE;
        }
    };

    let code = run_seed(&PgSettingsStore::new(pool.clone()), default_settings()).await;
    pool.close().await;
    code
}

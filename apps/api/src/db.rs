use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

/// Schema for users and cached industry insights. Every statement is idempotent.
const MIGRATION_0001: &str = include_str!("../migrations/0001_init.sql");

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Applies the embedded schema. Safe to run on every startup.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    pool.execute(MIGRATION_0001)
        .await
        .context("migration 0001_init failed")?;
    info!("Database schema is up to date");
    Ok(())
}

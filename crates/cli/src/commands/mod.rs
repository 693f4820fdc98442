//! CLI subcommand implementations.

pub mod account;
pub mod migrate;

use secrecy::SecretString;
use sqlx::PgPool;

/// Error returned when no database URL is configured.
#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: KEBUMIFY_DATABASE_URL (or DATABASE_URL)")]
pub struct MissingDatabaseUrl;

/// Read the database URL from `KEBUMIFY_DATABASE_URL`, falling back to
/// `DATABASE_URL`. Loads `.env` first if present.
///
/// # Errors
///
/// Returns [`MissingDatabaseUrl`] if neither variable is set.
pub fn database_url() -> Result<SecretString, MissingDatabaseUrl> {
    dotenvy::dotenv().ok();

    std::env::var("KEBUMIFY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MissingDatabaseUrl)
}

/// Connect to the Kebumify database.
async fn connect(url: &SecretString) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    kebumify_web::db::create_pool(url).await
}

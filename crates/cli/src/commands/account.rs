//! Account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an approved admin account
//! kb-cli account create-admin -e admin@kebumify.id -p 'rahasia-banget' -s "Kebumify" -w 081234567890
//!
//! # Approve or reject a seller
//! kb-cli account approve -e sri@kebumen.id
//! kb-cli account reject -e sri@kebumen.id
//!
//! # List sellers waiting for approval
//! kb-cli account pending
//! ```

use kebumify_core::{Email, EmailError};
use kebumify_web::db::{AccountRepository, RepositoryError};
use kebumify_web::models::Account;
use kebumify_web::services::auth::{AuthError, AuthService, RegistrationInput};
use thiserror::Error;

use super::{MissingDatabaseUrl, connect, database_url};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    MissingEnvVar(#[from] MissingDatabaseUrl),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("No account with email: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create an already-approved admin account.
///
/// # Errors
///
/// Returns an error if validation fails, the email is taken, or the database
/// is unreachable.
pub async fn create_admin(input: RegistrationInput<'_>) -> Result<Account, AccountError> {
    let pool = connect(&database_url()?).await?;

    tracing::info!("Creating admin account: {}", input.email);
    let account = AuthService::new(&pool).create_admin(input).await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}",
        account.id,
        account.email
    );
    Ok(account)
}

/// Approve (`true`) or reject (`false`) the account registered under `email`.
///
/// # Errors
///
/// Returns `AccountError::NotFound` if no account uses that email.
pub async fn set_active(email: &str, is_active: bool) -> Result<Account, AccountError> {
    let email = Email::parse(email)?;
    let pool = connect(&database_url()?).await?;
    let accounts = AccountRepository::new(&pool);

    let account = accounts
        .get_by_email(&email)
        .await?
        .ok_or_else(|| AccountError::NotFound(email.to_string()))?;

    let account = accounts.set_active(account.id, is_active).await?;
    tracing::info!(
        "Account {} ({}) is now {}",
        account.email,
        account.store_name,
        if account.is_active { "approved" } else { "rejected" }
    );
    Ok(account)
}

/// Print the accounts waiting for approval.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn pending() -> Result<(), AccountError> {
    let pool = connect(&database_url()?).await?;
    let accounts = AccountRepository::new(&pool).list_pending().await?;

    #[allow(clippy::print_stdout)]
    {
        if accounts.is_empty() {
            println!("No accounts waiting for approval.");
        }
        for account in &accounts {
            println!(
                "{}  {:<32}  {:<24}  {}  registered {}",
                account.id,
                account.email.as_str(),
                account.store_name,
                account.whatsapp,
                account.created_at.format("%Y-%m-%d %H:%M")
            );
        }
    }

    Ok(())
}

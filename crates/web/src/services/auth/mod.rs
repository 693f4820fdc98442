//! Authentication service.
//!
//! Provides seller registration, password login and admin account creation.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use kebumify_core::{Email, Role, WhatsappNumber};

use crate::db::RepositoryError;
use crate::db::accounts::{AccountRepository, NewAccount};
use crate::models::Account;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum store name length.
const MAX_STORE_NAME_LENGTH: usize = 120;

/// Raw registration input, validated by [`AuthService::register`].
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    /// Login email address.
    pub email: &'a str,
    /// Plain-text password.
    pub password: &'a str,
    /// Display name of the store.
    pub store_name: &'a str,
    /// WhatsApp number in any common Indonesian form.
    pub whatsapp: &'a str,
}

/// Authentication service.
pub struct AuthService<'a> {
    accounts: AccountRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }

    /// Register a seller account.
    ///
    /// New sellers start inactive and wait for an admin to approve them.
    ///
    /// # Errors
    ///
    /// Returns a validation error (`InvalidEmail`, `WeakPassword`,
    /// `InvalidWhatsapp`, `MissingStoreName`) for bad input, or
    /// `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, input: RegistrationInput<'_>) -> Result<Account, AuthError> {
        self.create_account(input, Role::Member, false).await
    }

    /// Create an already-approved admin account.
    ///
    /// # Errors
    ///
    /// Same as [`AuthService::register`].
    pub async fn create_admin(&self, input: RegistrationInput<'_>) -> Result<Account, AuthError> {
        self.create_account(input, Role::Admin, true).await
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is malformed or
    /// unknown, or the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (account, password_hash) = self
            .accounts
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(account)
    }

    async fn create_account(
        &self,
        input: RegistrationInput<'_>,
        role: Role,
        is_active: bool,
    ) -> Result<Account, AuthError> {
        let email = Email::parse(input.email)?;
        validate_password(input.password)?;
        let store_name = validate_store_name(input.store_name)?;
        let whatsapp = WhatsappNumber::parse(input.whatsapp)?;

        let password_hash = hash_password(input.password)?;

        let account = self
            .accounts
            .create_with_password(
                NewAccount {
                    email: &email,
                    store_name,
                    whatsapp: &whatsapp,
                    role,
                    is_active,
                },
                &password_hash,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %account.id, %role, "Account created");
        Ok(account)
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.trim().is_empty() {
        return Err(AuthError::WeakPassword(
            "password cannot be only whitespace".to_owned(),
        ));
    }
    Ok(())
}

/// Trim and check a store name.
fn validate_store_name(name: &str) -> Result<&str, AuthError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_STORE_NAME_LENGTH {
        return Err(AuthError::MissingStoreName);
    }
    Ok(name)
}

/// Hash a password with Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("keripik-tempe-2024").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("keripik-tempe-2024", &hash).is_ok());
        assert!(matches!(
            verify_password("keripik-tempe-2025", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("whatever1", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            validate_password("          "),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("gethuk-goreng").is_ok());
    }

    #[test]
    fn test_validate_store_name() {
        assert_eq!(validate_store_name("  Lanting Bu Yati ").unwrap(), "Lanting Bu Yati");
        assert!(matches!(
            validate_store_name("   "),
            Err(AuthError::MissingStoreName)
        ));
        assert!(matches!(
            validate_store_name(&"x".repeat(121)),
            Err(AuthError::MissingStoreName)
        ));
    }
}

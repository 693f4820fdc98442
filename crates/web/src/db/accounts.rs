//! Account repository for database operations.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database. Rows are converted into domain types here,
//! and any value that fails validation is reported as
//! [`RepositoryError::DataCorruption`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kebumify_core::{Email, Role, UserId, WhatsappNumber};

use super::RepositoryError;
use crate::gate::{ApprovalLookup, ApprovalStore};
use crate::models::{Account, AccountApproval, AccountStats};

/// Columns selected for every account query.
const ACCOUNT_COLUMNS: &str = r"
    id, email, store_name, whatsapp, role::text AS role, is_active,
    created_at, updated_at
";

/// Raw `kebumify.profile` row.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: UserId,
    email: String,
    store_name: String,
    whatsapp: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let whatsapp = WhatsappNumber::parse(&row.whatsapp).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid whatsapp number in database: {e}"))
        })?;
        let role = parse_role(&row.role)?;

        Ok(Self {
            id: row.id,
            email,
            store_name: row.store_name,
            whatsapp,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Raw approval projection row.
#[derive(Debug, sqlx::FromRow)]
struct ApprovalRow {
    is_active: bool,
    role: String,
}

impl TryFrom<ApprovalRow> for AccountApproval {
    type Error = RepositoryError;

    fn try_from(row: ApprovalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            is_active: row.is_active,
            role: parse_role(&row.role)?,
        })
    }
}

/// Raw account counters row.
#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total: i64,
    active: i64,
    pending: i64,
    admins: i64,
}

fn parse_role(raw: &str) -> Result<Role, RepositoryError> {
    raw.parse::<Role>()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))
}

fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

/// Fields required to create an account.
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    /// Login email address.
    pub email: &'a Email,
    /// Display name of the store.
    pub store_name: &'a str,
    /// WhatsApp contact number.
    pub whatsapp: &'a WhatsappNumber,
    /// Platform role.
    pub role: Role,
    /// Initial approval state (`false` for self-registered sellers).
    pub is_active: bool,
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<Account>, RepositoryError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM kebumify.profile WHERE id = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Account::try_from).transpose()
    }

    /// Get an account by its email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM kebumify.profile WHERE email = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(Account::try_from).transpose()
    }

    /// Create an account together with its password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        account: NewAccount<'_>,
        password_hash: &str,
    ) -> Result<Account, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO kebumify.profile (email, store_name, whatsapp, role, is_active)
             VALUES ($1, $2, $3, $4::kebumify.account_role, $5)
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account.email.as_str())
            .bind(account.store_name)
            .bind(account.whatsapp.as_str())
            .bind(account.role.as_str())
            .bind(account.is_active)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        let created = Account::try_from(row)?;

        sqlx::query(
            r"
            INSERT INTO kebumify.profile_password (profile_id, password_hash)
            VALUES ($1, $2)
            ",
        )
        .bind(created.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Get an account and its password hash by email.
    ///
    /// Returns `None` if the account doesn't exist or has no password set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        let Some(account) = self.get_by_email(email).await? else {
            return Ok(None);
        };

        let hash = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash
            FROM kebumify.profile_password
            WHERE profile_id = $1
            ",
        )
        .bind(account.id)
        .fetch_optional(self.pool)
        .await?;

        Ok(hash.map(|hash| (account, hash)))
    }

    /// Get the approval projection (`is_active`, `role`) of an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored role is unknown.
    pub async fn get_approval(
        &self,
        id: UserId,
    ) -> Result<Option<AccountApproval>, RepositoryError> {
        let row = sqlx::query_as::<_, ApprovalRow>(
            r"
            SELECT is_active, role::text AS role
            FROM kebumify.profile
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(AccountApproval::try_from).transpose()
    }

    /// Approve (`true`) or revoke (`false`) an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_active(&self, id: UserId, is_active: bool) -> Result<Account, RepositoryError> {
        let sql = format!(
            "UPDATE kebumify.profile
             SET is_active = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(is_active)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Account::try_from(row)
    }

    /// List seller accounts waiting for approval, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored row is invalid.
    pub async fn list_pending(&self) -> Result<Vec<Account>, RepositoryError> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS}
             FROM kebumify.profile
             WHERE role = 'member' AND NOT is_active
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    /// Count accounts for the admin panel.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<AccountStats, RepositoryError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE is_active) AS active,
                   COUNT(*) FILTER (WHERE role = 'member' AND NOT is_active) AS pending,
                   COUNT(*) FILTER (WHERE role = 'admin') AS admins
            FROM kebumify.profile
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(AccountStats {
            total: row.total,
            active: row.active,
            pending: row.pending,
            admins: row.admins,
        })
    }
}

impl ApprovalStore for AccountRepository<'_> {
    async fn fetch_approval(&self, user_id: UserId) -> ApprovalLookup {
        match self.get_approval(user_id).await {
            Ok(Some(approval)) => ApprovalLookup::Found(approval),
            Ok(None) => ApprovalLookup::NotFound,
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "Approval lookup failed, not gating request");
                ApprovalLookup::LookupError
            }
        }
    }
}

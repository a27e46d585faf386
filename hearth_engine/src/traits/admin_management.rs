use thiserror::Error;

use crate::db_types::{AdminUser, NewAdminUser};

#[derive(Debug, Clone, Error)]
pub enum RosterDbError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Admin account {0} not found")]
    AdminNotFound(i64),
    #[error("An admin account already exists for {0}")]
    DuplicateEmail(String),
}

impl From<sqlx::Error> for RosterDbError {
    fn from(e: sqlx::Error) -> Self {
        RosterDbError::DatabaseError(e.to_string())
    }
}

/// Storage for the admin roster. Authorization (only superadmins may mutate the roster) is enforced by the calling
/// context; this contract is storage only.
#[allow(async_fn_in_trait)]
pub trait AdminManagement: Clone {
    type Error: std::error::Error;

    /// Fetches a block of admins ordered by creation time ascending.
    async fn fetch_admins(&self, limit: usize, offset: usize) -> Result<Vec<AdminUser>, Self::Error>;

    async fn count_admins(&self) -> Result<usize, Self::Error>;

    /// Inserts a new admin. The `is_superadmin` flag is always stored as `false`; promotion is a separate,
    /// out-of-band operation.
    async fn insert_admin(&self, admin: NewAdminUser) -> Result<AdminUser, Self::Error>;

    /// Deletes the admin with the given user id. Returns `false` if no such admin exists.
    async fn delete_admin(&self, user_id: i64) -> Result<bool, Self::Error>;
}

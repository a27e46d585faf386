use std::fmt::Debug;

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    api::errors::RosterApiError,
    db_types::{AdminUser, NewAdminUser},
    traits::AdminManagement,
};

pub const ADMIN_PAGE_SIZE: usize = 5;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// One page of the admin roster, with enough context to render the pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterPage {
    pub admins: Vec<AdminUser>,
    pub page: usize,
    pub total_pages: usize,
    pub total_admins: usize,
}

/// Administrator roster management. Every mutation answers with page 1 of the refreshed roster, so the caller's
/// view never points past the end after a deletion shrinks the list.
pub struct RosterApi<B> {
    db: B,
}

impl<B> Debug for RosterApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RosterApi")
    }
}

impl<B> RosterApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> RosterApi<B>
where B: AdminManagement
{
    /// Fetches one page of the roster, 1-based. Out-of-range pages clamp to the nearest valid page rather than
    /// returning an empty list.
    pub async fn list(&self, page: usize) -> Result<RosterPage, RosterApiError<B>> {
        let total_admins = self.db.count_admins().await.map_err(RosterApiError::DatabaseError)?;
        let total_pages = total_admins.div_ceil(ADMIN_PAGE_SIZE).max(1);
        let page = page.clamp(1, total_pages);
        let offset = (page - 1) * ADMIN_PAGE_SIZE;
        let admins =
            self.db.fetch_admins(ADMIN_PAGE_SIZE, offset).await.map_err(RosterApiError::DatabaseError)?;
        Ok(RosterPage { admins, page, total_pages, total_admins })
    }

    /// Creates an admin account and returns the roster reset to its first page.
    pub async fn add(&self, admin: NewAdminUser) -> Result<RosterPage, RosterApiError<B>> {
        if admin.email.trim().is_empty() {
            return Err(RosterApiError::MissingEmail);
        }
        let password_length = admin.password.reveal().len();
        if password_length == 0 {
            return Err(RosterApiError::MissingPassword);
        }
        if password_length < MIN_PASSWORD_LENGTH {
            return Err(RosterApiError::PasswordTooShort { minimum: MIN_PASSWORD_LENGTH, got: password_length });
        }
        let created = self.db.insert_admin(admin).await.map_err(RosterApiError::DatabaseError)?;
        info!("🔑️ Admin account #{} created for {}", created.user_id, created.email);
        self.list(1).await
    }

    /// Deletes an admin account and returns the roster reset to its first page.
    pub async fn remove(&self, user_id: i64) -> Result<RosterPage, RosterApiError<B>> {
        let deleted = self.db.delete_admin(user_id).await.map_err(RosterApiError::DatabaseError)?;
        if !deleted {
            return Err(RosterApiError::AdminNotFound(user_id));
        }
        info!("🔑️ Admin account #{user_id} deleted");
        self.list(1).await
    }
}

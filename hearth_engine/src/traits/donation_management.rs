use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    db_types::{Donor, FireDepartment, NewDonation, NewFireDepartment, ProductDonation},
    donation_objects::DonationUpdate,
};

#[derive(Debug, Clone, Error)]
pub enum DonationDbError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Donation {0} not found")]
    DonationNotFound(i64),
    #[error("Donor {0} not found")]
    DonorNotFound(i64),
    #[error("No fields to update for donation {0}")]
    UpdateNoOp(i64),
}

impl From<sqlx::Error> for DonationDbError {
    fn from(e: sqlx::Error) -> Self {
        DonationDbError::DatabaseError(e.to_string())
    }
}

/// The result of deleting a donation. The donor row is owned by the existence of at least one donation, so deleting
/// a donor's last donation removes the donor in the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub donation_id: i64,
    pub donor_id: i64,
    pub donor_deleted: bool,
}

/// Storage for donors, product donations and fire departments.
///
/// Donor totals are never stored; callers aggregate over the donation records returned here. Matching state is the
/// `fire_department_id` column alone — there is no separate `matched` flag to keep in sync.
#[allow(async_fn_in_trait)]
pub trait DonationManagement: Clone {
    type Error: std::error::Error;

    /// Inserts a donation, creating the donor row first if no donor with that name exists yet. Atomic.
    async fn insert_donation(&self, donation: NewDonation) -> Result<ProductDonation, Self::Error>;

    async fn fetch_donation(&self, donation_id: i64) -> Result<Option<ProductDonation>, Self::Error>;

    /// All donations, ordered by donation date ascending.
    async fn fetch_donations(&self) -> Result<Vec<ProductDonation>, Self::Error>;

    async fn fetch_donations_for_donor(&self, donor_id: i64) -> Result<Vec<ProductDonation>, Self::Error>;

    /// All donors, ordered by creation time ascending.
    async fn fetch_donors(&self) -> Result<Vec<Donor>, Self::Error>;

    async fn fetch_donor(&self, donor_id: i64) -> Result<Option<Donor>, Self::Error>;

    /// Applies the non-empty fields of `update` to the donation. Returns `None` if the donation does not exist.
    async fn update_donation(
        &self,
        donation_id: i64,
        update: DonationUpdate,
    ) -> Result<Option<ProductDonation>, Self::Error>;

    /// Sets or clears the fire department reference. `Some` matches, `None` unmatches; re-matching simply replaces
    /// the reference. Returns `None` if the donation does not exist.
    async fn set_fire_department(
        &self,
        donation_id: i64,
        department_id: Option<i64>,
    ) -> Result<Option<ProductDonation>, Self::Error>;

    /// Deletes the donation and, if it was the donor's last one, the donor — in a single atomic transaction, so a
    /// donor with zero donations can never be left behind. Returns `None` if the donation does not exist.
    async fn delete_donation(&self, donation_id: i64) -> Result<Option<CascadeOutcome>, Self::Error>;

    async fn fetch_fire_departments(&self) -> Result<Vec<FireDepartment>, Self::Error>;

    async fn fetch_fire_department(&self, department_id: i64) -> Result<Option<FireDepartment>, Self::Error>;

    async fn insert_fire_department(&self, department: NewFireDepartment) -> Result<FireDepartment, Self::Error>;

    /// Replaces the department's details. Returns `None` if the department does not exist.
    async fn update_fire_department(
        &self,
        department_id: i64,
        department: NewFireDepartment,
    ) -> Result<Option<FireDepartment>, Self::Error>;

    /// Deletes a department. Donation references to it are deliberately left in place; views treat the dangling id
    /// as unmatched. Returns `false` if the department did not exist.
    async fn delete_fire_department(&self, department_id: i64) -> Result<bool, Self::Error>;
}

use std::fmt::Debug;

use hearth_common::Cents;
use log::*;

use crate::{
    api::errors::DonationApiError,
    db_types::{Donor, FireDepartment, NewDonation, NewFireDepartment, ProductDonation},
    donation_objects::{DonationUpdate, DonorProfile},
    traits::{CascadeOutcome, DonationManagement},
};

/// The donation-matching workflow: donation CRUD, fire-department matching, and the donor ownership cascade.
pub struct DonationApi<B> {
    db: B,
}

impl<B> Debug for DonationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DonationApi")
    }
}

impl<B> DonationApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> DonationApi<B>
where B: DonationManagement
{
    /// Records a donation, creating the donor on first sight of their name.
    pub async fn create_donation(&self, donation: NewDonation) -> Result<ProductDonation, DonationApiError<B>> {
        if donation.donor.name.trim().is_empty() {
            return Err(DonationApiError::MissingField("donor name"));
        }
        if donation.product_name.trim().is_empty() {
            return Err(DonationApiError::MissingField("product name"));
        }
        if donation.quantity <= 0 {
            return Err(DonationApiError::InvalidQuantity(donation.quantity));
        }
        if donation.unit_value < Cents::new(0) {
            return Err(DonationApiError::NegativeValue);
        }
        let donation = self.db.insert_donation(donation).await.map_err(DonationApiError::DatabaseError)?;
        debug!("🎁️ Donation #{} recorded for donor #{}", donation.id, donation.donor_id);
        Ok(donation)
    }

    pub async fn donation(&self, donation_id: i64) -> Result<ProductDonation, DonationApiError<B>> {
        self.db
            .fetch_donation(donation_id)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DonationNotFound(donation_id))
    }

    pub async fn donations(&self) -> Result<Vec<ProductDonation>, DonationApiError<B>> {
        self.db.fetch_donations().await.map_err(DonationApiError::DatabaseError)
    }

    pub async fn donors(&self) -> Result<Vec<Donor>, DonationApiError<B>> {
        self.db.fetch_donors().await.map_err(DonationApiError::DatabaseError)
    }

    /// A donor with their donations and freshly computed totals.
    pub async fn donor_profile(&self, donor_id: i64) -> Result<DonorProfile, DonationApiError<B>> {
        let donor = self
            .db
            .fetch_donor(donor_id)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DonorNotFound(donor_id))?;
        let donations =
            self.db.fetch_donations_for_donor(donor_id).await.map_err(DonationApiError::DatabaseError)?;
        Ok(DonorProfile::new(donor, donations))
    }

    /// Matches the donation to an existing fire department. Re-matching replaces the previous reference; no history
    /// of prior matches is kept.
    pub async fn match_donation(
        &self,
        donation_id: i64,
        department_id: i64,
    ) -> Result<ProductDonation, DonationApiError<B>> {
        let department = self
            .db
            .fetch_fire_department(department_id)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DepartmentNotFound(department_id))?;
        let donation = self
            .db
            .set_fire_department(donation_id, Some(department_id))
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DonationNotFound(donation_id))?;
        debug!("🎁️ Donation #{donation_id} matched to {} (#{department_id})", department.name);
        Ok(donation)
    }

    /// Returns the donation to the pending state by clearing its department reference.
    pub async fn unmatch_donation(&self, donation_id: i64) -> Result<ProductDonation, DonationApiError<B>> {
        let donation = self
            .db
            .set_fire_department(donation_id, None)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DonationNotFound(donation_id))?;
        debug!("🎁️ Donation #{donation_id} unmatched");
        Ok(donation)
    }

    pub async fn update_donation(
        &self,
        donation_id: i64,
        update: DonationUpdate,
    ) -> Result<ProductDonation, DonationApiError<B>> {
        if update.is_empty() {
            return Err(DonationApiError::NoFieldsToUpdate(donation_id));
        }
        if let Some(quantity) = update.new_quantity {
            if quantity <= 0 {
                return Err(DonationApiError::InvalidQuantity(quantity));
            }
        }
        if let Some(value) = update.new_unit_value {
            if value < Cents::new(0) {
                return Err(DonationApiError::NegativeValue);
            }
        }
        self.db
            .update_donation(donation_id, update)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DonationNotFound(donation_id))
    }

    /// Deletes a donation. When it was the donor's last one, the donor goes with it — atomically, so no empty donor
    /// row can be left behind by a partial failure.
    pub async fn delete_donation(&self, donation_id: i64) -> Result<CascadeOutcome, DonationApiError<B>> {
        let outcome = self
            .db
            .delete_donation(donation_id)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DonationNotFound(donation_id))?;
        if outcome.donor_deleted {
            debug!("🎁️ Donation #{donation_id} deleted; donor #{} had no remaining donations and was removed",
                outcome.donor_id);
        } else {
            debug!("🎁️ Donation #{donation_id} deleted; donor #{} retained", outcome.donor_id);
        }
        Ok(outcome)
    }

    pub async fn fire_departments(&self) -> Result<Vec<FireDepartment>, DonationApiError<B>> {
        self.db.fetch_fire_departments().await.map_err(DonationApiError::DatabaseError)
    }

    pub async fn fire_department(&self, department_id: i64) -> Result<FireDepartment, DonationApiError<B>> {
        self.db
            .fetch_fire_department(department_id)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DepartmentNotFound(department_id))
    }

    pub async fn add_fire_department(
        &self,
        department: NewFireDepartment,
    ) -> Result<FireDepartment, DonationApiError<B>> {
        if department.name.trim().is_empty() {
            return Err(DonationApiError::MissingField("department name"));
        }
        self.db.insert_fire_department(department).await.map_err(DonationApiError::DatabaseError)
    }

    pub async fn update_fire_department(
        &self,
        department_id: i64,
        department: NewFireDepartment,
    ) -> Result<FireDepartment, DonationApiError<B>> {
        if department.name.trim().is_empty() {
            return Err(DonationApiError::MissingField("department name"));
        }
        self.db
            .update_fire_department(department_id, department)
            .await
            .map_err(DonationApiError::DatabaseError)?
            .ok_or(DonationApiError::DepartmentNotFound(department_id))
    }

    /// Removes a department. Donations that referenced it keep the dangling id and display as unmatched.
    pub async fn delete_fire_department(&self, department_id: i64) -> Result<(), DonationApiError<B>> {
        let deleted =
            self.db.delete_fire_department(department_id).await.map_err(DonationApiError::DatabaseError)?;
        if !deleted {
            return Err(DonationApiError::DepartmentNotFound(department_id));
        }
        Ok(())
    }
}

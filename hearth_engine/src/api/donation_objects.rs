use chrono::{DateTime, Utc};
use hearth_common::Cents;
use serde::{Deserialize, Serialize};

use crate::db_types::{Donor, ProductDonation};

/// A patch for the mutable fields of a donation. Only the set fields are written; matching state is deliberately
/// excluded and goes through the match/unmatch operations instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonationUpdate {
    pub new_product_name: Option<String>,
    pub new_unit_value: Option<Cents>,
    pub new_quantity: Option<i64>,
    pub new_donation_date: Option<DateTime<Utc>>,
}

impl DonationUpdate {
    pub fn with_product_name<S: Into<String>>(mut self, name: S) -> Self {
        self.new_product_name = Some(name.into());
        self
    }

    pub fn with_unit_value(mut self, value: Cents) -> Self {
        self.new_unit_value = Some(value);
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.new_quantity = Some(quantity);
        self
    }

    pub fn with_donation_date(mut self, date: DateTime<Utc>) -> Self {
        self.new_donation_date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.new_product_name.is_none() &&
            self.new_unit_value.is_none() &&
            self.new_quantity.is_none() &&
            self.new_donation_date.is_none()
    }
}

/// A donor together with their donations and totals. The totals are computed here, on read, from the donation
/// records — they are never trusted from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorProfile {
    pub donor: Donor,
    pub donations: Vec<ProductDonation>,
    pub total_donated_value: Cents,
    pub total_products_donated: i64,
}

impl DonorProfile {
    pub fn new(donor: Donor, donations: Vec<ProductDonation>) -> Self {
        let total_donated_value = donations.iter().map(ProductDonation::total_value).sum();
        let total_products_donated = donations.iter().map(|d| d.quantity).sum();
        Self { donor, donations, total_donated_value, total_products_donated }
    }
}

//! `SqliteDatabase` is a concrete implementation of a Hearthline engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{admins, db_url, donations, donors, fire_departments, new_pool, orders};
use crate::{
    db_types::{
        AdminUser,
        Donor,
        FireDepartment,
        FulfillmentStatus,
        NewAdminUser,
        NewDonation,
        NewFireDepartment,
        NewOrder,
        Order,
        OrderId,
        OrderItem,
        PaymentStatus,
        ProductDonation,
    },
    donation_objects::DonationUpdate,
    order_objects::OrderQueryFilter,
    traits::{
        AdminManagement,
        CascadeOutcome,
        DonationDbError,
        DonationManagement,
        RosterDbError,
        StorefrontDatabase,
        StorefrontDbError,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool against the URL in `HEARTH_DATABASE_URL` (or the default on-disk store).
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl StorefrontDatabase for SqliteDatabase {
    type Error = StorefrontDbError;

    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_order_id(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let items = orders::fetch_order_items(order_id, &mut conn).await?;
        Ok(items)
    }

    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::search_orders(query, &mut conn).await?;
        Ok(orders)
    }

    async fn update_fulfillment_status(
        &self,
        order_id: &OrderId,
        from: FulfillmentStatus,
        to: FulfillmentStatus,
    ) -> Result<Order, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::update_fulfillment_status(order_id, from, to, &mut conn).await
    }

    async fn update_payment_status(
        &self,
        order_id: &OrderId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<Order, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::update_payment_status(order_id, from, to, &mut conn).await
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        self.pool.close().await;
        Ok(())
    }
}

impl DonationManagement for SqliteDatabase {
    type Error = DonationDbError;

    async fn insert_donation(&self, donation: NewDonation) -> Result<ProductDonation, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let donor_id = donors::fetch_or_create_donor(donation.donor, &mut tx).await?;
        let donation = donations::insert_donation(
            donor_id,
            &donation.product_name,
            donation.unit_value,
            donation.quantity,
            donation.fire_department_id,
            donation.donation_date,
            &mut tx,
        )
        .await?;
        tx.commit().await?;
        Ok(donation)
    }

    async fn fetch_donation(&self, donation_id: i64) -> Result<Option<ProductDonation>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let donation = donations::fetch_donation(donation_id, &mut conn).await?;
        Ok(donation)
    }

    async fn fetch_donations(&self) -> Result<Vec<ProductDonation>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let donations = donations::fetch_donations(&mut conn).await?;
        Ok(donations)
    }

    async fn fetch_donations_for_donor(&self, donor_id: i64) -> Result<Vec<ProductDonation>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let donations = donations::fetch_donations_for_donor(donor_id, &mut conn).await?;
        Ok(donations)
    }

    async fn fetch_donors(&self) -> Result<Vec<Donor>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let donors = donors::fetch_donors(&mut conn).await?;
        Ok(donors)
    }

    async fn fetch_donor(&self, donor_id: i64) -> Result<Option<Donor>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let donor = donors::fetch_donor(donor_id, &mut conn).await?;
        Ok(donor)
    }

    async fn update_donation(
        &self,
        donation_id: i64,
        update: DonationUpdate,
    ) -> Result<Option<ProductDonation>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        donations::update_donation(donation_id, update, &mut conn).await
    }

    async fn set_fire_department(
        &self,
        donation_id: i64,
        department_id: Option<i64>,
    ) -> Result<Option<ProductDonation>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let donation = donations::set_fire_department(donation_id, department_id, &mut conn).await?;
        Ok(donation)
    }

    async fn delete_donation(&self, donation_id: i64) -> Result<Option<CascadeOutcome>, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let Some(donation) = donations::fetch_donation(donation_id, &mut tx).await? else {
            return Ok(None);
        };
        donations::delete_donation(donation_id, &mut tx).await?;
        let remaining = donors::count_donations_for_donor(donation.donor_id, &mut tx).await?;
        let donor_deleted = if remaining == 0 {
            debug!("🎗️ Donor #{} has no remaining donations. Removing the donor row as well", donation.donor_id);
            donors::delete_donor(donation.donor_id, &mut tx).await?
        } else {
            false
        };
        tx.commit().await?;
        Ok(Some(CascadeOutcome { donation_id, donor_id: donation.donor_id, donor_deleted }))
    }

    async fn fetch_fire_departments(&self) -> Result<Vec<FireDepartment>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let departments = fire_departments::fetch_fire_departments(&mut conn).await?;
        Ok(departments)
    }

    async fn fetch_fire_department(&self, department_id: i64) -> Result<Option<FireDepartment>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let department = fire_departments::fetch_fire_department(department_id, &mut conn).await?;
        Ok(department)
    }

    async fn insert_fire_department(&self, department: NewFireDepartment) -> Result<FireDepartment, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let department = fire_departments::insert_fire_department(department, &mut conn).await?;
        Ok(department)
    }

    async fn update_fire_department(
        &self,
        department_id: i64,
        department: NewFireDepartment,
    ) -> Result<Option<FireDepartment>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let department = fire_departments::update_fire_department(department_id, department, &mut conn).await?;
        Ok(department)
    }

    async fn delete_fire_department(&self, department_id: i64) -> Result<bool, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let deleted = fire_departments::delete_fire_department(department_id, &mut conn).await?;
        Ok(deleted)
    }
}

impl AdminManagement for SqliteDatabase {
    type Error = RosterDbError;

    async fn fetch_admins(&self, limit: usize, offset: usize) -> Result<Vec<AdminUser>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let admins = admins::fetch_admins(limit, offset, &mut conn).await?;
        Ok(admins)
    }

    async fn count_admins(&self) -> Result<usize, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let count = admins::count_admins(&mut conn).await?;
        Ok(count)
    }

    async fn insert_admin(&self, admin: NewAdminUser) -> Result<AdminUser, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        admins::insert_admin(admin, &mut conn).await
    }

    async fn delete_admin(&self, user_id: i64) -> Result<bool, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let deleted = admins::delete_admin(user_id, &mut conn).await?;
        Ok(deleted)
    }
}

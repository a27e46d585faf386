use chrono::{DateTime, Utc};
use hearth_common::Cents;
use log::*;
use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, SqliteConnection};

use crate::{db_types::ProductDonation, donation_objects::DonationUpdate, traits::DonationDbError};

/// Inserts the donation row for an existing donor. Not atomic on its own; the caller runs this inside the same
/// transaction as the fetch-or-create of the donor.
pub async fn insert_donation(
    donor_id: i64,
    product_name: &str,
    unit_value: Cents,
    quantity: i64,
    fire_department_id: Option<i64>,
    donation_date: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<ProductDonation, sqlx::Error> {
    let donation = sqlx::query_as(
        r#"
            INSERT INTO product_donations (
                donor_id,
                product_name,
                unit_value,
                quantity,
                fire_department_id,
                donation_date
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(donor_id)
    .bind(product_name)
    .bind(unit_value)
    .bind(quantity)
    .bind(fire_department_id)
    .bind(donation_date)
    .fetch_one(conn)
    .await?;
    Ok(donation)
}

pub async fn fetch_donation(
    donation_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<ProductDonation>, sqlx::Error> {
    let donation = sqlx::query_as("SELECT * FROM product_donations WHERE id = $1")
        .bind(donation_id)
        .fetch_optional(conn)
        .await?;
    Ok(donation)
}

pub async fn fetch_donations(conn: &mut SqliteConnection) -> Result<Vec<ProductDonation>, sqlx::Error> {
    let donations = sqlx::query_as("SELECT * FROM product_donations ORDER BY donation_date ASC, id ASC")
        .fetch_all(conn)
        .await?;
    Ok(donations)
}

pub async fn fetch_donations_for_donor(
    donor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<ProductDonation>, sqlx::Error> {
    let donations =
        sqlx::query_as("SELECT * FROM product_donations WHERE donor_id = $1 ORDER BY donation_date ASC, id ASC")
            .bind(donor_id)
            .fetch_all(conn)
            .await?;
    Ok(donations)
}

/// Applies the set fields of the patch. The matching columns are deliberately not reachable from here; they change
/// only through [`set_fire_department`].
pub async fn update_donation(
    donation_id: i64,
    update: DonationUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<ProductDonation>, DonationDbError> {
    if update.is_empty() {
        debug!("🎗️ No fields to update for donation {donation_id}. Update request skipped.");
        return Err(DonationDbError::UpdateNoOp(donation_id));
    }
    let mut builder = QueryBuilder::new("UPDATE product_donations SET updated_at = CURRENT_TIMESTAMP, ");
    let mut set_clause = builder.separated(", ");
    if let Some(product_name) = update.new_product_name {
        set_clause.push("product_name = ");
        set_clause.push_bind_unseparated(product_name);
    }
    if let Some(unit_value) = update.new_unit_value {
        set_clause.push("unit_value = ");
        set_clause.push_bind_unseparated(unit_value);
    }
    if let Some(quantity) = update.new_quantity {
        set_clause.push("quantity = ");
        set_clause.push_bind_unseparated(quantity);
    }
    if let Some(donation_date) = update.new_donation_date {
        set_clause.push("donation_date = ");
        set_clause.push_bind_unseparated(donation_date);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(donation_id);
    builder.push(" RETURNING *");
    trace!("🎗️ Executing query: {}", builder.sql());
    let res = builder
        .build()
        .fetch_optional(conn)
        .await?
        .map(|row: SqliteRow| ProductDonation::from_row(&row))
        .transpose()?;
    Ok(res)
}

/// Sets or clears the fire department reference. `Some` matches, `None` unmatches.
pub async fn set_fire_department(
    donation_id: i64,
    department_id: Option<i64>,
    conn: &mut SqliteConnection,
) -> Result<Option<ProductDonation>, sqlx::Error> {
    let donation = sqlx::query_as(
        "UPDATE product_donations SET fire_department_id = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 \
         RETURNING *",
    )
    .bind(department_id)
    .bind(donation_id)
    .fetch_optional(conn)
    .await?;
    Ok(donation)
}

pub async fn delete_donation(donation_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM product_donations WHERE id = $1").bind(donation_id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

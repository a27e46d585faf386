use log::*;
use sqlx::SqliteConnection;

use crate::db_types::{Donor, NewDonor};

/// Returns the id of the donor with the given name, creating the row if no such donor exists yet. Donor names are
/// unique; repeat donations from the same name always land on the same donor row.
pub async fn fetch_or_create_donor(donor: NewDonor, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    if let Some(existing) = fetch_donor_by_name(&donor.name, &mut *conn).await? {
        return Ok(existing.id);
    }
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO donors (name, city, state, address) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&donor.name)
    .bind(donor.city)
    .bind(donor.state)
    .bind(donor.address)
    .fetch_one(conn)
    .await?;
    debug!("🎗️ Donor [{}] created with id {id}", donor.name);
    Ok(id)
}

pub async fn fetch_donor(donor_id: i64, conn: &mut SqliteConnection) -> Result<Option<Donor>, sqlx::Error> {
    let donor = sqlx::query_as("SELECT * FROM donors WHERE id = $1").bind(donor_id).fetch_optional(conn).await?;
    Ok(donor)
}

pub async fn fetch_donor_by_name(name: &str, conn: &mut SqliteConnection) -> Result<Option<Donor>, sqlx::Error> {
    let donor = sqlx::query_as("SELECT * FROM donors WHERE name = $1").bind(name).fetch_optional(conn).await?;
    Ok(donor)
}

pub async fn fetch_donors(conn: &mut SqliteConnection) -> Result<Vec<Donor>, sqlx::Error> {
    let donors = sqlx::query_as("SELECT * FROM donors ORDER BY created_at ASC, id ASC").fetch_all(conn).await?;
    Ok(donors)
}

/// The number of donations currently recorded against the donor.
pub async fn count_donations_for_donor(donor_id: i64, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product_donations WHERE donor_id = $1")
        .bind(donor_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

pub async fn delete_donor(donor_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM donors WHERE id = $1").bind(donor_id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

use log::*;
use sqlx::SqliteConnection;

use crate::db_types::{FireDepartment, NewFireDepartment};

pub async fn insert_fire_department(
    department: NewFireDepartment,
    conn: &mut SqliteConnection,
) -> Result<FireDepartment, sqlx::Error> {
    let department: FireDepartment = sqlx::query_as(
        r#"
            INSERT INTO fire_departments (name, city, county, address, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(department.name)
    .bind(department.city)
    .bind(department.county)
    .bind(department.address)
    .bind(department.latitude)
    .bind(department.longitude)
    .fetch_one(conn)
    .await?;
    debug!("🚒️ Fire department [{}] created with id {}", department.name, department.id);
    Ok(department)
}

pub async fn fetch_fire_department(
    department_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<FireDepartment>, sqlx::Error> {
    let department = sqlx::query_as("SELECT * FROM fire_departments WHERE id = $1")
        .bind(department_id)
        .fetch_optional(conn)
        .await?;
    Ok(department)
}

pub async fn fetch_fire_departments(conn: &mut SqliteConnection) -> Result<Vec<FireDepartment>, sqlx::Error> {
    let departments = sqlx::query_as("SELECT * FROM fire_departments ORDER BY name ASC").fetch_all(conn).await?;
    Ok(departments)
}

pub async fn update_fire_department(
    department_id: i64,
    department: NewFireDepartment,
    conn: &mut SqliteConnection,
) -> Result<Option<FireDepartment>, sqlx::Error> {
    let department = sqlx::query_as(
        "UPDATE fire_departments SET name = $1, city = $2, county = $3, address = $4, latitude = $5, \
         longitude = $6 WHERE id = $7 RETURNING *",
    )
    .bind(department.name)
    .bind(department.city)
    .bind(department.county)
    .bind(department.address)
    .bind(department.latitude)
    .bind(department.longitude)
    .bind(department_id)
    .fetch_optional(conn)
    .await?;
    Ok(department)
}

/// Deletes the department row only. Donations referencing it are left untouched; the dangling reference reads as
/// unmatched everywhere matched-ness is derived.
pub async fn delete_fire_department(department_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM fire_departments WHERE id = $1").bind(department_id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

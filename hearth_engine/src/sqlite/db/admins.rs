use log::*;
use sqlx::SqliteConnection;

use crate::{
    db_types::{AdminUser, NewAdminUser},
    traits::RosterDbError,
};

/// One page of admin accounts, oldest first.
pub async fn fetch_admins(
    limit: usize,
    offset: usize,
    conn: &mut SqliteConnection,
) -> Result<Vec<AdminUser>, sqlx::Error> {
    let admins = sqlx::query_as(
        "SELECT user_id, email, is_superadmin, created_at FROM admin_users ORDER BY created_at ASC, user_id ASC \
         LIMIT $1 OFFSET $2",
    )
    .bind(limit as i64)
    .bind(offset as i64)
    .fetch_all(conn)
    .await?;
    Ok(admins)
}

pub async fn count_admins(conn: &mut SqliteConnection) -> Result<usize, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users").fetch_one(conn).await?;
    Ok(count as usize)
}

/// Creates an admin account. The unique email constraint surfaces as [`RosterDbError::DuplicateEmail`].
pub async fn insert_admin(admin: NewAdminUser, conn: &mut SqliteConnection) -> Result<AdminUser, RosterDbError> {
    let result: Result<AdminUser, sqlx::Error> = sqlx::query_as(
        r#"
            INSERT INTO admin_users (email, password)
            VALUES ($1, $2)
            RETURNING user_id, email, is_superadmin, created_at;
        "#,
    )
    .bind(&admin.email)
    .bind(admin.password.reveal())
    .fetch_one(conn)
    .await;
    match result {
        Ok(created) => {
            debug!("🔑️ Admin account [{}] created with id {}", created.email, created.user_id);
            Ok(created)
        },
        Err(sqlx::Error::Database(de)) if de.is_unique_violation() => {
            Err(RosterDbError::DuplicateEmail(admin.email))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_admin(user_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM admin_users WHERE user_id = $1").bind(user_id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

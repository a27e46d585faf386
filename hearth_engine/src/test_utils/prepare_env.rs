use std::path::Path;

use log::*;
use sqlx::{migrate, migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// Drops any database left behind at `url`, creates a fresh one and brings its schema up to date. Logging and the
/// `.env.test` overrides are initialised as a side effect, so a test can call this first and nothing else.
pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    recreate_database(url).await;
    run_migrations(url).await;
}

/// A unique on-disk database path, so concurrently running tests never share state.
pub fn random_db_path() -> String {
    format!("sqlite://../data/hearth_test_{:08x}.db", rand::random::<u32>())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Could not connect to the test database");
    migrate!("./src/sqlite/migrations").run(db.pool()).await.expect("Schema migration failed");
    debug!("🧪️ Schema is up to date for {url}");
}

pub async fn recreate_database<P: AsRef<Path>>(path: P) {
    let p = path.as_ref().as_os_str().to_str().unwrap();
    if let Err(e) = Sqlite::drop_database(p).await {
        debug!("🧪️ Nothing to drop at {p} ({e})");
    }
    Sqlite::create_database(p).await.expect("Could not create the test database");
    debug!("🧪️ Fresh test database at {p}");
}

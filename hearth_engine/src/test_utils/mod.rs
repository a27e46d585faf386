//! Helpers for tests that need a real SQLite database.
pub mod prepare_env;

pub use prepare_env::{prepare_test_env, random_db_path, recreate_database, run_migrations};

//! Backend contracts for the Hearthline engine.
//!
//! These traits define the behaviour a persistence backend must expose. The engine never performs I/O outside of
//! them, so the `*Api` facades can be driven by any conforming backend (the bundled SQLite implementation, a remote
//! REST data store, or a test double).
//!
//! * [`StorefrontDatabase`] — order creation and the dual status state machine, with guarded single-field updates.
//! * [`DonationManagement`] — donors, product donations, matching, the last-donation cascade, and fire departments.
//! * [`AdminManagement`] — the superadmin-managed roster of admin accounts.
mod admin_management;
mod donation_management;
mod storefront_database;

pub use admin_management::{AdminManagement, RosterDbError};
pub use donation_management::{CascadeOutcome, DonationDbError, DonationManagement};
pub use storefront_database::{StorefrontDatabase, StorefrontDbError};

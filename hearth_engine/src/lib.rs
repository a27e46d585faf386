//! Hearthline Engine
//!
//! Core logic for the Hearthline storefront and donation-tracking platform. Customers buy wellness products (saunas,
//! cold plunges) through the storefront, while the admin side records corporate product donations and matches them to
//! fire departments. This crate owns the parts with real invariants:
//!
//! 1. The order/checkout financial pipeline: coupon evaluation, pricing ([`mod@pricing`]) and the dual order status
//!    state machine ([`mod@db_types`], [`OrderFlowApi`]).
//! 2. The donation-matching workflow and the leaderboard aggregation engine ([`mod@leaderboard`], [`DonationApi`],
//!    [`LeaderboardApi`]).
//!
//! Persistence is abstracted behind the backend traits ([`StorefrontDatabase`], [`DonationManagement`],
//! [`AdminManagement`]); a SQLite implementation is provided behind
//! the `sqlite` feature (on by default). Presentation concerns (rendering, routing, sessions) live in collaborator
//! services that consume the `*Api` facades re-exported from this crate. No I/O happens outside the backend traits.
mod api;
pub mod db_types;
pub mod leaderboard;
pub mod pricing;
mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use api::{
    donation_objects,
    donations_api::DonationApi,
    errors::{DonationApiError, LeaderboardApiError, OrderFlowError, RosterApiError},
    leaderboard_api::LeaderboardApi,
    order_flow_api::{OrderFlowApi, StatusChange},
    order_objects,
    roster_api::{RosterApi, RosterPage, ADMIN_PAGE_SIZE},
};
pub use traits::{
    AdminManagement,
    CascadeOutcome,
    DonationDbError,
    DonationManagement,
    RosterDbError,
    StorefrontDatabase,
    StorefrontDbError,
};

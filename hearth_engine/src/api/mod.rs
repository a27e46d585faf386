//! The engine's public facades.
//!
//! Each API is a thin struct generic over the backend trait it needs, so presentation collaborators depend on
//! behaviour rather than on a concrete database.
pub mod donation_objects;
pub mod donations_api;
pub mod errors;
pub mod leaderboard_api;
pub mod order_flow_api;
pub mod order_objects;
pub mod roster_api;

use thiserror::Error;

use crate::{
    db_types::OrderId,
    pricing::PricingError,
    traits::{AdminManagement, DonationManagement, StorefrontDatabase},
};

#[derive(Debug, Error)]
pub enum OrderFlowError<B: StorefrontDatabase> {
    #[error("Database error: {0}")]
    DatabaseError(B::Error),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("Missing required checkout field: {0}")]
    MissingField(&'static str),
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition { order_id: OrderId, from: String, to: String },
    #[error("Order {0} cannot be marked delivered before its payment has completed")]
    PaymentIncomplete(OrderId),
}

#[derive(Debug, Error)]
pub enum DonationApiError<B: DonationManagement> {
    #[error("Database error: {0}")]
    DatabaseError(B::Error),
    #[error("Donation {0} not found")]
    DonationNotFound(i64),
    #[error("Donor {0} not found")]
    DonorNotFound(i64),
    #[error("Fire department {0} not found")]
    DepartmentNotFound(i64),
    #[error("Donation quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    #[error("Donation unit value must not be negative")]
    NegativeValue,
    #[error("Missing required donation field: {0}")]
    MissingField(&'static str),
    #[error("No fields to update for donation {0}")]
    NoFieldsToUpdate(i64),
}

#[derive(Debug, Error)]
pub enum LeaderboardApiError<B: DonationManagement> {
    #[error("Database error: {0}")]
    DatabaseError(B::Error),
}

#[derive(Debug, Error)]
pub enum RosterApiError<B: AdminManagement> {
    #[error("Database error: {0}")]
    DatabaseError(B::Error),
    #[error("Email must not be empty")]
    MissingEmail,
    #[error("Password must not be empty")]
    MissingPassword,
    #[error("Password must be at least {minimum} characters, got {got}")]
    PasswordTooShort { minimum: usize, got: usize },
    #[error("Admin account {0} not found")]
    AdminNotFound(i64),
}

pub mod admin;
pub mod auth;
pub mod contacts;
pub mod feedback;
pub mod plans;
pub mod subscriptions;

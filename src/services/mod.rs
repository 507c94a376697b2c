//! Business logic services.

pub mod account;
pub mod aggregate;
pub mod budget;
pub mod category;
pub mod dashboard;
pub mod link;
pub mod transaction;

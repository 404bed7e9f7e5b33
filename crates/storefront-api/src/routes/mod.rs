//! Route modules for the storefront API.

pub mod categories;
pub mod health;
pub mod orders;
pub mod products;

//! Storefront Core — shared domain model and abstractions.
//!
//! This crate defines the types and traits that the catalog and checkout
//! contexts depend on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod gateway;
pub mod model;
pub mod query;
pub mod repository;
pub mod slug;
pub mod validation;

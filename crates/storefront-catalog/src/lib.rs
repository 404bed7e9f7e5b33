//! Storefront — catalog bounded context.
//!
//! The query engine (paginated listing, filtering, search, related
//! products, photo serving) and the product/category command handlers.

pub mod application;

//! Storefront — checkout bounded context.
//!
//! Payment token issuance, sale submission with order persistence, and
//! order status/listing operations.

pub mod application;

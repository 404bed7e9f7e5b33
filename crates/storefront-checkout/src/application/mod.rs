//! Application layer for the checkout context.

pub mod command_handlers;
pub mod query_handlers;

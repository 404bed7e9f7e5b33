//! Shared test fakes and utilities for the storefront.

mod catalog;
mod clock;
mod gateway;
mod orders;

pub use catalog::{FailingCatalog, InMemoryCatalog};
pub use clock::FixedClock;
pub use gateway::{ApprovingGateway, DecliningGateway, FailingGateway};
pub use orders::{FailingOrders, RecordingOrders};

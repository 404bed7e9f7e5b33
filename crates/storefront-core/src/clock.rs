//! Time source for `created_at` stamping.

use chrono::{DateTime, Utc};

/// Source of the timestamps written onto products and orders. Injected as
/// a dependency so handlers can be pinned to a fixed instant in tests.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used by the running server.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

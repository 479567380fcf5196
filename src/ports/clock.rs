//! Clock port.
//!
//! Everything that needs the current time asks an injected `Clock`, so the
//! token service and handlers run deterministically under test.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

//! Account domain module.

mod aggregate;

pub use aggregate::{Account, AccountStatus, Email, MAX_FIELD_LENGTH};

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT codec, Argon2 password hashing, mock session validator
//! - `clock` - System and fixed clocks
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - PostgreSQL repositories (sqlx)

pub mod auth;
pub mod clock;
pub mod memory;
pub mod postgres;

pub use auth::{Argon2Hasher, HmacJwtCodec, MockSessionValidator};
pub use clock::{FixedClock, SystemClock};

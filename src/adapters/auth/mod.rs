//! Authentication adapters.
//!
//! - `jwt` - HS256 `TokenCodec`
//! - `argon2_hasher` - Argon2id `PasswordHasher`
//! - `mock` - `SessionValidator` for tests that don't sign real tokens

mod argon2_hasher;
mod jwt;
mod mock;

pub use argon2_hasher::Argon2Hasher;
pub use jwt::HmacJwtCodec;
pub use mock::MockSessionValidator;

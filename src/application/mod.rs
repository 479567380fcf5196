//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The token service issues and verifies access tokens; handlers load
//! aggregates, apply the authorization policy, mutate, and persist.
//! `Services` wires one of each handler over a set of stores.

pub mod authorization;
pub mod handlers;
pub mod services;
pub mod token_service;

pub use authorization::enforce;
pub use handlers::*;
pub use services::{Services, Stores};
pub use token_service::{IssuedToken, TokenService, TokenWindow};

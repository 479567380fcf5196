//! Recipe Share - Recipes, ratings, and comments behind token authentication
//!
//! This crate implements the identity, authorization, and rating-consistency
//! core of a recipe sharing service: HS256 access tokens, an owner-or-admin
//! mutation policy, and at most one active rating per user and recipe.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! RocketShoes Core - Shared types library.
//!
//! This crate provides common types used across all RocketShoes components:
//! - `cart` - Cart state container and catalog client
//! - `cli` - Command-line storefront front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! filesystem access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Kasanje Core - Shared domain types.
//!
//! This crate provides the domain model used across the Kasanje marketplace
//! components:
//! - `storefront` - Public JSON API for browsing, cart, and seller listings
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Domain entities (`Product`, `Category`, `Testimonial`) and
//!   newtype wrappers for identifiers, prices, and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

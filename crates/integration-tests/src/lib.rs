//! Integration tests for the Kasanje marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kasanje-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart behavior over operation sequences
//! - `catalog_decode` - Document decoding, defaults, and query shapes
//! - `seed_fixtures` - Seed commit structure and fixture content
//! - `listing_form` - Listing validation and document assembly
//!
//! Everything here runs without network access: the tests exercise the
//! library crates directly against fixed in-memory documents.

/// A timestamp used across fixtures so ordering assertions are stable.
pub const FIXTURE_TIMESTAMP: &str = "2024-06-01T12:00:00Z";

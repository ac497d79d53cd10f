//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Email/password authentication against the identity provider

pub mod auth;

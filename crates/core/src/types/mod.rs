//! Core types for the Kasanje marketplace.
//!
//! This module provides the domain entities stored in the document database
//! plus type-safe wrappers for common concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod product;
pub mod rating;
pub mod testimonial;

pub use category::Category;
pub use id::DocumentId;
pub use price::Price;
pub use product::{Product, Thumbnail};
pub use rating::{Rating, RatingError};
pub use testimonial::Testimonial;

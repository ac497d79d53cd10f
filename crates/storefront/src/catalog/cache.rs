//! Cache value types for catalog reads.

use kasanje_core::{Category, Product, Testimonial};

/// Cached catalog responses, keyed by a formatted request string.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
    Testimonials(Vec<Testimonial>),
}

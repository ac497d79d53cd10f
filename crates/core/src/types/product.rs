//! Product listing entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentId, Price, Rating};

/// A secondary display image with its accessibility hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Image URL.
    pub url: String,
    /// Accessibility hint describing the image.
    pub hint: String,
}

impl Thumbnail {
    /// Create a thumbnail.
    #[must_use]
    pub fn new(url: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            hint: hint.into(),
        }
    }
}

/// A product listed on the marketplace.
///
/// Products are created by sellers (or seed routines) in the external
/// document store and are read-only from this system's perspective.
///
/// Invariant: `thumbnails`, once defaulted by the catalog reader, always has
/// at least 4 entries with the primary image first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned document identifier.
    pub id: DocumentId,
    /// Display name.
    pub name: String,
    /// Price in whole currency units.
    pub price: Price,
    /// Main image URL.
    pub image: String,
    /// Accessibility hint for the main image.
    pub image_hint: String,
    /// Seller-provided description.
    pub description: String,
    /// Aggregate star rating.
    pub rating: Rating,
    /// Number of reviews behind the rating.
    pub reviews: u32,
    /// Ordered list of detail strings shown on the product page.
    pub details: Vec<String>,
    /// Category name (join key into `Category.name`).
    pub category: String,
    /// Ordered thumbnail images.
    pub thumbnails: Vec<Thumbnail>,
    /// Identifier of the listing seller, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<DocumentId>,
    /// Display name of the listing seller, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    /// Creation timestamp (normalized; never absent after decode).
    pub created_at: DateTime<Utc>,
    /// Whether the product appears in the featured section.
    pub featured: bool,
}

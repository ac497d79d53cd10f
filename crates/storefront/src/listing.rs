//! Seller listing form: validation and document assembly.
//!
//! Validation runs before any network call and surfaces inline field
//! messages. Accepted listings are assembled into a store document with the
//! derived fields (image hints, padded thumbnails, zeroed rating) filled in.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::firestore::{Fields, value};

/// Placeholder used to pad a listing's thumbnail strip to four entries.
const THUMBNAIL_PLACEHOLDER: &str = "https://placehold.co/600x400.png";

/// Number of thumbnails every listing document carries.
const THUMBNAIL_COUNT: usize = 4;

/// The main image leads the strip, leaving room for three seller thumbnails.
const MAX_THUMBNAIL_URLS: usize = THUMBNAIL_COUNT - 1;

/// Share links from Google Drive render an interstitial page; rewrite them
/// to the direct-download form so they work as `<img>` sources.
static DRIVE_SHARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://drive\.google\.com/file/d/([a-zA-Z0-9_-]+)/view\?usp=sharing")
        .expect("Invalid regex")
});

/// A seller-submitted listing, as received from the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    /// Product display name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Price in whole currency units.
    pub price: i64,
    /// Category name, chosen from the category collection.
    pub category: String,
    /// Main image URL.
    pub image_url: String,
    /// Up to three optional thumbnail URLs; empty strings are skipped.
    #[serde(default)]
    pub thumbnail_urls: Vec<String>,
}

/// One failed validation rule, keyed by form field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name (camelCase, matching the request shape).
    pub field: &'static str,
    /// User-facing message.
    pub message: &'static str,
}

/// All validation failures for a submission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

fn is_valid_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Rewrite a Google Drive share link to its direct-link form; any other URL
/// passes through unchanged.
#[must_use]
pub fn rewrite_drive_url(raw: &str) -> String {
    DRIVE_SHARE_RE.captures(raw).map_or_else(
        || raw.to_string(),
        |captures| format!("https://drive.google.com/uc?export=view&id={}", &captures[1]),
    )
}

impl NewListing {
    /// Validate the submission, collecting every failed rule.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each invalid field with its
    /// user-facing message.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.name.trim().len() < 3 {
            errors.push(FieldError {
                field: "name",
                message: "Product name must be at least 3 characters",
            });
        }
        if self.description.trim().len() < 10 {
            errors.push(FieldError {
                field: "description",
                message: "Description must be at least 10 characters",
            });
        }
        if self.price < 0 {
            errors.push(FieldError {
                field: "price",
                message: "Price must be a positive number",
            });
        }
        if self.category.is_empty() {
            errors.push(FieldError {
                field: "category",
                message: "Please select a category",
            });
        }
        if !is_valid_url(&self.image_url) {
            errors.push(FieldError {
                field: "imageUrl",
                message: "Please enter a valid URL for the main image.",
            });
        }
        let thumbnails: Vec<&String> = self
            .thumbnail_urls
            .iter()
            .filter(|url| !url.is_empty())
            .collect();
        if thumbnails.len() > MAX_THUMBNAIL_URLS {
            errors.push(FieldError {
                field: "thumbnailUrls",
                message: "Please provide no more than 3 thumbnail URLs.",
            });
        } else {
            for url in thumbnails {
                if !is_valid_url(url) {
                    errors.push(FieldError {
                        field: "thumbnailUrls",
                        message: "Please enter a valid URL or leave blank.",
                    });
                    break;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Assemble the product document for an accepted submission.
    ///
    /// The main image leads the thumbnail strip, which is padded with
    /// placeholders to exactly four entries. Ratings and review counts
    /// start at zero; listings are never born featured.
    #[must_use]
    pub fn document_fields(&self, seller_id: &str, seller_name: Option<&str>) -> Fields {
        let category_lower = self.category.to_lowercase();
        let image_hint = format!("{category_lower} product");
        let image = rewrite_drive_url(&self.image_url);

        let mut thumbnails = vec![thumbnail(&image, &image_hint)];
        thumbnails.extend(
            self.thumbnail_urls
                .iter()
                .filter(|url| !url.is_empty())
                .map(|url| {
                    thumbnail(
                        &rewrite_drive_url(url),
                        &format!("{category_lower} thumbnail"),
                    )
                }),
        );
        while thumbnails.len() < THUMBNAIL_COUNT {
            thumbnails.push(thumbnail(THUMBNAIL_PLACEHOLDER, "placeholder image"));
        }

        let mut fields = Fields::new();
        fields.insert("name".to_string(), value::string(self.name.clone()));
        fields.insert(
            "description".to_string(),
            value::string(self.description.clone()),
        );
        fields.insert("price".to_string(), value::integer(self.price));
        fields.insert("category".to_string(), value::string(self.category.clone()));
        fields.insert("image".to_string(), value::string(image));
        fields.insert("imageHint".to_string(), value::string(image_hint));
        fields.insert("thumbnails".to_string(), value::array(thumbnails));
        fields.insert("sellerId".to_string(), value::string(seller_id));
        fields.insert(
            "sellerName".to_string(),
            value::string(seller_name.unwrap_or("Anonymous")),
        );
        fields.insert("createdAt".to_string(), value::timestamp(&Utc::now()));
        fields.insert("featured".to_string(), value::boolean(false));
        fields.insert("rating".to_string(), value::integer(0));
        fields.insert("reviews".to_string(), value::integer(0));
        fields
    }
}

fn thumbnail(url: &str, hint: &str) -> serde_json::Value {
    let mut fields = Fields::new();
    fields.insert("url".to_string(), value::string(url));
    fields.insert("hint".to_string(), value::string(hint));
    value::map(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_listing() -> NewListing {
        NewListing {
            name: "Handwoven Basket".to_string(),
            description: "A sturdy basket woven from local reeds.".to_string(),
            price: 50_000,
            category: "Handmade Crafts".to_string(),
            image_url: "https://example.com/basket.png".to_string(),
            thumbnail_urls: vec![],
        }
    }

    #[test]
    fn test_valid_listing_passes() {
        assert!(valid_listing().validate().is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        let listing = NewListing {
            name: "ab".to_string(),
            ..valid_listing()
        };
        let errors = listing.validate().expect_err("should fail");
        assert_eq!(errors.0[0].field, "name");
    }

    #[test]
    fn test_all_failures_collected() {
        let listing = NewListing {
            name: "x".to_string(),
            description: "short".to_string(),
            price: -5,
            category: String::new(),
            image_url: "not a url".to_string(),
            thumbnail_urls: vec![],
        };
        let errors = listing.validate().expect_err("should fail");
        let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["name", "description", "price", "category", "imageUrl"]
        );
    }

    #[test]
    fn test_empty_thumbnail_slots_allowed() {
        let listing = NewListing {
            thumbnail_urls: vec![String::new(), String::new()],
            ..valid_listing()
        };
        assert!(listing.validate().is_ok());
    }

    #[test]
    fn test_more_than_three_thumbnails_rejected() {
        let listing = NewListing {
            thumbnail_urls: (0..4)
                .map(|n| format!("https://example.com/t{n}.png"))
                .collect(),
            ..valid_listing()
        };
        let errors = listing.validate().expect_err("should fail");
        assert_eq!(errors.0[0].field, "thumbnailUrls");
        assert_eq!(
            errors.0[0].message,
            "Please provide no more than 3 thumbnail URLs."
        );

        // Empty slots do not count against the limit
        let listing = NewListing {
            thumbnail_urls: vec![
                "https://example.com/t1.png".to_string(),
                String::new(),
                "https://example.com/t2.png".to_string(),
                String::new(),
                "https://example.com/t3.png".to_string(),
            ],
            ..valid_listing()
        };
        assert!(listing.validate().is_ok());
    }

    #[test]
    fn test_invalid_thumbnail_rejected() {
        let listing = NewListing {
            thumbnail_urls: vec!["ftp://example.com/x.png".to_string()],
            ..valid_listing()
        };
        let errors = listing.validate().expect_err("should fail");
        assert_eq!(errors.0[0].field, "thumbnailUrls");
    }

    #[test]
    fn test_drive_share_link_rewritten() {
        let rewritten = rewrite_drive_url(
            "https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing",
        );
        assert_eq!(
            rewritten,
            "https://drive.google.com/uc?export=view&id=1AbC_d-9"
        );
    }

    #[test]
    fn test_non_drive_url_passes_through() {
        let url = "https://example.com/basket.png";
        assert_eq!(rewrite_drive_url(url), url);
    }

    #[test]
    fn test_document_pads_thumbnails_to_four() {
        let fields = valid_listing().document_fields("seller-1", Some("Mary"));
        let thumbnails =
            value::as_array(fields.get("thumbnails").expect("present")).expect("array");
        assert_eq!(thumbnails.len(), 4);

        let first = value::as_map(thumbnails[0]).expect("map");
        assert_eq!(
            first.get("url").and_then(value::as_str),
            Some("https://example.com/basket.png")
        );
        assert_eq!(
            first.get("hint").and_then(value::as_str),
            Some("handmade crafts product")
        );

        let padding = value::as_map(thumbnails[3]).expect("map");
        assert_eq!(
            padding.get("url").and_then(value::as_str),
            Some(THUMBNAIL_PLACEHOLDER)
        );
    }

    #[test]
    fn test_document_derived_fields() {
        let fields = valid_listing().document_fields("seller-1", None);
        assert_eq!(
            fields.get("sellerName").and_then(value::as_str),
            Some("Anonymous")
        );
        assert_eq!(fields.get("rating").and_then(value::as_i64), Some(0));
        assert_eq!(fields.get("reviews").and_then(value::as_i64), Some(0));
        assert_eq!(fields.get("featured").and_then(value::as_bool), Some(false));
        assert!(fields.contains_key("createdAt"));
    }
}

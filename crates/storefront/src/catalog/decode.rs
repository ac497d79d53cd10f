//! Typed decoding of raw store documents into domain entities.
//!
//! Records written by earlier clients are frequently partial, so absent
//! fields are filled from a fixed default struct. Present-but-wrong-shape
//! fields are rejected with a [`DecodeError`] rather than silently coerced;
//! the reader logs and skips such records.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use kasanje_core::{Category, DocumentId, Price, Product, Rating, Testimonial, Thumbnail};

use crate::firestore::{Document, Fields, value};

/// Placeholder used when a product has no main image.
pub const PRODUCT_IMAGE_PLACEHOLDER: &str = "https://placehold.co/600x600.png";

/// Placeholder used to pad thumbnail lists.
pub const THUMBNAIL_PLACEHOLDER: &str = "https://placehold.co/200x200.png";

/// Minimum thumbnail count guaranteed after decode.
pub const MIN_THUMBNAILS: usize = 4;

const DEFAULT_NAME: &str = "Unnamed Product";
const DEFAULT_DESCRIPTION: &str = "No description available.";
const DEFAULT_IMAGE_HINT: &str = "product";
const DEFAULT_CATEGORY: &str = "Uncategorized";
const DEFAULT_DETAILS: [&str; 2] = ["No details provided.", "Contact seller for more information."];

/// A stored field had the wrong shape for its declared meaning.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("field `{field}`: expected {expected}")]
pub struct DecodeError {
    /// Field path within the document.
    pub field: &'static str,
    /// Description of the expected shape.
    pub expected: &'static str,
}

impl DecodeError {
    const fn new(field: &'static str, expected: &'static str) -> Self {
        Self { field, expected }
    }
}

// =============================================================================
// Field helpers: absent -> Ok(None), wrong shape -> Err
// =============================================================================

fn opt_string(fields: &Fields, field: &'static str) -> Result<Option<String>, DecodeError> {
    fields.get(field).map_or(Ok(None), |v| {
        value::as_str(v)
            .map(|s| Some(s.to_string()))
            .ok_or(DecodeError::new(field, "string"))
    })
}

fn opt_i64(fields: &Fields, field: &'static str) -> Result<Option<i64>, DecodeError> {
    fields.get(field).map_or(Ok(None), |v| {
        value::as_i64(v)
            .map(Some)
            .ok_or(DecodeError::new(field, "integer"))
    })
}

fn opt_bool(fields: &Fields, field: &'static str) -> Result<Option<bool>, DecodeError> {
    fields.get(field).map_or(Ok(None), |v| {
        value::as_bool(v)
            .map(Some)
            .ok_or(DecodeError::new(field, "boolean"))
    })
}

fn opt_rating(fields: &Fields, field: &'static str) -> Result<Option<Rating>, DecodeError> {
    let Some(v) = fields.get(field) else {
        return Ok(None);
    };
    let stars =
        value::as_f64(v).ok_or(DecodeError::new(field, "number between 0 and 5"))?;
    Rating::from_stars(stars)
        .map(Some)
        .map_err(|_| DecodeError::new(field, "rating between 0 and 5 in half steps"))
}

fn opt_timestamp(
    fields: &Fields,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, DecodeError> {
    fields.get(field).map_or(Ok(None), |v| {
        value::as_timestamp(v)
            .map(Some)
            .ok_or(DecodeError::new(field, "timestamp"))
    })
}

fn opt_string_array(
    fields: &Fields,
    field: &'static str,
) -> Result<Option<Vec<String>>, DecodeError> {
    let Some(v) = fields.get(field) else {
        return Ok(None);
    };
    let items = value::as_array(v).ok_or(DecodeError::new(field, "array of strings"))?;
    items
        .into_iter()
        .map(|item| {
            value::as_str(item)
                .map(String::from)
                .ok_or(DecodeError::new(field, "array of strings"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn decode_thumbnail(item: &Value) -> Result<Thumbnail, DecodeError> {
    const EXPECTED: &str = "array of {url, hint} maps";

    let map = value::as_map(item).ok_or(DecodeError::new("thumbnails", EXPECTED))?;
    let url = map
        .get("url")
        .and_then(value::as_str)
        .ok_or(DecodeError::new("thumbnails", EXPECTED))?;
    let hint = map
        .get("hint")
        .and_then(value::as_str)
        .ok_or(DecodeError::new("thumbnails", EXPECTED))?;

    Ok(Thumbnail::new(url, hint))
}

fn opt_thumbnails(fields: &Fields) -> Result<Option<Vec<Thumbnail>>, DecodeError> {
    let Some(v) = fields.get("thumbnails") else {
        return Ok(None);
    };
    let items =
        value::as_array(v).ok_or(DecodeError::new("thumbnails", "array of {url, hint} maps"))?;
    items
        .into_iter()
        .map(decode_thumbnail)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Default thumbnail set: the main image first, padded with placeholders.
fn default_thumbnails(image: &str) -> Vec<Thumbnail> {
    let mut thumbnails = vec![Thumbnail::new(image, DEFAULT_IMAGE_HINT)];
    while thumbnails.len() < MIN_THUMBNAILS {
        thumbnails.push(Thumbnail::new(THUMBNAIL_PLACEHOLDER, DEFAULT_IMAGE_HINT));
    }
    thumbnails
}

/// Parse the server-assigned creation time, if present.
fn server_create_time(document: &Document) -> Option<DateTime<Utc>> {
    let raw = document.create_time.as_deref()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

// =============================================================================
// Entity decoders
// =============================================================================

/// Decode a product document, filling absent fields with fixed defaults.
///
/// Guarantees the thumbnail invariant: at least [`MIN_THUMBNAILS`] entries,
/// with the primary image first whenever the list had to be defaulted.
///
/// # Errors
///
/// Returns [`DecodeError`] if a present field has the wrong shape.
pub fn decode_product(document: &Document) -> Result<Product, DecodeError> {
    let fields = &document.fields;

    let image =
        opt_string(fields, "image")?.unwrap_or_else(|| PRODUCT_IMAGE_PLACEHOLDER.to_string());

    let reviews = opt_i64(fields, "reviews")?
        .map(|n| u32::try_from(n).map_err(|_| DecodeError::new("reviews", "non-negative integer")))
        .transpose()?
        .unwrap_or(0);

    let mut thumbnails =
        opt_thumbnails(fields)?.unwrap_or_else(|| default_thumbnails(&image));
    // Short stored lists are padded so callers can always render a 4-up strip
    while thumbnails.len() < MIN_THUMBNAILS {
        thumbnails.push(Thumbnail::new(THUMBNAIL_PLACEHOLDER, DEFAULT_IMAGE_HINT));
    }

    // Normalize the timestamp: stored field, else the server-assigned
    // creation time, else now.
    let created_at = opt_timestamp(fields, "createdAt")?
        .or_else(|| server_create_time(document))
        .unwrap_or_else(Utc::now);

    Ok(Product {
        id: DocumentId::new(document.id()),
        name: opt_string(fields, "name")?.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        price: Price::new(opt_i64(fields, "price")?.unwrap_or(0)),
        image,
        image_hint: opt_string(fields, "imageHint")?
            .unwrap_or_else(|| DEFAULT_IMAGE_HINT.to_string()),
        description: opt_string(fields, "description")?
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        rating: opt_rating(fields, "rating")?.unwrap_or(Rating::ZERO),
        reviews,
        details: opt_string_array(fields, "details")?
            .unwrap_or_else(|| DEFAULT_DETAILS.map(String::from).to_vec()),
        category: opt_string(fields, "category")?
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        thumbnails,
        seller_id: opt_string(fields, "sellerId")?.map(DocumentId::new),
        seller_name: opt_string(fields, "sellerName")?,
        created_at,
        featured: opt_bool(fields, "featured")?.unwrap_or(false),
    })
}

/// Decode a category document.
///
/// # Errors
///
/// Returns [`DecodeError`] if a present field has the wrong shape.
pub fn decode_category(document: &Document) -> Result<Category, DecodeError> {
    let fields = &document.fields;

    Ok(Category {
        id: Some(DocumentId::new(document.id())),
        name: opt_string(fields, "name")?.unwrap_or_default(),
        description: opt_string(fields, "description")?.unwrap_or_default(),
        image: opt_string(fields, "image")?.unwrap_or_default(),
        image_hint: opt_string(fields, "imageHint")?.unwrap_or_default(),
    })
}

/// Decode a testimonial document.
///
/// # Errors
///
/// Returns [`DecodeError`] if a present field has the wrong shape.
pub fn decode_testimonial(document: &Document) -> Result<Testimonial, DecodeError> {
    let fields = &document.fields;

    Ok(Testimonial {
        id: Some(DocumentId::new(document.id())),
        name: opt_string(fields, "name")?.unwrap_or_default(),
        title: opt_string(fields, "title")?.unwrap_or_default(),
        quote: opt_string(fields, "quote")?.unwrap_or_default(),
        image: opt_string(fields, "image")?.unwrap_or_default(),
        image_hint: opt_string(fields, "imageHint")?.unwrap_or_default(),
        rating: opt_rating(fields, "rating")?.unwrap_or(Rating::ZERO),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(id: &str, fields: Fields) -> Document {
        Document {
            name: format!("projects/p/databases/(default)/documents/products/{id}"),
            fields,
            create_time: None,
            update_time: None,
        }
    }

    fn fields(pairs: &[(&str, Value)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_document_gets_all_defaults() {
        let product = decode_product(&document("p1", Fields::new())).expect("decode");

        assert_eq!(product.name, "Unnamed Product");
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.image, PRODUCT_IMAGE_PLACEHOLDER);
        assert_eq!(product.category, "Uncategorized");
        assert_eq!(product.rating, Rating::ZERO);
        assert_eq!(product.reviews, 0);
        assert_eq!(
            product.details,
            vec![
                "No details provided.".to_string(),
                "Contact seller for more information.".to_string()
            ]
        );
        assert!(product.seller_id.is_none());
    }

    #[test]
    fn test_missing_thumbnails_defaulted_to_four_with_primary_first() {
        let doc = document(
            "p1",
            fields(&[("image", value::string("https://example.com/main.png"))]),
        );
        let product = decode_product(&doc).expect("decode");

        assert_eq!(product.thumbnails.len(), 4);
        assert_eq!(
            product.thumbnails.first().map(|t| t.url.as_str()),
            Some("https://example.com/main.png")
        );
        assert!(
            product.thumbnails[1..]
                .iter()
                .all(|t| t.url == THUMBNAIL_PLACEHOLDER)
        );
    }

    #[test]
    fn test_short_thumbnail_list_padded() {
        let thumbs = value::array(vec![value::map(fields(&[
            ("url", value::string("https://example.com/t1.png")),
            ("hint", value::string("crafts thumbnail")),
        ]))]);
        let doc = document("p1", fields(&[("thumbnails", thumbs)]));
        let product = decode_product(&doc).expect("decode");

        assert_eq!(product.thumbnails.len(), 4);
        assert_eq!(product.thumbnails[0].url, "https://example.com/t1.png");
    }

    #[test]
    fn test_wrong_shape_price_rejected() {
        let doc = document("p1", fields(&[("price", value::string("fifty thousand"))]));
        let err = decode_product(&doc).expect_err("should reject");
        assert_eq!(err.field, "price");
    }

    #[test]
    fn test_wrong_shape_details_rejected() {
        let doc = document(
            "p1",
            fields(&[("details", value::array(vec![value::integer(7)]))]),
        );
        assert!(decode_product(&doc).is_err());
    }

    #[test]
    fn test_invalid_rating_rejected_not_coerced() {
        let doc = document("p1", fields(&[("rating", value::double(4.3))]));
        let err = decode_product(&doc).expect_err("should reject");
        assert_eq!(err.field, "rating");
    }

    #[test]
    fn test_full_document_decodes() {
        let doc = document(
            "p1",
            fields(&[
                ("name", value::string("Handwoven Basket")),
                ("price", value::integer(50_000)),
                ("image", value::string("https://example.com/basket.png")),
                ("imageHint", value::string("handmade crafts product")),
                ("description", value::string("A sturdy basket.")),
                ("rating", value::double(4.5)),
                ("reviews", value::integer(12)),
                ("category", value::string("Handmade Crafts")),
                ("featured", value::boolean(true)),
                ("sellerId", value::string("seller-1")),
                ("sellerName", value::string("Mary")),
                (
                    "createdAt",
                    json!({ "timestampValue": "2024-06-01T12:00:00Z" }),
                ),
            ]),
        );

        let product = decode_product(&doc).expect("decode");
        assert_eq!(product.name, "Handwoven Basket");
        assert_eq!(product.price, Price::new(50_000));
        assert!((product.rating.stars() - 4.5).abs() < f64::EPSILON);
        assert_eq!(product.reviews, 12);
        assert!(product.featured);
        assert_eq!(product.seller_name.as_deref(), Some("Mary"));
    }

    #[test]
    fn test_missing_created_at_falls_back_to_server_time() {
        let mut doc = document("p1", Fields::new());
        doc.create_time = Some("2024-01-15T08:30:00Z".to_string());

        let product = decode_product(&doc).expect("decode");
        assert_eq!(product.created_at.to_rfc3339(), "2024-01-15T08:30:00+00:00");
    }

    #[test]
    fn test_category_decode() {
        let doc = document(
            "c1",
            fields(&[
                ("name", value::string("Fresh Produce")),
                ("description", value::string("Farm-fresh fruits and vegetables")),
                ("image", value::string("https://placehold.co/400x400.png")),
                ("imageHint", value::string("fresh vegetables")),
            ]),
        );

        let category = decode_category(&doc).expect("decode");
        assert_eq!(category.name, "Fresh Produce");
        assert_eq!(category.id.as_ref().map(ToString::to_string), Some("c1".to_string()));
    }
}

//! Catalog reads: products, categories, and testimonials.
//!
//! Wraps the document store client with typed decoding and a `moka` cache
//! (5-minute TTL). Read failures are logged and surfaced as empty results,
//! so storefront pages degrade to "nothing here" instead of erroring.

mod cache;
pub mod decode;
pub mod seed;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument, warn};

use kasanje_core::{Category, Product, Testimonial};

use crate::firestore::{self, FirestoreClient, FirestoreError, StructuredQuery, value};

use cache::CacheValue;
pub use decode::DecodeError;
pub use seed::{SeedOutcome, seed_reference_data};

/// Collection of product listings.
pub const PRODUCTS_COLLECTION: &str = "products";

/// Collection of product categories.
pub const CATEGORIES_COLLECTION: &str = "categories";

/// Collection of community testimonials.
pub const TESTIMONIALS_COLLECTION: &str = "testimonials";

/// Filter options for product queries. All criteria are optional and
/// combine with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact match on the product category name.
    pub category: Option<String>,
    /// Exact match on the featured flag.
    pub featured: Option<bool>,
    /// Exact match on the seller's account id.
    pub seller_id: Option<String>,
    /// Maximum number of results.
    pub limit: Option<i64>,
}

impl ProductFilter {
    fn cache_key(&self) -> String {
        format!(
            "products:{}:{}:{}:{}",
            self.category.as_deref().unwrap_or(""),
            self.featured.map_or_else(String::new, |f| f.to_string()),
            self.seller_id.as_deref().unwrap_or(""),
            self.limit.map_or_else(String::new, |l| l.to_string()),
        )
    }
}

/// Build the product query for a filter: equality criteria, newest first.
fn product_query(filter: &ProductFilter) -> StructuredQuery {
    let mut query = StructuredQuery::collection(PRODUCTS_COLLECTION);
    if let Some(category) = &filter.category {
        query = query.filter_eq("category", value::string(category.clone()));
    }
    if let Some(featured) = filter.featured {
        query = query.filter_eq("featured", value::boolean(featured));
    }
    if let Some(seller_id) = &filter.seller_id {
        query = query.filter_eq("sellerId", value::string(seller_id.clone()));
    }
    query = query.order_desc("createdAt");
    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }
    query
}

// =============================================================================
// CatalogReader
// =============================================================================

/// Cached reader over the catalog collections.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct CatalogReader {
    inner: Arc<CatalogReaderInner>,
}

struct CatalogReaderInner {
    firestore: FirestoreClient,
    cache: Cache<String, CacheValue>,
}

impl CatalogReader {
    /// Create a new catalog reader over a document store client.
    #[must_use]
    pub fn new(firestore: FirestoreClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogReaderInner { firestore, cache }),
        }
    }

    /// List products matching a filter, newest first.
    ///
    /// Store or decode failures are logged and produce an empty list;
    /// callers cannot distinguish "no results" from "read failed."
    #[instrument(skip(self))]
    pub async fn get_products(&self, filter: &ProductFilter) -> Vec<Product> {
        let cache_key = filter.cache_key();
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!(%cache_key, "Product list cache hit");
            return products;
        }

        match self.fetch_products(filter).await {
            Ok(products) => {
                self.inner
                    .cache
                    .insert(cache_key, CacheValue::Products(products.clone()))
                    .await;
                products
            }
            Err(err) => {
                warn!(error = %err, "Product query failed, returning empty list");
                Vec::new()
            }
        }
    }

    async fn fetch_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, FirestoreError> {
        let documents = self
            .inner
            .firestore
            .run_query(product_query(filter))
            .await?;
        Ok(decode_all(&documents, decode::decode_product))
    }

    /// Fetch a single product by document id.
    ///
    /// Returns `None` for missing documents and, with a log line, for
    /// store or decode failures.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Option<Product> {
        let cache_key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!(%cache_key, "Product cache hit");
            return Some(*product);
        }

        let document = match self
            .inner
            .firestore
            .get_document(PRODUCTS_COLLECTION, id)
            .await
        {
            Ok(Some(document)) => document,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, id, "Product fetch failed");
                return None;
            }
        };

        match decode::decode_product(&document) {
            Ok(product) => {
                self.inner
                    .cache
                    .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
                    .await;
                Some(product)
            }
            Err(err) => {
                warn!(error = %err, id, "Skipping malformed product document");
                None
            }
        }
    }

    /// List all categories, ordered by name.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Vec<Category> {
        let cache_key = "categories".to_string();
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            return categories;
        }

        let query = StructuredQuery::collection(CATEGORIES_COLLECTION).order_asc("name");
        match self.inner.firestore.run_query(query).await {
            Ok(documents) => {
                let categories = decode_all(&documents, decode::decode_category);
                self.inner
                    .cache
                    .insert(cache_key, CacheValue::Categories(categories.clone()))
                    .await;
                categories
            }
            Err(err) => {
                warn!(error = %err, "Category query failed, returning empty list");
                Vec::new()
            }
        }
    }

    /// List all testimonials.
    #[instrument(skip(self))]
    pub async fn get_testimonials(&self) -> Vec<Testimonial> {
        let cache_key = "testimonials".to_string();
        if let Some(CacheValue::Testimonials(testimonials)) =
            self.inner.cache.get(&cache_key).await
        {
            return testimonials;
        }

        let query = StructuredQuery::collection(TESTIMONIALS_COLLECTION);
        match self.inner.firestore.run_query(query).await {
            Ok(documents) => {
                let testimonials = decode_all(&documents, decode::decode_testimonial);
                self.inner
                    .cache
                    .insert(cache_key, CacheValue::Testimonials(testimonials.clone()))
                    .await;
                testimonials
            }
            Err(err) => {
                warn!(error = %err, "Testimonial query failed, returning empty list");
                Vec::new()
            }
        }
    }

    /// Drop all cached reads. Called after a new listing is accepted so the
    /// seller sees it immediately.
    pub fn invalidate(&self) {
        self.inner.cache.invalidate_all();
    }

    /// The underlying document store client, for writes.
    #[must_use]
    pub fn firestore(&self) -> &FirestoreClient {
        &self.inner.firestore
    }
}

/// Decode a batch of documents, logging and skipping malformed records.
fn decode_all<T>(
    documents: &[firestore::Document],
    decode: impl Fn(&firestore::Document) -> Result<T, DecodeError>,
) -> Vec<T> {
    documents
        .iter()
        .filter_map(|document| match decode(document) {
            Ok(entity) => Some(entity),
            Err(err) => {
                warn!(error = %err, id = document.id(), "Skipping malformed document");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_cache_keys_distinct() {
        let all = ProductFilter::default();
        let featured = ProductFilter {
            featured: Some(true),
            limit: Some(4),
            ..ProductFilter::default()
        };
        let category = ProductFilter {
            category: Some("Fresh Produce".to_string()),
            ..ProductFilter::default()
        };

        assert_ne!(all.cache_key(), featured.cache_key());
        assert_ne!(all.cache_key(), category.cache_key());
        assert_ne!(featured.cache_key(), category.cache_key());
    }

    #[test]
    fn test_product_query_shape() {
        let filter = ProductFilter {
            category: Some("Art & Prints".to_string()),
            limit: Some(8),
            ..ProductFilter::default()
        };
        let json = serde_json::to_value(product_query(&filter)).expect("serialize");

        assert_eq!(json["from"][0]["collectionId"], "products");
        assert_eq!(json["where"]["fieldFilter"]["field"]["fieldPath"], "category");
        assert_eq!(
            json["where"]["fieldFilter"]["value"]["stringValue"],
            "Art & Prints"
        );
        assert_eq!(json["orderBy"][0]["field"]["fieldPath"], "createdAt");
        assert_eq!(json["orderBy"][0]["direction"], "DESCENDING");
        assert_eq!(json["limit"], 8);
    }

    #[test]
    fn test_unfiltered_query_has_no_where_clause() {
        let json =
            serde_json::to_value(product_query(&ProductFilter::default())).expect("serialize");
        assert!(json.get("where").is_none());
        assert_eq!(json["orderBy"][0]["direction"], "DESCENDING");
    }

    #[test]
    fn test_multiple_criteria_compose_with_and() {
        let filter = ProductFilter {
            category: Some("Fresh Produce".to_string()),
            featured: Some(true),
            ..ProductFilter::default()
        };
        let json = serde_json::to_value(product_query(&filter)).expect("serialize");

        assert_eq!(json["where"]["compositeFilter"]["op"], "AND");
        assert_eq!(
            json["where"]["compositeFilter"]["filters"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }
}

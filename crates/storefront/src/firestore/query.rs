//! Structured query types for the document store's `runQuery` endpoint.
//!
//! The query surface this service needs is deliberately narrow: one
//! collection, an AND-composite of equality filters, a single sort key, and
//! an optional limit. The builder enforces that shape.

use serde::Serialize;
use serde_json::Value;

/// A structured query over a single collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    from: Vec<CollectionSelector>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    where_clause: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    order_by: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
enum Filter {
    #[serde(rename = "compositeFilter")]
    Composite(CompositeFilter),
    #[serde(rename = "fieldFilter")]
    Field(FieldFilter),
}

#[derive(Debug, Clone, Serialize)]
struct CompositeFilter {
    op: &'static str,
    filters: Vec<Filter>,
}

#[derive(Debug, Clone, Serialize)]
struct FieldFilter {
    field: FieldReference,
    op: &'static str,
    value: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

#[derive(Debug, Clone, Serialize)]
struct Order {
    field: FieldReference,
    direction: &'static str,
}

impl StructuredQuery {
    /// Start a query over the named collection.
    #[must_use]
    pub fn collection(collection_id: impl Into<String>) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection_id.into(),
            }],
            where_clause: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Add an equality filter on a field. Multiple filters AND together.
    #[must_use]
    pub fn filter_eq(mut self, field_path: impl Into<String>, value: Value) -> Self {
        let filter = Filter::Field(FieldFilter {
            field: FieldReference {
                field_path: field_path.into(),
            },
            op: "EQUAL",
            value,
        });

        self.where_clause = Some(match self.where_clause.take() {
            None => filter,
            Some(Filter::Composite(mut composite)) => {
                composite.filters.push(filter);
                Filter::Composite(composite)
            }
            Some(existing) => Filter::Composite(CompositeFilter {
                op: "AND",
                filters: vec![existing, filter],
            }),
        });
        self
    }

    /// Order results by a field, ascending.
    #[must_use]
    pub fn order_asc(mut self, field_path: impl Into<String>) -> Self {
        self.order_by.push(Order {
            field: FieldReference {
                field_path: field_path.into(),
            },
            direction: "ASCENDING",
        });
        self
    }

    /// Order results by a field, descending.
    #[must_use]
    pub fn order_desc(mut self, field_path: impl Into<String>) -> Self {
        self.order_by.push(Order {
            field: FieldReference {
                field_path: field_path.into(),
            },
            direction: "DESCENDING",
        });
        self
    }

    /// Cap the number of returned documents.
    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::value;
    use serde_json::json;

    #[test]
    fn test_bare_collection_query() {
        let query = StructuredQuery::collection("testimonials");
        let json = serde_json::to_value(&query).expect("serialize");
        assert_eq!(json, json!({ "from": [{ "collectionId": "testimonials" }] }));
    }

    #[test]
    fn test_single_filter_is_field_filter() {
        let query = StructuredQuery::collection("products")
            .filter_eq("category", value::string("Fresh Produce"));
        let json = serde_json::to_value(&query).expect("serialize");

        assert_eq!(
            json["where"],
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": "category" },
                    "op": "EQUAL",
                    "value": { "stringValue": "Fresh Produce" }
                }
            })
        );
    }

    #[test]
    fn test_multiple_filters_compose_with_and() {
        let query = StructuredQuery::collection("products")
            .filter_eq("featured", value::boolean(true))
            .filter_eq("sellerId", value::string("seller-1"))
            .filter_eq("category", value::string("Art & Prints"));
        let json = serde_json::to_value(&query).expect("serialize");

        let composite = &json["where"]["compositeFilter"];
        assert_eq!(composite["op"], "AND");
        assert_eq!(composite["filters"].as_array().expect("array").len(), 3);
    }

    #[test]
    fn test_order_and_limit() {
        let query = StructuredQuery::collection("products")
            .order_desc("createdAt")
            .limit(8);
        let json = serde_json::to_value(&query).expect("serialize");

        assert_eq!(
            json["orderBy"],
            json!([{ "field": { "fieldPath": "createdAt" }, "direction": "DESCENDING" }])
        );
        assert_eq!(json["limit"], 8);
    }
}

//! Typed client for the managed document store's REST API.
//!
//! The store is a black box reached over HTTPS: filtered/sorted/limited reads
//! via `runQuery`, single-document fetches, inserts with server-assigned ids,
//! and atomic batched writes via `commit` (optionally guarded by an
//! `exists: false` precondition, which doubles as a unique-constraint
//! insert).

pub mod query;
pub mod value;

use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::FirebaseConfig;

pub use query::StructuredQuery;
pub use value::Fields;

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com/v1";

/// Length of store-style auto-generated document ids.
const DOCUMENT_ID_LEN: usize = 20;

/// Errors from the document store API.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// Canonical status name, e.g. `ALREADY_EXISTS`, `PERMISSION_DENIED`.
        status: String,
        /// Human-readable message from the API.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FirestoreError {
    /// Whether this error is a precondition conflict (`ALREADY_EXISTS`).
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Api { status, .. } if status == "ALREADY_EXISTS")
    }
}

/// A raw document returned by the store: full resource name plus the
/// opaque field map callers decode themselves.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name (`projects/.../documents/<collection>/<id>`).
    pub name: String,
    /// Field values in the store's value envelope.
    #[serde(default)]
    pub fields: Fields,
    /// Server-assigned creation time (RFC 3339).
    pub create_time: Option<String>,
    /// Server-assigned update time (RFC 3339).
    pub update_time: Option<String>,
}

impl Document {
    /// The assigned document identifier (last path segment of the name).
    #[must_use]
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

/// One write in an atomic commit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Write {
    /// The document to set.
    pub update: DocumentWrite,
    /// Optional precondition; `exists: false` makes this an insert that
    /// fails the whole commit if the document already exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_document: Option<Precondition>,
}

/// Name and fields of a document being written.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentWrite {
    /// Full resource name to write to.
    pub name: String,
    /// Field values in the store's value envelope.
    pub fields: Fields,
}

/// Write precondition.
#[derive(Debug, Clone, Serialize)]
pub struct Precondition {
    /// Required existence state of the target document.
    pub exists: bool,
}

/// One element of a `runQuery` response stream; elements without a
/// `document` carry only metadata (read time, partial progress).
#[derive(Debug, Deserialize)]
struct RunQueryElement {
    document: Option<Document>,
}

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

// =============================================================================
// FirestoreClient
// =============================================================================

/// Client for the document store REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct FirestoreClient {
    inner: Arc<FirestoreClientInner>,
}

struct FirestoreClientInner {
    client: reqwest::Client,
    /// `{host}/projects/{project}/databases/(default)/documents`
    documents_url: String,
    /// Stays wrapped; exposed only at the request-auth call sites.
    access_token: SecretString,
}

impl FirestoreClient {
    /// Create a new document store client.
    #[must_use]
    pub fn new(config: &FirebaseConfig) -> Self {
        Self::from_parts(&config.project_id, &config.access_token)
    }

    /// Create a client from a project id and access token directly, for
    /// callers without a full storefront configuration (the seeding CLI).
    #[must_use]
    pub fn from_parts(project_id: &str, access_token: &SecretString) -> Self {
        let documents_url =
            format!("{FIRESTORE_HOST}/projects/{project_id}/databases/(default)/documents");

        Self {
            inner: Arc::new(FirestoreClientInner {
                client: reqwest::Client::new(),
                documents_url,
                access_token: access_token.clone(),
            }),
        }
    }

    /// Full resource name of a document in a collection.
    #[must_use]
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.inner.documents_url)
    }

    /// Run a structured query and return the matching documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the query.
    #[instrument(skip(self, query))]
    pub async fn run_query(&self, query: StructuredQuery) -> Result<Vec<Document>, FirestoreError> {
        let url = format!("{}:runQuery", self.inner.documents_url);
        let body = serde_json::json!({ "structuredQuery": query });

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(self.inner.access_token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let text = check_status(response).await?;
        let elements: Vec<RunQueryElement> = serde_json::from_str(&text)?;

        Ok(elements.into_iter().filter_map(|e| e.document).collect())
    }

    /// Fetch a single document by id. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a missing document.
    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, FirestoreError> {
        let url = self.document_name(collection, id);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(self.inner.access_token.expose_secret())
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = check_status(response).await?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Insert a document with a server-assigned id, returning the stored
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the write.
    #[instrument(skip(self, fields), fields(collection = %collection))]
    pub async fn create_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<Document, FirestoreError> {
        let url = format!("{}/{collection}", self.inner.documents_url);
        let body = serde_json::json!({ "fields": fields });

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(self.inner.access_token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let text = check_status(response).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply a batch of writes in a single atomic commit.
    ///
    /// If any write's precondition fails, the whole commit fails with
    /// `ALREADY_EXISTS` and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, a precondition fails, or the
    /// API rejects the writes.
    #[instrument(skip(self, writes), fields(write_count = writes.len()))]
    pub async fn commit(&self, writes: Vec<Write>) -> Result<(), FirestoreError> {
        let url = format!("{}:commit", self.inner.documents_url);
        let body = serde_json::json!({ "writes": writes });

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(self.inner.access_token.expose_secret())
            .json(&body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Read the response body, converting non-success statuses into
/// [`FirestoreError::Api`].
async fn check_status(response: reqwest::Response) -> Result<String, FirestoreError> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return Ok(text);
    }

    // Try the canonical error envelope first; fall back to raw body
    let (api_status, message) = serde_json::from_str::<ApiErrorEnvelope>(&text).map_or_else(
        |_| {
            (
                status.as_str().to_string(),
                text.chars().take(200).collect::<String>(),
            )
        },
        |envelope| (envelope.error.status, envelope.error.message),
    );

    tracing::error!(
        http_status = %status,
        api_status = %api_status,
        "Document store returned non-success status"
    );

    Err(FirestoreError::Api {
        status: api_status,
        message,
    })
}

/// Generate a store-style random document id (20 alphanumeric characters).
#[must_use]
pub fn random_document_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_from_name() {
        let doc = Document {
            name: "projects/kasanje/databases/(default)/documents/products/abc123".to_string(),
            fields: Fields::new(),
            create_time: None,
            update_time: None,
        };
        assert_eq!(doc.id(), "abc123");
    }

    #[test]
    fn test_random_document_id_shape() {
        let id = random_document_id();
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        // Vanishingly unlikely to collide
        assert_ne!(id, random_document_id());
    }

    #[test]
    fn test_write_serialization_with_precondition() {
        let write = Write {
            update: DocumentWrite {
                name: "projects/p/databases/(default)/documents/meta/seed".to_string(),
                fields: Fields::new(),
            },
            current_document: Some(Precondition { exists: false }),
        };

        let json = serde_json::to_value(&write).expect("serialize");
        assert_eq!(json["currentDocument"]["exists"], false);
    }

    #[test]
    fn test_conflict_detection() {
        let err = FirestoreError::Api {
            status: "ALREADY_EXISTS".to_string(),
            message: "Document already exists".to_string(),
        };
        assert!(err.is_conflict());

        let err = FirestoreError::Api {
            status: "PERMISSION_DENIED".to_string(),
            message: "nope".to_string(),
        };
        assert!(!err.is_conflict());
    }
}

//! Application state shared across handlers.

use std::sync::Arc;

use crate::ai::GenerationClient;
use crate::catalog::CatalogReader;
use crate::config::StorefrontConfig;
use crate::firestore::FirestoreClient;
use crate::services::auth::IdentityClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the document store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    firestore: FirestoreClient,
    catalog: CatalogReader,
    auth: IdentityClient,
    generation: GenerationClient,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let firestore = FirestoreClient::new(&config.firebase);
        let catalog = CatalogReader::new(firestore.clone());
        let auth = IdentityClient::new(&config.firebase);
        let generation = GenerationClient::new(&config.generation);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                firestore,
                catalog,
                auth,
                generation,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the document store client.
    #[must_use]
    pub fn firestore(&self) -> &FirestoreClient {
        &self.inner.firestore
    }

    /// Get a reference to the cached catalog reader.
    #[must_use]
    pub fn catalog(&self) -> &CatalogReader {
        &self.inner.catalog
    }

    /// Get a reference to the identity provider client.
    #[must_use]
    pub fn auth(&self) -> &IdentityClient {
        &self.inner.auth
    }

    /// Get a reference to the generation API client.
    #[must_use]
    pub fn generation(&self) -> &GenerationClient {
        &self.inner.generation
    }
}

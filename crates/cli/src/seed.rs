//! The `seed` command: one-shot reference-data population.
//!
//! Reads the service-account credential JSON from `FIREBASE_SERVICE_ACCOUNT`
//! (the project id comes from it) and a pre-minted access token from
//! `FIRESTORE_ACCESS_TOKEN`, then runs the guarded atomic seed commit.
//! Exits non-zero on credential parse failure or write failure.

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use kasanje_storefront::catalog::{SeedOutcome, seed_reference_data};
use kasanje_storefront::firestore::{FirestoreClient, FirestoreError};

/// Environment variable holding the service-account credential JSON.
const SERVICE_ACCOUNT_VAR: &str = "FIREBASE_SERVICE_ACCOUNT";

/// Environment variable holding the document store access token.
const ACCESS_TOKEN_VAR: &str = "FIRESTORE_ACCESS_TOKEN";

/// Errors from the seed command.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A required environment variable is absent.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// The service-account credential is not valid JSON of the expected shape.
    #[error("could not parse {SERVICE_ACCOUNT_VAR}: {0}")]
    InvalidCredential(#[from] serde_json::Error),

    /// The seed commit failed.
    #[error("seed write failed: {0}")]
    Firestore(#[from] FirestoreError),
}

/// The fields of a service-account credential this command needs.
#[derive(Debug, Deserialize)]
struct ServiceAccount {
    project_id: String,
    client_email: String,
}

/// Run the seed command.
///
/// # Errors
///
/// Returns [`SeedError`] if credentials are missing or malformed, or if the
/// commit fails for any reason other than the data already existing.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let raw_credential =
        std::env::var(SERVICE_ACCOUNT_VAR).map_err(|_| SeedError::MissingVar(SERVICE_ACCOUNT_VAR))?;
    let credential: ServiceAccount = serde_json::from_str(&raw_credential)?;

    let access_token = std::env::var(ACCESS_TOKEN_VAR)
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingVar(ACCESS_TOKEN_VAR))?;

    info!(
        project_id = %credential.project_id,
        client_email = %credential.client_email,
        "Seeding reference data"
    );

    let client = FirestoreClient::from_parts(&credential.project_id, &access_token);
    match seed_reference_data(&client).await? {
        SeedOutcome::Seeded => info!("Reference data seeded"),
        SeedOutcome::AlreadySeeded => info!("Reference data already seeded, nothing written"),
    }
    Ok(())
}

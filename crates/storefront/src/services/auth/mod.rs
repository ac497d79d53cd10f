//! Email/password authentication against the managed identity provider.
//!
//! Thin client over the provider's REST accounts API. Provider error codes
//! are surfaced raw to the user; this service adds no interpretation beyond
//! HTTP plumbing. The signed-in user lives in the session, not here.

mod error;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::config::FirebaseConfig;

pub use error::AuthError;
use error::ProviderErrorResponse;

const IDENTITY_API_HOST: &str = "https://identitytoolkit.googleapis.com/v1";

/// Session key under which the signed-in user is stored.
pub const USER_SESSION_KEY: &str = "auth_user";

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Provider-assigned account id.
    pub id: String,
    /// Account email address.
    pub email: String,
    /// Display name, if the user has set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL, if the user has set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Account response from the provider's sign-in/sign-up/update calls.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    id_token: String,
}

impl From<AccountResponse> for AuthUser {
    fn from(account: AccountResponse) -> Self {
        Self {
            id: account.local_id,
            email: account.email,
            display_name: account.display_name.filter(|name| !name.is_empty()),
            avatar_url: account.photo_url.filter(|url| !url.is_empty()),
        }
    }
}

// =============================================================================
// IdentityClient
// =============================================================================

/// Client for the identity provider's accounts REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    api_key: String,
}

impl IdentityClient {
    /// Create a new identity client.
    #[must_use]
    pub fn new(config: &FirebaseConfig) -> Self {
        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    async fn call(
        &self,
        operation: &str,
        body: serde_json::Value,
    ) -> Result<AccountResponse, AuthError> {
        let url = format!(
            "{IDENTITY_API_HOST}/accounts:{operation}?key={}",
            self.inner.api_key
        );

        let response = self.inner.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderErrorResponse>(&text)
                .map_or_else(|_| text.clone(), |envelope| envelope.error.message);
            return Err(AuthError::Provider(message));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] with the provider's raw error code on
    /// rejection (wrong password, unknown email, disabled account).
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let account = self
            .call(
                "signInWithPassword",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(account.into())
    }

    /// Create an account with email and password. If a display name is
    /// given, a profile update follows the sign-up.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] with the provider's raw error code on
    /// rejection (email already registered, weak password).
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthUser, AuthError> {
        let account = self
            .call(
                "signUp",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let Some(name) = display_name.filter(|name| !name.is_empty()) else {
            return Ok(account.into());
        };

        let updated = self
            .call(
                "update",
                json!({
                    "idToken": account.id_token,
                    "displayName": name,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_response_maps_to_user() {
        let json = r#"{
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "abc123",
            "email": "mary@example.com",
            "displayName": "Mary",
            "idToken": "tok",
            "registered": true
        }"#;

        let account: AccountResponse = serde_json::from_str(json).expect("deserialize");
        let user = AuthUser::from(account);
        assert_eq!(user.id, "abc123");
        assert_eq!(user.display_name.as_deref(), Some("Mary"));
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_empty_display_name_becomes_none() {
        let json = r#"{
            "localId": "abc123",
            "email": "mary@example.com",
            "displayName": "",
            "idToken": "tok"
        }"#;

        let account: AccountResponse = serde_json::from_str(json).expect("deserialize");
        assert!(AuthUser::from(account).display_name.is_none());
    }
}

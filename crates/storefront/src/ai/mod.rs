//! Generation API client for description and recommendation flows.
//!
//! Both flows are one-shot templated prompts against the `generateContent`
//! REST endpoint. Nothing is retried; failures surface to the route layer
//! where they become a generic user-facing error.

mod error;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::GenerationConfig;

pub use error::GenerationError;
use error::ApiErrorResponse;

const GENERATION_API_HOST: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

// =============================================================================
// GenerationClient
// =============================================================================

/// Client for the text generation API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct GenerationClient {
    inner: Arc<GenerationClientInner>,
}

struct GenerationClientInner {
    client: reqwest::Client,
    /// Full `generateContent` URL including the model and API key.
    endpoint: String,
}

impl GenerationClient {
    /// Create a new generation client.
    #[must_use]
    pub fn new(config: &GenerationConfig) -> Self {
        let endpoint = format!(
            "{GENERATION_API_HOST}/models/{}:generateContent?key={}",
            config.model,
            config.api_key.expose_secret()
        );

        Self {
            inner: Arc::new(GenerationClientInner {
                client: reqwest::Client::new(),
                endpoint,
            }),
        }
    }

    /// Send a single prompt and return the first candidate's text.
    async fn generate(&self, prompt: String) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let (api_status, message) = serde_json::from_str::<ApiErrorResponse>(&text)
                .map_or_else(
                    |_| (status.to_string(), text.clone()),
                    |envelope| (envelope.error.status, envelope.error.message),
                );
            return Err(GenerationError::Api {
                status: api_status,
                message,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|_| GenerationError::Empty)?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(GenerationError::Empty)
    }

    /// Generate a short marketing description for a product name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns no text.
    #[instrument(skip(self))]
    pub async fn generate_description(
        &self,
        product_name: &str,
    ) -> Result<String, GenerationError> {
        self.generate(description_prompt(product_name)).await
    }

    /// Recommend products from the catalog given a user's browsing history.
    ///
    /// The result is free text; no structured parsing is attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns no text.
    #[instrument(skip_all)]
    pub async fn recommend_products(
        &self,
        browsing_history: &str,
        product_catalog: &str,
    ) -> Result<String, GenerationError> {
        self.generate(recommendation_prompt(browsing_history, product_catalog))
            .await
    }
}

fn description_prompt(product_name: &str) -> String {
    format!(
        "You are a marketing expert for an online marketplace in Uganda.\n\
         \n\
         Your task is to write a compelling, concise, and appealing product \
         description for the following product.\n\
         The description should be no more than 2-3 sentences.\n\
         Focus on the key benefits and unique aspects. Use a friendly and \
         professional tone.\n\
         \n\
         Product Name: {product_name}\n\
         \n\
         Description:"
    )
}

fn recommendation_prompt(browsing_history: &str, product_catalog: &str) -> String {
    format!(
        "You are a product recommendation expert.\n\
         \n\
         Based on the user's browsing history and the available product \
         catalog, you will recommend a list of products that the user might \
         be interested in.\n\
         \n\
         Browsing History: {browsing_history}\n\
         Product Catalog: {product_catalog}\n\
         \n\
         Recommendations:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_prompt_embeds_name() {
        let prompt = description_prompt("Handwoven Basket");
        assert!(prompt.contains("Product Name: Handwoven Basket"));
        assert!(prompt.contains("marketplace in Uganda"));
    }

    #[test]
    fn test_recommendation_prompt_embeds_inputs() {
        let prompt = recommendation_prompt("baskets, mats", "Basket; Mat; Print");
        assert!(prompt.contains("Browsing History: baskets, mats"));
        assert!(prompt.contains("Product Catalog: Basket; Mat; Print"));
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "A lovely basket.  " }] } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).expect("deserialize");
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_string());
        assert_eq!(text.as_deref(), Some("A lovely basket."));
    }
}

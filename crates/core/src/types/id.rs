//! Document identifier newtype.
//!
//! The document store assigns opaque string identifiers (20-character
//! alphanumeric for auto-generated documents). Wrapping them keeps product
//! ids, seller ids, and other references from being mixed up with arbitrary
//! strings in handler code.

use serde::{Deserialize, Serialize};

/// Identifier of a document in the external document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create an ID from a raw string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_as_str() {
        let id = DocumentId::new("aBcD1234eFgH5678iJkL");
        assert_eq!(id.as_str(), "aBcD1234eFgH5678iJkL");
        assert_eq!(id.to_string(), "aBcD1234eFgH5678iJkL");
    }

    #[test]
    fn test_serde_transparent() {
        let id = DocumentId::new("abc123");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"abc123\"");

        let back: DocumentId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}

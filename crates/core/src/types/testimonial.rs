//! Customer and vendor testimonial entity.

use serde::{Deserialize, Serialize};

use super::{DocumentId, Rating};

/// A testimonial shown on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    /// Store-assigned document identifier, absent for unsaved fixtures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    /// Name of the person quoted.
    pub name: String,
    /// Their role, e.g. "Customer" or "Vendor - Handcrafts".
    pub title: String,
    /// The testimonial text.
    pub quote: String,
    /// Portrait image URL.
    pub image: String,
    /// Accessibility hint for the portrait.
    pub image_hint: String,
    /// Star rating given.
    pub rating: Rating,
}

//! Product category entity.

use serde::{Deserialize, Serialize};

use super::DocumentId;

/// A browsable product category.
///
/// The `name` is unique and is what products reference in their `category`
/// field - there is no foreign key by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Store-assigned document identifier, absent for unsaved fixtures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    /// Unique display name.
    pub name: String,
    /// Short description shown on category cards.
    pub description: String,
    /// Category image URL.
    pub image: String,
    /// Accessibility hint for the image.
    pub image_hint: String,
}

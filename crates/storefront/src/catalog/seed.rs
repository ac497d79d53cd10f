//! Reference-data seeding for categories and testimonials.
//!
//! Seeding is a single atomic commit guarded by a marker document written
//! with an `exists: false` precondition. If the marker already exists the
//! whole commit fails with a conflict and no fixture is written, so
//! concurrent or repeated runs can never produce duplicate rows.

use chrono::Utc;
use tracing::{info, instrument};

use crate::firestore::{
    DocumentWrite, Fields, FirestoreClient, FirestoreError, Precondition, Write,
    random_document_id, value,
};

use super::{CATEGORIES_COLLECTION, TESTIMONIALS_COLLECTION};

/// Collection holding operational markers such as the seed guard.
const META_COLLECTION: &str = "meta";

/// Marker document id; its existence means reference data has been seeded.
const SEED_MARKER_ID: &str = "reference-seed";

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// All fixtures were written in one commit.
    Seeded,
    /// The marker document already existed; nothing was written.
    AlreadySeeded,
}

struct CategoryFixture {
    name: &'static str,
    description: &'static str,
    image_hint: &'static str,
}

struct TestimonialFixture {
    name: &'static str,
    title: &'static str,
    quote: &'static str,
    image_hint: &'static str,
    rating: f64,
}

const CATEGORY_IMAGE: &str = "https://placehold.co/400x400.png";
const TESTIMONIAL_IMAGE: &str = "https://placehold.co/100x100.png";

const CATEGORY_FIXTURES: [CategoryFixture; 5] = [
    CategoryFixture {
        name: "Handmade Crafts",
        description: "Unique artisan creations",
        image_hint: "handmade crafts",
    },
    CategoryFixture {
        name: "Fresh Produce",
        description: "Farm-fresh fruits and vegetables",
        image_hint: "fresh vegetables",
    },
    CategoryFixture {
        name: "Art & Prints",
        description: "Local artwork and designs",
        image_hint: "art prints",
    },
    CategoryFixture {
        name: "Clothing & Accessories",
        description: "Handcrafted wearable items",
        image_hint: "clothing accessories",
    },
    CategoryFixture {
        name: "Workshops & Services",
        description: "Local skills and services",
        image_hint: "people workshop",
    },
];

const TESTIMONIAL_FIXTURES: [TestimonialFixture; 3] = [
    TestimonialFixture {
        name: "Sarah Njeri",
        title: "Customer",
        quote: "Kasanje.shop has connected me with amazing local artisans. I love \
                supporting my community while finding unique products that I can't \
                get anywhere else.",
        image_hint: "woman smiling",
        rating: 5.0,
    },
    TestimonialFixture {
        name: "Mary Wambui",
        title: "Vendor - Handcrafts",
        quote: "As a seller, this marketplace has helped me reach customers I never \
                could before. The platform is easy to use and the community support \
                is incredible.",
        image_hint: "woman portrait",
        rating: 5.0,
    },
    TestimonialFixture {
        name: "John Kamau",
        title: "Vendor - Fresh Produce",
        quote: "I've been able to grow my small farm business thanks to Kasanje.shop. \
                Now I can sell my fresh produce directly to customers who appreciate \
                quality local food.",
        image_hint: "man smiling",
        rating: 4.5,
    },
];

fn category_fields(fixture: &CategoryFixture) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), value::string(fixture.name));
    fields.insert("description".to_string(), value::string(fixture.description));
    fields.insert("image".to_string(), value::string(CATEGORY_IMAGE));
    fields.insert("imageHint".to_string(), value::string(fixture.image_hint));
    fields
}

fn testimonial_fields(fixture: &TestimonialFixture) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), value::string(fixture.name));
    fields.insert("title".to_string(), value::string(fixture.title));
    fields.insert("quote".to_string(), value::string(fixture.quote));
    fields.insert("image".to_string(), value::string(TESTIMONIAL_IMAGE));
    fields.insert("imageHint".to_string(), value::string(fixture.image_hint));
    fields.insert("rating".to_string(), value::double(fixture.rating));
    fields
}

fn insert(name: String, fields: Fields) -> Write {
    Write {
        update: DocumentWrite { name, fields },
        current_document: Some(Precondition { exists: false }),
    }
}

/// Build the full set of seed writes: the guard marker plus every fixture,
/// all conditioned on non-existence.
#[must_use]
pub fn seed_writes(client: &FirestoreClient) -> Vec<Write> {
    let mut marker_fields = Fields::new();
    marker_fields.insert("seededAt".to_string(), value::timestamp(&Utc::now()));

    let mut writes = vec![insert(
        client.document_name(META_COLLECTION, SEED_MARKER_ID),
        marker_fields,
    )];

    for fixture in &CATEGORY_FIXTURES {
        writes.push(insert(
            client.document_name(CATEGORIES_COLLECTION, &random_document_id()),
            category_fields(fixture),
        ));
    }
    for fixture in &TESTIMONIAL_FIXTURES {
        writes.push(insert(
            client.document_name(TESTIMONIALS_COLLECTION, &random_document_id()),
            testimonial_fields(fixture),
        ));
    }

    writes
}

/// Seed categories and testimonials if they have not been seeded yet.
///
/// # Errors
///
/// Returns [`FirestoreError`] if the commit fails for any reason other
/// than the marker already existing.
#[instrument(skip(client))]
pub async fn seed_reference_data(
    client: &FirestoreClient,
) -> Result<SeedOutcome, FirestoreError> {
    let writes = seed_writes(client);
    let count = writes.len();

    match client.commit(writes).await {
        Ok(()) => {
            info!(writes = count, "Seeded reference data");
            Ok(SeedOutcome::Seeded)
        }
        Err(err) if err.is_conflict() => {
            info!("Reference data already seeded, skipping");
            Ok(SeedOutcome::AlreadySeeded)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirebaseConfig;
    use secrecy::SecretString;

    fn client() -> FirestoreClient {
        FirestoreClient::new(&FirebaseConfig {
            project_id: "kasanje-test".to_string(),
            api_key: "test-api-key".to_string(),
            access_token: SecretString::from("test-token"),
        })
    }

    #[test]
    fn test_seed_is_one_marker_plus_eight_fixtures() {
        let writes = seed_writes(&client());
        assert_eq!(writes.len(), 9);
    }

    #[test]
    fn test_every_write_is_guarded_insert() {
        for write in seed_writes(&client()) {
            assert_eq!(
                write.current_document.as_ref().map(|p| p.exists),
                Some(false)
            );
        }
    }

    #[test]
    fn test_marker_write_comes_first() {
        let writes = seed_writes(&client());
        let first = writes.first().expect("non-empty");
        assert!(first.update.name.ends_with("/meta/reference-seed"));
    }

    #[test]
    fn test_fixture_collections_and_counts() {
        let writes = seed_writes(&client());
        let categories = writes
            .iter()
            .filter(|w| w.update.name.contains("/categories/"))
            .count();
        let testimonials = writes
            .iter()
            .filter(|w| w.update.name.contains("/testimonials/"))
            .count();
        assert_eq!(categories, 5);
        assert_eq!(testimonials, 3);
    }

    #[test]
    fn test_testimonial_fields_shape() {
        let fields = testimonial_fields(&TESTIMONIAL_FIXTURES[2]);
        assert_eq!(
            fields.get("name").and_then(value::as_str),
            Some("John Kamau")
        );
        assert_eq!(fields.get("rating").and_then(value::as_f64), Some(4.5));
        assert_eq!(
            fields.get("image").and_then(value::as_str),
            Some(TESTIMONIAL_IMAGE)
        );
    }
}

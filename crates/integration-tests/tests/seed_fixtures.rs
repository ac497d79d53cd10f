//! Seed commit structure and fixture content.
//!
//! Seeding must be a single guarded atomic commit: one marker document plus
//! the 5 category and 3 testimonial fixtures, every write conditioned on
//! non-existence so a repeat run inserts nothing.

use secrecy::SecretString;

use kasanje_storefront::catalog::seed::seed_writes;
use kasanje_storefront::firestore::{FirestoreClient, Write, value};

fn client() -> FirestoreClient {
    FirestoreClient::from_parts("kasanje-test", &SecretString::from("test-token"))
}

fn writes_in<'a>(writes: &'a [Write], collection: &str) -> Vec<&'a Write> {
    let segment = format!("/{collection}/");
    writes
        .iter()
        .filter(|write| write.update.name.contains(&segment))
        .collect()
}

#[test]
fn test_commit_holds_marker_plus_all_fixtures() {
    let writes = seed_writes(&client());

    assert_eq!(writes.len(), 9);
    assert_eq!(writes_in(&writes, "meta").len(), 1);
    assert_eq!(writes_in(&writes, "categories").len(), 5);
    assert_eq!(writes_in(&writes, "testimonials").len(), 3);
}

#[test]
fn test_every_write_has_exists_false_precondition() {
    for write in seed_writes(&client()) {
        let precondition = write
            .current_document
            .as_ref()
            .expect("every seed write is guarded");
        assert!(!precondition.exists);
    }
}

#[test]
fn test_category_fixtures_match_reference_content() {
    let writes = seed_writes(&client());
    let categories = writes_in(&writes, "categories");

    let names: Vec<&str> = categories
        .iter()
        .filter_map(|write| write.update.fields.get("name").and_then(value::as_str))
        .collect();
    assert_eq!(
        names,
        vec![
            "Handmade Crafts",
            "Fresh Produce",
            "Art & Prints",
            "Clothing & Accessories",
            "Workshops & Services",
        ]
    );

    for write in &categories {
        assert_eq!(
            write.update.fields.get("image").and_then(value::as_str),
            Some("https://placehold.co/400x400.png")
        );
        assert!(write.update.fields.contains_key("description"));
        assert!(write.update.fields.contains_key("imageHint"));
    }
}

#[test]
fn test_testimonial_fixtures_match_reference_content() {
    let writes = seed_writes(&client());
    let testimonials = writes_in(&writes, "testimonials");

    let names: Vec<&str> = testimonials
        .iter()
        .filter_map(|write| write.update.fields.get("name").and_then(value::as_str))
        .collect();
    assert_eq!(names, vec!["Sarah Njeri", "Mary Wambui", "John Kamau"]);

    let ratings: Vec<f64> = testimonials
        .iter()
        .filter_map(|write| write.update.fields.get("rating").and_then(value::as_f64))
        .collect();
    assert_eq!(ratings, vec![5.0, 5.0, 4.5]);
}

#[test]
fn test_fixture_document_ids_are_store_style() {
    // 20-char alphanumeric ids, distinct per write
    let writes = seed_writes(&client());
    let categories = writes_in(&writes, "categories");
    let testimonials = writes_in(&writes, "testimonials");
    let mut ids: Vec<&str> = categories
        .iter()
        .chain(testimonials.iter())
        .filter_map(|write| write.update.name.rsplit('/').next())
        .collect();

    for id in &ids {
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(char::is_alphanumeric));
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

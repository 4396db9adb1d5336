// Builder tests: identifier determinism across runs.

use crate::common::StaticEmbedder;
use tessera::core::ingest::{filename_to_id, SectionBuilder};
use tessera::core::types::Section;

fn sections() -> Vec<Section> {
    (0..3)
        .map(|i| Section {
            text: format!("Section number {i}."),
            start_offset: i * 10,
            end_offset: i * 10 + 18,
            page: i / 2,
        })
        .collect()
}

async fn build_ids(filename: &str) -> Vec<String> {
    let embedder = StaticEmbedder::new();
    let mut builder = SectionBuilder::new(filename, "soccer", &embedder, 15);

    let mut ids = Vec::new();
    for section in sections() {
        ids.push(builder.build(section).await.unwrap().id);
    }
    ids
}

#[tokio::test]
async fn test_ids_are_idempotent_across_runs() {
    let first = build_ids("rules.pdf").await;
    let second = build_ids("rules.pdf").await;

    assert_eq!(first, second);
    assert_eq!(first[0], "file-rules_pdf-72756C65732E706466-page-0");
    assert_eq!(first[2], "file-rules_pdf-72756C65732E706466-page-2");
}

#[tokio::test]
async fn test_ids_are_unique_within_a_run() {
    let ids = build_ids("rules.pdf").await;

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[tokio::test]
async fn test_sanitization_collisions_stay_distinct() {
    // Both filenames sanitize to "a_b"; the hex suffix keeps their
    // section ids distinct.
    let dotted = build_ids("a.b").await;
    let underscored = build_ids("a_b").await;

    assert_ne!(dotted[0], underscored[0]);
    assert_eq!(filename_to_id("a.b"), "file-a_b-612E62");
    assert_eq!(filename_to_id("a_b"), "file-a_b-615F62");
}

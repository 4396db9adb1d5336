// Coverage tests: every character of the document is covered by
// some section, except a bounded tail shorter than the overlap.

use crate::common::{assert_gap_free, page_map_from, scenario_two_pages, sentence_blocks};
use tessera::core::ingest::Sectionizer;
use tessera::core::types::Section;

#[test]
fn test_regular_text_fully_covered() {
    let text = sentence_blocks(60, 'b');
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    assert_gap_free(&sections, 3000, 100);
    assert_eq!(sections.last().unwrap().end_offset, 3000);
}

#[test]
fn test_two_page_scenario_fully_covered() {
    let map = scenario_two_pages();
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    assert_gap_free(&sections, 2500, 100);
    assert_eq!(sections.last().unwrap().end_offset, 2500);
}

#[test]
fn test_unbroken_text_fully_covered() {
    // No sentence endings, no word breaks: coverage must still hold
    // from the window arithmetic alone.
    let text = "\u{4E2D}".repeat(1200);
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    assert_gap_free(&sections, 1200, 100);
}

#[test]
fn test_document_between_overlap_and_window_single_section() {
    let text = "a".repeat(150);
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].start_offset, 0);
    assert_eq!(sections[0].end_offset, 150);
}

#[test]
fn test_document_shorter_than_overlap_is_dropped() {
    // Accepted lossy tail behavior: a fragment shorter than the
    // overlap window yields nothing.
    let text = "a".repeat(99);
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    assert_eq!(sectionizer.sections(&map).count(), 0);
}

#[test]
fn test_empty_document_yields_nothing() {
    let map = page_map_from(&[]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    assert_eq!(sectionizer.sections(&map).count(), 0);
}

#[test]
fn test_sections_attribute_pages_by_start_offset() {
    let map = scenario_two_pages();
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    for section in &sections {
        assert_eq!(section.page, map.page_of(section.start_offset));
    }
    assert_eq!(sections.first().unwrap().page, 0);
    assert_eq!(sections.last().unwrap().page, 1);
}

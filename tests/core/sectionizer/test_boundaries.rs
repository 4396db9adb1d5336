// Boundary search tests: sentence preference, word-break fallback,
// overlap width and determinism.

use crate::common::{page_map_from, scenario_two_pages, sentence_blocks};
use tessera::core::ingest::Sectionizer;
use tessera::core::types::Section;

#[test]
fn test_two_page_scenario_boundaries() {
    // 2500 chars, page 1 at 1250, sentence endings at 920 and 1020.
    let map = scenario_two_pages();
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    // First boundary lands just past the period at 1020
    assert_eq!(sections[0].start_offset, 0);
    assert_eq!(sections[0].end_offset, 1021);
    assert!(sections[0].text.ends_with('.'));

    // Second start falls within one overlap of the first end
    assert!(sections[1].start_offset >= 1021 - 100);
    assert!(sections[1].start_offset <= 1021);
    assert_eq!(sections[1].start_offset, 921);
}

#[test]
fn test_sentence_boundaries_preferred_in_regular_text() {
    // Sixty 50-char sentences: every boundary should land just past
    // a period, and every overlap should be exactly the configured
    // width.
    let text = sentence_blocks(60, 'b');
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    assert_eq!(sections.len(), 4);
    for section in &sections[..sections.len() - 1] {
        assert!(
            section.text.ends_with('.'),
            "boundary at {} does not follow a sentence end",
            section.end_offset
        );
    }

    for pair in sections.windows(2) {
        assert_eq!(pair[0].end_offset - pair[1].start_offset, 100);
    }
}

#[test]
fn test_word_break_fallback_never_splits_words() {
    // Ten-character words, no sentence endings anywhere: boundaries
    // must come from word breaks, never from inside a word.
    let text = "wwwwwwwww ".repeat(30);
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(100, 20, 10);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();
    let chars: Vec<char> = text.chars().collect();

    assert!(sections.len() > 1);
    for section in &sections {
        if section.start_offset > 0 {
            assert_eq!(chars[section.start_offset - 1], ' ');
        }
        if section.end_offset < chars.len() {
            assert_eq!(chars[section.end_offset - 1], ' ');
        }
    }
}

#[test]
fn test_identical_input_yields_identical_sections() {
    let map = scenario_two_pages();
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let first: Vec<Section> = sectionizer.sections(&map).collect();
    let second: Vec<Section> = sectionizer.sections(&map).collect();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.text, b.text);
        assert_eq!(a.start_offset, b.start_offset);
        assert_eq!(a.end_offset, b.end_offset);
        assert_eq!(a.page, b.page);
    }
}

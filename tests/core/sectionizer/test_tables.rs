// Table continuity tests: an HTML table straddling a section
// boundary is re-emitted whole in the following section.

use crate::common::{page_map_from, sentence_blocks};
use tessera::core::ingest::Sectionizer;
use tessera::core::types::Section;

/// Text with a table positioned to straddle the default boundary:
/// 300 chars of sentences, then a table spanning offsets 300..1195,
/// then more sentences.
fn straddling_table_text() -> (String, String) {
    let mut text = sentence_blocks(6, 'b'); // 0-299
    let mut table = String::from("<table>");
    table.push_str(&"<tr><td>data</td></tr>".repeat(40));
    table.push_str("</table>");
    text.push_str(&table); // 300-1194
    text.push_str(&sentence_blocks(8, 'c')); // 1195-1594
    (text, table)
}

#[test]
fn test_straddled_table_is_reemitted_whole() {
    let (text, table) = straddling_table_text();
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    // The first section cuts into the table
    assert!(sections[0].text.contains("<table>"));
    assert!(!sections[0].text.contains("</table>"));

    // The next section starts at the table opening and carries the
    // complete table
    assert_eq!(sections[1].start_offset, 300);
    assert!(sections[1].text.contains(&table));
}

#[test]
fn test_table_pull_back_widens_overlap() {
    let (text, _table) = straddling_table_text();
    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    let widened = sections[0].end_offset - sections[1].start_offset;
    assert!(widened >= sectionizer.section_overlap());
}

#[test]
fn test_closed_table_does_not_pull_back() {
    // Table fits inside the first window, so the next start is the
    // plain overlap step.
    let mut text = sentence_blocks(6, 'b'); // 0-299
    text.push_str("<table><tr><td>data</td></tr></table>"); // 300-337
    text.push_str(&sentence_blocks(20, 'c')); // 338-1337

    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    assert!(sections[0].text.contains("</table>"));
    // No pull-back: consecutive starts keep the configured overlap
    assert!(sections[0].end_offset - sections[1].start_offset <= 2 * 100 + 2);
}

#[test]
fn test_table_longer_than_window_terminates() {
    // A table longer than the section window, opening at offset 0:
    // openings inside 2x the search limit are ignored, so the
    // stream keeps stepping forward instead of looping on the same
    // table.
    let mut text = String::from("<table>");
    text.push_str(&"<tr><td>data</td></tr>".repeat(200));
    text.push_str("</table>");

    let map = page_map_from(&[&text]);
    let sectionizer = Sectionizer::new(1000, 100, 100);

    let sections: Vec<Section> = sectionizer.sections(&map).collect();

    assert!(!sections.is_empty());
    assert!(sections.len() < 20);
    for pair in sections.windows(2) {
        assert!(pair[1].start_offset > pair[0].start_offset);
    }
}

//! Sentence-aware document sectioning.
//!
//! Splits concatenated page text into overlapping sections bounded
//! by a target length, preferring sentence boundaries, falling back
//! to word boundaries, and keeping embedded HTML tables intact
//! across section boundaries.
//!
//! All positions are **character** positions. Slicing goes through a
//! `char_indices()` table, so boundaries always fall on valid UTF-8
//! character boundaries and never panic on multi-byte input.
//!
//! # Example
//!
//! ```
//! use tessera::core::ingest::Sectionizer;
//! use tessera::core::types::{PageMap, PageText};
//!
//! let map = PageMap::new(vec![PageText {
//!     page_index: 0,
//!     start_offset: 0,
//!     text: "One sentence. Another sentence.".to_string(),
//! }]);
//!
//! let sectionizer = Sectionizer::new(1000, 100, 100);
//! for section in sectionizer.sections(&map) {
//!     assert!(!section.text.is_empty());
//!     assert!(section.start_offset < section.end_offset);
//! }
//! ```

use crate::core::types::{PageMap, Section};

/// Characters treated as ending a sentence
const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

/// Characters treated as a word break (safe fallback boundary)
const WORD_BREAKS: [char; 12] = [
    ',', ';', ':', ' ', '(', ')', '[', ']', '{', '}', '\t', '\n',
];

fn is_sentence_ending(c: char) -> bool {
    SENTENCE_ENDINGS.contains(&c)
}

fn is_word_break(c: char) -> bool {
    WORD_BREAKS.contains(&c)
}

/// Boundary-aware sectionizer.
///
/// Holds the windowing configuration; `sections()` produces the lazy
/// section stream for one document.
#[derive(Debug, Clone)]
pub struct Sectionizer {
    /// Target section size in characters
    max_section_length: usize,

    /// Max lookahead/lookback past the target size while searching
    /// for a sentence end
    sentence_search_limit: usize,

    /// Characters repeated between consecutive sections
    section_overlap: usize,
}

impl Sectionizer {
    /// Create a new sectionizer with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `max_section_length` is 0 or if
    /// `section_overlap >= max_section_length`.
    pub fn new(
        max_section_length: usize,
        sentence_search_limit: usize,
        section_overlap: usize,
    ) -> Self {
        assert!(max_section_length > 0, "max_section_length must be > 0");
        assert!(
            section_overlap < max_section_length,
            "section_overlap must be < max_section_length"
        );

        Self {
            max_section_length,
            sentence_search_limit,
            section_overlap,
        }
    }

    /// Get the target section size in characters.
    pub fn max_section_length(&self) -> usize {
        self.max_section_length
    }

    /// Get the sentence search limit in characters.
    pub fn sentence_search_limit(&self) -> usize {
        self.sentence_search_limit
    }

    /// Get the overlap size in characters.
    pub fn section_overlap(&self) -> usize {
        self.section_overlap
    }

    /// Produce the section stream for one document.
    ///
    /// The stream is lazy, finite and forward-only: it traverses a
    /// single mutable cursor and is meant to be consumed exactly
    /// once per invocation.
    pub fn sections<'a>(&self, page_map: &'a PageMap) -> SectionStream<'a> {
        let text = page_map.full_text();
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let end = chars.len();

        SectionStream {
            page_map,
            text,
            chars,
            max_section_length: self.max_section_length,
            sentence_search_limit: self.sentence_search_limit,
            section_overlap: self.section_overlap,
            start: 0,
            end,
            finished: false,
        }
    }
}

/// Lazy stream of sections over one document.
///
/// Explicit iterator state machine: `start` is the scan cursor,
/// `end` the most recently computed section end. The main loop runs
/// while `start + section_overlap < len`; afterwards a leftover span
/// wider than the overlap is emitted as one trailing section. A
/// document shorter than the overlap therefore yields no sections at
/// all — accepted lossy behavior at the tail, kept for determinism
/// against existing indexes.
pub struct SectionStream<'a> {
    page_map: &'a PageMap,
    text: &'a str,
    /// (byte offset, char) per character position
    chars: Vec<(usize, char)>,
    max_section_length: usize,
    sentence_search_limit: usize,
    section_overlap: usize,
    start: usize,
    end: usize,
    finished: bool,
}

impl<'a> SectionStream<'a> {
    fn char_at(&self, pos: usize) -> char {
        self.chars[pos].1
    }

    /// Byte offset of a character position (text length for the
    /// one-past-the-end position)
    fn byte_at(&self, pos: usize) -> usize {
        if pos < self.chars.len() {
            self.chars[pos].0
        } else {
            self.text.len()
        }
    }

    fn make_section(&self, start: usize, end: usize) -> Section {
        let text = &self.text[self.byte_at(start)..self.byte_at(end)];
        Section {
            text: text.to_string(),
            start_offset: start,
            end_offset: end,
            page: self.page_map.page_of(start),
        }
    }

    /// Produce the next section and advance the cursor.
    fn advance(&mut self) -> Section {
        let len = self.chars.len();
        let mut start = self.start;
        let mut end = start + self.max_section_length;

        if end > len {
            end = len;
        } else {
            // Try to find the end of the sentence
            let mut last_word: Option<usize> = None;
            while end < len
                && end - start - self.max_section_length < self.sentence_search_limit
                && !is_sentence_ending(self.char_at(end))
            {
                if is_word_break(self.char_at(end)) {
                    last_word = Some(end);
                }
                end += 1;
            }
            if end < len && !is_sentence_ending(self.char_at(end)) {
                if let Some(word) = last_word {
                    // Fall back to at least keeping a whole word
                    end = word;
                }
            }
        }
        if end < len {
            end += 1;
        }

        // Try to find the start of the sentence, or at least a whole
        // word boundary
        let mut last_word: Option<usize> = None;
        while start > 0
            && start + self.max_section_length + 2 * self.sentence_search_limit > end
            && !is_sentence_ending(self.char_at(start))
        {
            if is_word_break(self.char_at(start)) {
                last_word = Some(start);
            }
            start -= 1;
        }
        if !is_sentence_ending(self.char_at(start)) {
            if let Some(word) = last_word {
                start = word;
            }
        }
        if start > 0 {
            start += 1;
        }

        let section = self.make_section(start, end);

        // A section ending inside an unclosed table pulls the next
        // start back to the table opening, so the table is re-emitted
        // whole. Openings within 2x the search limit are ignored:
        // honoring them would loop forever on tables longer than the
        // section length. The pull-back never precedes end - overlap.
        self.start = match unclosed_table_start(&section.text, self.sentence_search_limit) {
            Some(table_start) => (end - self.section_overlap).min(start + table_start),
            None => end - self.section_overlap,
        };
        self.end = end;

        section
    }
}

impl<'a> Iterator for SectionStream<'a> {
    type Item = Section;

    fn next(&mut self) -> Option<Section> {
        if self.finished {
            return None;
        }

        if self.start + self.section_overlap < self.chars.len() {
            return Some(self.advance());
        }

        self.finished = true;

        // Leftover span wider than the overlap: emit one trailing
        // section over [start, end)
        if self.start + self.section_overlap < self.end {
            return Some(self.make_section(self.start, self.end));
        }

        None
    }
}

/// Character position of the last table opening that has no matching
/// close tag in `text`, if it lies beyond `2 * sentence_search_limit`.
fn unclosed_table_start(text: &str, sentence_search_limit: usize) -> Option<usize> {
    let open = text.rfind("<table")?;
    if let Some(close) = text.rfind("</table") {
        if open < close {
            return None;
        }
    }

    let open_chars = text[..open].chars().count();
    if open_chars > 2 * sentence_search_limit {
        Some(open_chars)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PageText;

    fn single_page(text: &str) -> PageMap {
        PageMap::new(vec![PageText {
            page_index: 0,
            start_offset: 0,
            text: text.to_string(),
        }])
    }

    #[test]
    fn test_sectionizer_new() {
        let sectionizer = Sectionizer::new(1000, 100, 100);
        assert_eq!(sectionizer.max_section_length(), 1000);
        assert_eq!(sectionizer.sentence_search_limit(), 100);
        assert_eq!(sectionizer.section_overlap(), 100);
    }

    #[test]
    #[should_panic(expected = "max_section_length must be > 0")]
    fn test_sectionizer_zero_length_panics() {
        Sectionizer::new(0, 0, 0);
    }

    #[test]
    #[should_panic(expected = "section_overlap must be < max_section_length")]
    fn test_sectionizer_overlap_too_large_panics() {
        Sectionizer::new(100, 10, 100);
    }

    #[test]
    fn test_empty_document_yields_no_sections() {
        let sectionizer = Sectionizer::new(1000, 100, 100);
        let map = single_page("");
        assert_eq!(sectionizer.sections(&map).count(), 0);
    }

    #[test]
    fn test_document_shorter_than_overlap_yields_no_sections() {
        let sectionizer = Sectionizer::new(1000, 100, 100);
        let map = single_page(&"a".repeat(50));
        assert_eq!(sectionizer.sections(&map).count(), 0);
    }

    #[test]
    fn test_short_document_single_section() {
        let sectionizer = Sectionizer::new(1000, 100, 100);
        let text = "a".repeat(300);
        let map = single_page(&text);

        let sections: Vec<Section> = sectionizer.sections(&map).collect();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, text);
        assert_eq!(sections[0].start_offset, 0);
        assert_eq!(sections[0].end_offset, 300);
        assert_eq!(sections[0].page, 0);
    }

    #[test]
    fn test_sentence_boundary_preferred() {
        // Sentence ends at 90 and 104; the window lands at 100 and
        // the forward scan finds the period at 104.
        let mut text = String::new();
        text.push_str(&"a".repeat(90)); // 0-89
        text.push('.'); // 90
        text.push_str(&"a".repeat(9)); // 91-99
        text.push_str("bbbb"); // 100-103
        text.push('.'); // 104
        text.push(' '); // 105
        text.push_str(&"c".repeat(50)); // 106-155

        let sectionizer = Sectionizer::new(100, 20, 10);
        let map = single_page(&text);
        let sections: Vec<Section> = sectionizer.sections(&map).collect();

        assert_eq!(sections.len(), 2);
        // First boundary lands just past the period at 104
        assert_eq!(sections[0].end_offset, 105);
        assert!(sections[0].text.ends_with("bbbb."));
        // Second start scans back to just past the period at 90
        assert_eq!(sections[1].start_offset, 91);
        assert_eq!(sections[1].end_offset, 156);
    }

    #[test]
    fn test_word_break_fallback() {
        // No sentence endings anywhere; the only word break in the
        // search window is the space at 52.
        let mut text = String::new();
        text.push_str(&"a".repeat(52)); // 0-51
        text.push(' '); // 52
        text.push_str(&"b".repeat(20)); // 53-72

        let sectionizer = Sectionizer::new(50, 10, 5);
        let map = single_page(&text);
        let sections: Vec<Section> = sectionizer.sections(&map).collect();

        // First boundary falls back to the word break, one past it
        assert_eq!(sections[0].end_offset, 53);
        assert!(sections[0].text.ends_with(' '));
    }

    #[test]
    fn test_unclosed_table_pulls_next_start_back() {
        let mut text = String::new();
        text.push_str(&"a".repeat(48)); // 0-47
        text.push_str(". "); // 48-49
        text.push_str("<table>"); // 50-56
        text.push_str(&"<tr><td>xyzw</td></tr>".repeat(4)); // 57-144
        text.push_str("</table>"); // 145-152
        text.push_str(". "); // 153-154
        text.push_str(&"c".repeat(60)); // 155-214

        let sectionizer = Sectionizer::new(100, 10, 20);
        let map = single_page(&text);
        let sections: Vec<Section> = sectionizer.sections(&map).collect();

        assert_eq!(sections.len(), 3);

        // First section ends inside the table
        assert!(sections[0].text.contains("<table>"));
        assert!(!sections[0].text.contains("</table>"));

        // Next section is pulled back to re-include the whole table
        assert!(sections[1].start_offset <= 50);
        assert!(sections[1].text.contains("<table>"));
        assert!(sections[1].text.contains("</table>"));

        // Pull-back widens the overlap beyond the configured width
        let widened = sections[0].end_offset - sections[1].start_offset;
        assert!(widened >= sectionizer.section_overlap());
    }

    #[test]
    fn test_multibyte_boundaries_never_split_characters() {
        // 1200 CJK chars, no sentence endings: boundaries come from
        // the window arithmetic alone and must stay on char
        // boundaries.
        let text = "中".repeat(1200);
        let sectionizer = Sectionizer::new(1000, 100, 100);
        let map = single_page(&text);

        let sections: Vec<Section> = sectionizer.sections(&map).collect();

        assert!(!sections.is_empty());
        for section in &sections {
            assert!(!section.text.is_empty());
            assert!(section.text.chars().all(|c| c == '中'));
            assert_eq!(
                section.text.chars().count(),
                section.end_offset - section.start_offset
            );
        }
        // Full coverage of the document
        assert_eq!(sections[0].start_offset, 0);
        assert_eq!(sections.last().unwrap().end_offset, 1200);
    }

    #[test]
    fn test_deterministic_output() {
        let mut text = String::new();
        for i in 0..40 {
            text.push_str(&format!("Sentence number {i} with a bit of filler text. "));
        }
        let sectionizer = Sectionizer::new(200, 30, 40);
        let map = single_page(&text);

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

    #[test]
    fn test_page_attribution_uses_section_start() {
        let page0 = "a".repeat(150);
        let page1 = "b".repeat(150);
        let map = PageMap::new(vec![
            PageText {
                page_index: 0,
                start_offset: 0,
                text: page0,
            },
            PageText {
                page_index: 1,
                start_offset: 150,
                text: page1,
            },
        ]);

        let sectionizer = Sectionizer::new(100, 10, 20);
        let sections: Vec<Section> = sectionizer.sections(&map).collect();

        assert!(sections.len() >= 2);
        for section in &sections {
            assert_eq!(section.page, map.page_of(section.start_offset));
        }
        assert_eq!(sections[0].page, 0);
        assert_eq!(sections.last().unwrap().page, 1);
    }
}

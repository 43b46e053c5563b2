//! Fixed-size positional splitting with configurable overlap.

use super::{Document, Segment};
use crate::types::RagError;

/// Splits document text into fixed-size segments, left to right.
///
/// Splitting is purely positional: there is no awareness of sentence or
/// paragraph boundaries. Each segment holds at most `chunk_size` characters,
/// and the start of segment `i + 1` equals the end of segment `i` minus
/// `overlap`. The trailing segment may be shorter than `chunk_size`.
///
/// Boundaries are counted in `char`s, so multi-byte text never splits inside
/// a code point.
#[derive(Debug, Clone, Copy)]
pub struct CharacterSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl CharacterSplitter {
    /// Create a splitter with the given maximum segment length and overlap.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] unless `chunk_size >= 1` and
    /// `overlap < chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, RagError> {
        if chunk_size == 0 {
            return Err(RagError::config("chunk_size must be at least 1"));
        }
        if overlap >= chunk_size {
            return Err(RagError::config(format!(
                "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Maximum segment length in characters.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Overlap between neighbouring segments in characters.
    #[must_use]
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split a document into ordered segments covering its text.
    ///
    /// Empty text yields an empty sequence. Concatenating the segments with
    /// the overlap removed reproduces the original text exactly.
    #[must_use]
    pub fn split(&self, document: &Document) -> Vec<Segment> {
        let chars: Vec<char> = document.content.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.overlap;
        let mut segments = Vec::new();
        let mut start = 0usize;
        let mut index = 0usize;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let content: String = chars[start..end].iter().collect();
            segments.push(Segment::new(document.source.clone(), index, content));
            index += 1;
            if end == chars.len() {
                break;
            }
            start += step;
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(segments: &[Segment], overlap: usize) -> String {
        let mut out = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i == 0 {
                out.push_str(&segment.content);
            } else {
                out.extend(segment.content.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(matches!(
            CharacterSplitter::new(0, 0),
            Err(RagError::Config { .. })
        ));
    }

    #[test]
    fn rejects_overlap_not_smaller_than_chunk_size() {
        assert!(matches!(
            CharacterSplitter::new(10, 10),
            Err(RagError::Config { .. })
        ));
        assert!(matches!(
            CharacterSplitter::new(10, 11),
            Err(RagError::Config { .. })
        ));
    }

    #[test]
    fn empty_text_yields_no_segments() {
        let splitter = CharacterSplitter::new(100, 0).unwrap();
        let segments = splitter.split(&Document::new("doc", ""));
        assert!(segments.is_empty());
    }

    #[test]
    fn single_segment_when_text_fits() {
        let splitter = CharacterSplitter::new(1000, 0).unwrap();
        let segments = splitter.split(&Document::new("doc", "a short paragraph"));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "a short paragraph");
        assert_eq!(segments[0].index, 0);
    }

    #[test]
    fn trailing_segment_may_be_shorter() {
        let splitter = CharacterSplitter::new(4, 0).unwrap();
        let segments = splitter.split(&Document::new("doc", "abcdefghij"));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].content, "abcd");
        assert_eq!(segments[1].content, "efgh");
        assert_eq!(segments[2].content, "ij");
    }

    #[test]
    fn segments_are_ordered_by_index() {
        let splitter = CharacterSplitter::new(3, 0).unwrap();
        let segments = splitter.split(&Document::new("doc", "abcdefg"));
        let indices: Vec<usize> = segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn round_trip_without_overlap() {
        let text = "The quick brown fox jumps over the lazy dog, repeatedly.";
        let splitter = CharacterSplitter::new(7, 0).unwrap();
        let segments = splitter.split(&Document::new("doc", text));
        assert_eq!(reassemble(&segments, 0), text);
    }

    #[test]
    fn round_trip_with_overlap() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let splitter = CharacterSplitter::new(8, 3).unwrap();
        let segments = splitter.split(&Document::new("doc", text));

        // Neighbouring segments share exactly `overlap` characters.
        for pair in segments.windows(2) {
            let prev: Vec<char> = pair[0].content.chars().collect();
            let next: Vec<char> = pair[1].content.chars().collect();
            let tail: String = prev[prev.len() - 3..].iter().collect();
            let head: String = next[..3].iter().collect();
            assert_eq!(tail, head);
        }

        assert_eq!(reassemble(&segments, 3), text);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "héllo wörld with ünïcode tèxt";
        let splitter = CharacterSplitter::new(5, 2).unwrap();
        let segments = splitter.split(&Document::new("doc", text));
        for segment in &segments {
            assert!(segment.content.chars().count() <= 5);
        }
        assert_eq!(reassemble(&segments, 2), text);
    }
}

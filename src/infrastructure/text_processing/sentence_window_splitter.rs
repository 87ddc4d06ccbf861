use crate::application::ports::TextSplitter;
use crate::domain::Chunk;

/// Sliding-window splitter that prefers to cut after a sentence terminator.
pub struct SentenceWindowSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SentenceWindowSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }
}

impl TextSplitter for SentenceWindowSplitter {
    fn split(&self, text: &str) -> Vec<Chunk> {
        chunk_text(text, self.chunk_size, self.chunk_overlap)
    }
}

/// Splits `text` into overlapping chunks of at most `size` chars.
///
/// Text that already fits is returned untouched as a single chunk. Otherwise
/// each window that does not reach the end of the text is cut after the last
/// `.`, `!` or `?` followed by a space or newline, the result is trimmed and
/// empty chunks are dropped. The window then advances by the cut length minus
/// `overlap`, but never by less than half a window, so the loop terminates
/// for any overlap.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<Chunk> {
    let size = size.max(1);
    let chars: Vec<char> = text.chars().collect();
    let total_len = chars.len();

    if total_len <= size {
        return vec![Chunk::new(0, text.to_string(), 0)];
    }

    let min_advance = (size / 2).max(1);
    let mut chunks = Vec::new();
    let mut offset = 0;

    while offset < total_len {
        let end = (offset + size).min(total_len);
        let mut window = &chars[offset..end];

        if end < total_len {
            if let Some(cut) = sentence_boundary(window) {
                window = &window[..cut];
            }
        }

        let chunk_text: String = window.iter().collect();
        let trimmed = chunk_text.trim();
        if !trimmed.is_empty() {
            chunks.push(Chunk::new(chunks.len(), trimmed.to_string(), offset));
        }

        offset += window.len().saturating_sub(overlap).max(min_advance);
    }

    chunks
}

/// Length of `window` up to and including the last terminator and the
/// whitespace char after it.
fn sentence_boundary(window: &[char]) -> Option<usize> {
    (1..window.len())
        .rev()
        .find(|&i| matches!(window[i - 1], '.' | '!' | '?') && matches!(window[i], ' ' | '\n'))
        .map(|i| i + 1)
}

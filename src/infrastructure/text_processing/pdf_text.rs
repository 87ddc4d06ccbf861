use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SOFT_HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-[ \t]*\r?\n[ \t]*(\w)").unwrap());

/// Cleans text pulled out of a PDF page before it is chunked.
///
/// Compatibility forms (ligatures, full-width digits) are folded with NFKC
/// so the oracle sees the same spelling a reader does, words split by a
/// hyphenated line break are rejoined, and whitespace inside a line is
/// collapsed. Line breaks are kept; runs of blank lines become one.
pub fn normalize_pdf_text(raw: &str) -> String {
    let folded: String = raw.nfkc().collect();
    let joined = SOFT_HYPHEN_BREAK.replace_all(&folded, "$1$2");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for line in joined.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            if !lines.is_empty() {
                paragraphs.push(lines.join("\n"));
                lines.clear();
            }
            continue;
        }
        lines.push(words.join(" "));
    }
    if !lines.is_empty() {
        paragraphs.push(lines.join("\n"));
    }

    paragraphs.join("\n\n")
}

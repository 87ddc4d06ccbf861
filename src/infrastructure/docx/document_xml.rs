use std::sync::LazyLock;

use regex::Regex;

use crate::application::ports::{CodecError, RichTextCodec};
use crate::domain::{NodeId, NodeKind, RichTextTree};

use super::xml_entities::{escape_xml_text, unescape_xml};

const PARAGRAPH_TAG: &str = "w:p";
const TEXT_TAG: &str = "w:t";

static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--[\s\S]*?-->|<!\[CDATA\[[\s\S]*?\]\]>|<[^>]*>").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag<'a> {
    Open(&'a str),
    Close(&'a str),
    Empty(&'a str),
    Other,
}

fn classify(tag: &str) -> Tag<'_> {
    if tag.starts_with("<?") || tag.starts_with("<!") {
        return Tag::Other;
    }
    if let Some(rest) = tag.strip_prefix("</") {
        return Tag::Close(rest.trim_end_matches('>').trim());
    }

    let body = &tag[1..];
    let name_end = body
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(body.len());
    let name = &body[..name_end];
    if tag.ends_with("/>") {
        Tag::Empty(name)
    } else {
        Tag::Open(name)
    }
}

/// Codec for the WordprocessingML main document part.
///
/// `<w:p>` elements become paragraphs, the character data of each `<w:t>`
/// becomes a run, and every other byte of markup is kept as opaque nodes
/// exactly as it appeared in the source. Elements are not otherwise
/// interpreted, so tables, text boxes and fields all survive untouched
/// while the paragraphs nested inside them are still reached.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordDocumentCodec;

impl WordDocumentCodec {
    pub fn new() -> Self {
        Self
    }
}

impl RichTextCodec for WordDocumentCodec {
    fn decode(&self, content: &str) -> Result<RichTextTree, CodecError> {
        let mut builder = TreeBuilder::default();
        let mut cursor = 0;
        let mut text_start: Option<usize> = None;

        for m in MARKUP.find_iter(content) {
            let tag = m.as_str();

            if let Some(start) = text_start {
                if classify(tag) != Tag::Close(TEXT_TAG) {
                    return Err(CodecError::MalformedTree(format!(
                        "unexpected markup {} inside <{}> at byte {}",
                        tag,
                        TEXT_TAG,
                        m.start()
                    )));
                }
                builder.run(&content[start..m.start()])?;
                builder.opaque(tag);
                text_start = None;
                cursor = m.end();
                continue;
            }

            builder.opaque(&content[cursor..m.start()]);
            match classify(tag) {
                Tag::Open(PARAGRAPH_TAG) => builder.open_paragraph(tag)?,
                Tag::Empty(PARAGRAPH_TAG) => builder.empty_paragraph(tag)?,
                Tag::Close(PARAGRAPH_TAG) => builder.close_paragraph(tag, m.start())?,
                Tag::Open(TEXT_TAG) => {
                    builder.opaque(tag);
                    text_start = Some(m.end());
                }
                Tag::Close(TEXT_TAG) => {
                    return Err(CodecError::MalformedTree(format!(
                        "</{}> without opening tag at byte {}",
                        TEXT_TAG,
                        m.start()
                    )));
                }
                _ => builder.opaque(tag),
            }
            cursor = m.end();
        }

        if text_start.is_some() {
            return Err(CodecError::MalformedTree(format!(
                "unterminated <{}> element",
                TEXT_TAG
            )));
        }
        builder.opaque(&content[cursor..]);
        builder.finish()
    }

    fn encode(&self, tree: &RichTextTree) -> String {
        let mut out = String::new();
        for &root in tree.roots() {
            write_node(tree, root, &mut out);
        }
        out
    }
}

fn write_node(tree: &RichTextTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.node(id) else {
        return;
    };

    match &node.kind {
        NodeKind::Paragraph {
            open_tag,
            close_tag,
        } => {
            out.push_str(open_tag);
            for &child in node.children() {
                write_node(tree, child, out);
            }
            out.push_str(close_tag);
        }
        NodeKind::Run { text, source } => match source {
            Some(raw) => out.push_str(raw),
            None => out.push_str(&escape_xml_text(text)),
        },
        NodeKind::Opaque { markup } => out.push_str(markup),
    }
}

/// Accumulates adjacent markup into a single opaque node so the tree stays
/// proportional to the number of paragraphs and runs.
#[derive(Default)]
struct TreeBuilder {
    tree: RichTextTree,
    open_paragraphs: Vec<NodeId>,
    pending: String,
}

impl TreeBuilder {
    fn parent(&self) -> Option<NodeId> {
        self.open_paragraphs.last().copied()
    }

    fn opaque(&mut self, markup: &str) {
        self.pending.push_str(markup);
    }

    fn flush(&mut self) -> Result<(), CodecError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let markup = std::mem::take(&mut self.pending);
        self.tree
            .push_opaque(self.parent(), markup)
            .map(|_| ())
            .map_err(|e| CodecError::MalformedTree(e.to_string()))
    }

    fn run(&mut self, raw: &str) -> Result<(), CodecError> {
        self.flush()?;
        let kind = NodeKind::Run {
            text: unescape_xml(raw).into_owned(),
            source: Some(raw.to_string()),
        };
        self.tree
            .push(self.parent(), kind)
            .map(|_| ())
            .map_err(|e| CodecError::MalformedTree(e.to_string()))
    }

    fn open_paragraph(&mut self, tag: &str) -> Result<(), CodecError> {
        self.flush()?;
        let id = self
            .tree
            .push_paragraph(self.parent(), tag, "")
            .map_err(|e| CodecError::MalformedTree(e.to_string()))?;
        self.open_paragraphs.push(id);
        Ok(())
    }

    fn empty_paragraph(&mut self, tag: &str) -> Result<(), CodecError> {
        self.flush()?;
        self.tree
            .push_paragraph(self.parent(), tag, "")
            .map(|_| ())
            .map_err(|e| CodecError::MalformedTree(e.to_string()))
    }

    fn close_paragraph(&mut self, tag: &str, position: usize) -> Result<(), CodecError> {
        self.flush()?;
        let id = self.open_paragraphs.pop().ok_or_else(|| {
            CodecError::MalformedTree(format!(
                "</{}> without opening tag at byte {}",
                PARAGRAPH_TAG, position
            ))
        })?;
        self.tree.close_paragraph(id, tag);
        Ok(())
    }

    fn finish(mut self) -> Result<RichTextTree, CodecError> {
        self.flush()?;
        if !self.open_paragraphs.is_empty() {
            return Err(CodecError::MalformedTree(format!(
                "{} unclosed <{}> element(s)",
                self.open_paragraphs.len(),
                PARAGRAPH_TAG
            )));
        }
        Ok(self.tree)
    }
}

use crate::domain::{NodeId, NodeKind, PARAGRAPH_BREAK, RichTextTree, TextReference};

/// Flat logical text of a tree plus the runs that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub text: String,
    pub references: Vec<TextReference>,
}

impl Projection {
    /// The slice of projected text contributed by `reference`.
    pub fn slice(&self, reference: &TextReference) -> &str {
        &self.text[reference.range.clone()]
    }

    /// Finds the reference covering byte `offset` of the projected text.
    /// Paragraph markers belong to no run.
    pub fn reference_at(&self, offset: usize) -> Option<&TextReference> {
        let idx = self
            .references
            .partition_point(|r| r.range.end <= offset);
        self.references
            .get(idx)
            .filter(|r| r.range.start <= offset && offset < r.range.end)
    }
}

/// Walks `tree` depth-first in document order. Paragraphs contribute their
/// children followed by one break marker, runs contribute their text
/// verbatim and opaque nodes contribute nothing. Never mutates the tree.
pub fn project(tree: &RichTextTree) -> Projection {
    let mut projection = Projection::default();
    for &root in tree.roots() {
        visit(tree, root, &mut projection);
    }
    projection
}

fn visit(tree: &RichTextTree, id: NodeId, out: &mut Projection) {
    let Some(node) = tree.node(id) else {
        return;
    };

    match &node.kind {
        NodeKind::Paragraph { .. } => {
            for &child in node.children() {
                visit(tree, child, out);
            }
            out.text.push(PARAGRAPH_BREAK);
        }
        NodeKind::Run { text, .. } => {
            let start = out.text.len();
            out.text.push_str(text);
            out.references.push(TextReference {
                node: id,
                sequence_index: out.references.len(),
                range: start..out.text.len(),
            });
        }
        NodeKind::Opaque { .. } => {}
    }
}

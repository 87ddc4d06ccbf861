/// Marker appended to flat text after each paragraph's content.
pub const PARAGRAPH_BREAK: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Paragraph { open_tag: String, close_tag: String },
    /// `source` holds the serialized bytes the run was parsed from. It is
    /// dropped as soon as the text changes, so untouched runs serialize
    /// byte-for-byte.
    Run { text: String, source: Option<String> },
    Opaque { markup: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    children: Vec<NodeId>,
}

impl Node {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, NodeKind::Paragraph { .. })
    }

    pub fn is_run(&self) -> bool {
        matches!(self.kind, NodeKind::Run { .. })
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.kind, NodeKind::Opaque { .. })
    }
}

/// Ordered paragraph/run tree stored as an arena.
///
/// Nodes are addressed by [`NodeId`] and never removed, so ids handed out by
/// the projector stay valid for the lifetime of the tree. Only paragraphs
/// may own children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichTextTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not a paragraph and cannot own children")]
    NotAContainer(NodeId),
}

impl RichTextTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Allocates a node and attaches it under `parent`, or as a root when
    /// `parent` is `None`.
    pub fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Result<NodeId, TreeError> {
        if let Some(parent_id) = parent {
            let parent_node = self
                .nodes
                .get(parent_id.0)
                .ok_or(TreeError::UnknownNode(parent_id))?;
            if !parent_node.is_paragraph() {
                return Err(TreeError::NotAContainer(parent_id));
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });

        match parent {
            Some(parent_id) => self.nodes[parent_id.0].children.push(id),
            None => self.roots.push(id),
        }

        Ok(id)
    }

    pub fn push_paragraph(
        &mut self,
        parent: Option<NodeId>,
        open_tag: impl Into<String>,
        close_tag: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.push(
            parent,
            NodeKind::Paragraph {
                open_tag: open_tag.into(),
                close_tag: close_tag.into(),
            },
        )
    }

    pub fn push_run(
        &mut self,
        parent: Option<NodeId>,
        text: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.push(
            parent,
            NodeKind::Run {
                text: text.into(),
                source: None,
            },
        )
    }

    pub fn push_opaque(
        &mut self,
        parent: Option<NodeId>,
        markup: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.push(
            parent,
            NodeKind::Opaque {
                markup: markup.into(),
            },
        )
    }

    /// Sets the closing markup of a paragraph once its end has been seen.
    pub fn close_paragraph(&mut self, id: NodeId, tag: impl Into<String>) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Paragraph { close_tag, .. }) => {
                *close_tag = tag.into();
                true
            }
            _ => false,
        }
    }

    pub fn run_text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Run { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Replaces the text of a run. Returns `false` when `id` is not a run.
    pub fn set_run_text(&mut self, id: NodeId, new_text: String) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Run { text, source }) => {
                *text = new_text;
                *source = None;
                true
            }
            _ => false,
        }
    }

    /// Run texts in document order.
    pub fn run_texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            match &node.kind {
                NodeKind::Run { text, .. } => out.push(text.as_str()),
                NodeKind::Paragraph { .. } => stack.extend(node.children.iter().rev()),
                NodeKind::Opaque { .. } => {}
            }
        }
        out
    }

    pub fn count_paragraphs(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_paragraph()).count()
    }

    pub fn count_opaque(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_opaque()).count()
    }
}

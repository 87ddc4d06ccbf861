use crate::domain::RichTextTree;

/// Converts a package's main entry to and from the rich-text tree.
pub trait RichTextCodec: Send + Sync {
    fn decode(&self, content: &str) -> Result<RichTextTree, CodecError>;

    fn encode(&self, tree: &RichTextTree) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("malformed tree: {0}")]
    MalformedTree(String),
}

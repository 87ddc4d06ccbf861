use std::ops::Range;

use super::NodeId;

/// Ties a span of projected text to the run that produced it.
///
/// Valid only while the tree's structure is unchanged; run content may be
/// rewritten without invalidating the node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReference {
    pub node: NodeId,
    pub sequence_index: usize,
    /// Byte range in the projected text.
    pub range: Range<usize>,
}

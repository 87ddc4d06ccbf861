mod chunk;
mod document;
mod llm_provider;
mod pii;
mod progress;
mod replacement;
mod rich_text;
mod text_reference;

pub use chunk::Chunk;
pub use document::{ContentType, Document, DocumentId};
pub use llm_provider::LlmProvider;
pub use pii::PiiDetected;
pub use progress::{ProgressEvent, ProgressEventKind};
pub use replacement::Replacement;
pub use rich_text::{Node, NodeId, NodeKind, PARAGRAPH_BREAK, RichTextTree, TreeError};
pub use text_reference::TextReference;

use crate::domain::Chunk;

pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<Chunk>;
}

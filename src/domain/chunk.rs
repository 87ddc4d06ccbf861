/// A bounded slice of source text sized for one oracle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
    /// Char offset of the window start in the source text.
    pub offset: usize,
}

impl Chunk {
    pub fn new(index: usize, text: String, offset: usize) -> Self {
        Self {
            index,
            text,
            offset,
        }
    }
}

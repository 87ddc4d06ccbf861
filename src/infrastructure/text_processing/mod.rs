mod composite_file_loader;
mod docx_text_adapter;
mod pdf_adapter;
mod pdf_text;
mod plain_text_adapter;
mod sentence_window_splitter;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_text_adapter::DocxTextAdapter;
pub use pdf_adapter::PdfAdapter;
pub use pdf_text::normalize_pdf_text;
pub use plain_text_adapter::PlainTextAdapter;
pub use sentence_window_splitter::{SentenceWindowSplitter, chunk_text};

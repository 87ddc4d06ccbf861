pub mod docx;
pub mod llm;
pub mod observability;
pub mod progress;
pub mod text_processing;

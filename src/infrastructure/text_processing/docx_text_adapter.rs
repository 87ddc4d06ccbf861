use async_trait::async_trait;

use crate::application::ports::{DocumentPackage, FileLoader, FileLoaderError, RichTextCodec};
use crate::application::services::project;
use crate::domain::{ContentType, Document};
use crate::infrastructure::docx::{DocxPackage, WordDocumentCodec};

/// Extracts the projected text of a `.docx` main document: run texts in
/// document order with one newline after every paragraph.
pub struct DocxTextAdapter {
    codec: WordDocumentCodec,
}

impl DocxTextAdapter {
    pub fn new() -> Self {
        Self {
            codec: WordDocumentCodec::new(),
        }
    }
}

impl Default for DocxTextAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileLoader for DocxTextAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let package = DocxPackage::from_bytes(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
        let content = package
            .read_main_entry()
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
        let tree = self
            .codec
            .decode(&content)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;

        let projection = project(&tree);
        tracing::info!(
            runs = projection.references.len(),
            text_len = projection.text.len(),
            "DOCX text extraction complete"
        );

        if projection.text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(projection.text)
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::{DocxTextAdapter, PdfAdapter, PlainTextAdapter};

/// Dispatches extraction to the loader registered for the document's
/// content type.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Plain text, `.docx` and PDF loaders.
    pub fn with_defaults() -> Self {
        Self::new(vec![
            (ContentType::Text, Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>),
            (ContentType::Docx, Arc::new(DocxTextAdapter::new())),
            (ContentType::Pdf, Arc::new(PdfAdapter::new())),
        ])
    }

    pub fn supports(&self, content_type: ContentType) -> bool {
        self.adapters.contains_key(&content_type)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        tracing::debug!(
            content_type = document.content_type.as_mime(),
            size_bytes = document.size_bytes,
            received_at = %document.received_at.to_rfc3339(),
            "Extracting text"
        );
        adapter.extract_text(data, document).await
    }
}

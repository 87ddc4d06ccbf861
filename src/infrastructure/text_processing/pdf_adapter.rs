use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::pdf_text::normalize_pdf_text;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const PAGE_SEPARATOR: &str = "\n\n";

/// Extracts the text layer of a PDF, one block per page. Scanned pages
/// without a text layer contribute nothing; the result is read-only input
/// for text anonymization, never written back into the PDF.
pub struct PdfAdapter {
    timeout: Duration,
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking; run on the blocking pool.
fn read_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
    let mut pdf = PdfDocument::open(path)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;
    let page_count = pdf
        .page_count()
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}")))?;

    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        match pdf.extract_text(index) {
            Ok(raw) => {
                let text = normalize_pdf_text(&raw);
                if !text.is_empty() {
                    pages.push(text);
                }
            }
            Err(e) => tracing::warn!(page = index + 1, error = %e, "Skipping unreadable PDF page"),
        }
    }

    tracing::debug!(page_count, text_pages = pages.len(), "Read PDF pages");
    Ok(pages)
}

#[async_trait]
impl FileLoader for PdfAdapter {
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
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        // pdf_oxide parses from a path.
        let mut staged = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to stage PDF: {e}"))
        })?;
        staged
            .write_all(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to stage PDF: {e}")))?;
        let staged = staged.into_temp_path();
        let path = staged.to_path_buf();

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || read_pages(&path)),
        )
        .await
        .map_err(|_| {
            FileLoaderError::ExtractionFailed(format!(
                "PDF extraction timed out after {}s",
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("extraction task failed: {e}")))??;

        drop(staged);

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        let text = pages.join(PAGE_SEPARATOR);
        tracing::info!(
            pages = pages.len(),
            text_len = text.len(),
            "PDF text extraction complete"
        );
        Ok(text)
    }
}

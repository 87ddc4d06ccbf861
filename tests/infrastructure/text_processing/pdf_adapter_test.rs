#[path = "../../helpers/pdf_fixture.rs"]
mod pdf_fixture;

use std::time::Duration;

use redactor::application::ports::{FileLoader, FileLoaderError};
use redactor::domain::{ContentType, Document};
use redactor::infrastructure::text_processing::{CompositeFileLoader, PdfAdapter};

use pdf_fixture::build_pdf;

fn pdf_document(data: &[u8]) -> Document {
    Document::new("intake.pdf".to_string(), ContentType::Pdf, data.len() as u64)
}

#[tokio::test]
async fn given_pdf_with_text_layer_when_extracting_then_returns_page_text() {
    let data = build_pdf(&[&["Patient: Jane Doe", "City: Oslo"]]);

    let text = PdfAdapter::new()
        .extract_text(&data, &pdf_document(&data))
        .await
        .unwrap();

    assert!(text.contains("Jane Doe"), "got {:?}", text);
    assert!(text.contains("Oslo"), "got {:?}", text);
}

#[tokio::test]
async fn given_multi_page_pdf_when_extracting_then_keeps_page_order() {
    let data = build_pdf(&[&["First page Alice"], &["Second page Bob"]]);

    let text = PdfAdapter::new()
        .extract_text(&data, &pdf_document(&data))
        .await
        .unwrap();

    let alice = text.find("Alice").unwrap();
    let bob = text.find("Bob").unwrap();
    assert!(alice < bob);
}

#[tokio::test]
async fn given_pdf_without_text_when_extracting_then_fails_with_no_text_found() {
    let data = build_pdf(&[&[]]);

    let result = PdfAdapter::new()
        .extract_text(&data, &pdf_document(&data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(name)) if name == "intake.pdf"));
}

#[tokio::test]
async fn given_bytes_that_are_not_a_pdf_when_extracting_then_fails_extraction() {
    let data = b"plain bytes, no PDF header".to_vec();

    let result = PdfAdapter::with_timeout(Duration::from_secs(5))
        .extract_text(&data, &pdf_document(&data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_pdf_document_when_extracting_then_rejects_content_type() {
    let document = Document::new("a.txt".to_string(), ContentType::Text, 5);

    let result = PdfAdapter::new().extract_text(b"hello", &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(mime)) if mime == "text/plain"
    ));
}

#[tokio::test]
async fn given_pdf_when_extracting_through_composite_loader_then_dispatches_to_pdf_adapter() {
    let data = build_pdf(&[&["Invoice for John Smith"]]);

    let text = CompositeFileLoader::with_defaults()
        .extract_text(&data, &pdf_document(&data))
        .await
        .unwrap();

    assert!(text.contains("John Smith"), "got {:?}", text);
}

use redactor::application::ports::{FileLoader, FileLoaderError};
use redactor::domain::{ContentType, Document};
use redactor::infrastructure::text_processing::PlainTextAdapter;

fn text_document(size: usize) -> Document {
    Document::new("notes.txt".to_string(), ContentType::Text, size as u64)
}

#[tokio::test]
async fn given_utf8_bytes_when_extracting_then_returns_text() {
    let data = "Zażółć gęślą jaźń".as_bytes();

    let text = PlainTextAdapter
        .extract_text(data, &text_document(data.len()))
        .await
        .unwrap();

    assert_eq!(text, "Zażółć gęślą jaźń");
}

#[tokio::test]
async fn given_leading_bom_when_extracting_then_strips_it() {
    let data = "\u{feff}Hello".as_bytes();

    let text = PlainTextAdapter
        .extract_text(data, &text_document(data.len()))
        .await
        .unwrap();

    assert_eq!(text, "Hello");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_then_fails() {
    let data = [0xff, 0xfe, 0xfd];

    let result = PlainTextAdapter
        .extract_text(&data, &text_document(data.len()))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_docx_document_when_extracting_then_rejects_content_type() {
    let document = Document::new("a.docx".to_string(), ContentType::Docx, 0);

    let result = PlainTextAdapter.extract_text(b"", &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

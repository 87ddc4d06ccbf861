#[path = "../../helpers/docx_fixture.rs"]
mod docx_fixture;

use redactor::application::ports::{CodecError, RichTextCodec};
use redactor::application::services::{apply_replacements, project};
use redactor::domain::{NodeKind, Replacement};
use redactor::infrastructure::docx::WordDocumentCodec;

use docx_fixture::{document_xml, paragraph};

#[test]
fn given_document_when_decoding_and_encoding_then_output_is_byte_identical() {
    let xml = document_xml(&format!(
        "{}{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>",
        paragraph(&["Contact ", "John &amp; Jane", " &lt;team&gt;"]),
        r#"<w:p w:rsidR="00A1"/>"#,
        paragraph(&["In a &#x41;table"])
    ));
    let codec = WordDocumentCodec::new();

    let tree = codec.decode(&xml).unwrap();

    assert_eq!(codec.encode(&tree), xml);
}

#[test]
fn given_document_when_decoding_then_projects_unescaped_run_text() {
    let xml = document_xml(&format!(
        "{}{}",
        paragraph(&["Tom &amp; ", "Jerry"]),
        paragraph(&["&#169; 2024"])
    ));

    let tree = WordDocumentCodec::new().decode(&xml).unwrap();

    assert_eq!(project(&tree).text, "Tom & Jerry\n© 2024\n");
    assert_eq!(tree.count_paragraphs(), 2);
}

#[test]
fn given_table_paragraphs_when_decoding_then_nested_paragraphs_are_reached() {
    let xml = document_xml(&format!(
        "<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>",
        paragraph(&["Cell one"]),
        paragraph(&["Cell two"])
    ));

    let tree = WordDocumentCodec::new().decode(&xml).unwrap();

    assert_eq!(tree.run_texts(), vec!["Cell one", "Cell two"]);
}

#[test]
fn given_changed_run_with_special_chars_when_encoding_then_escapes_text() {
    let xml = document_xml(&paragraph(&["Acme", " Ltd"]));
    let codec = WordDocumentCodec::new();
    let mut tree = codec.decode(&xml).unwrap();

    apply_replacements(&mut tree, &[Replacement::new("Acme", "<ORG & CO>")]);

    assert_eq!(
        codec.encode(&tree),
        document_xml(&paragraph(&["&lt;ORG &amp; CO&gt;", " Ltd"]))
    );
}

#[test]
fn given_untouched_run_with_entities_when_encoding_then_keeps_original_escaping() {
    let xml = document_xml(&paragraph(&["Don&apos;t &#x2014; change"]));
    let codec = WordDocumentCodec::new();

    let tree = codec.decode(&xml).unwrap();
    let run = tree
        .iter()
        .find_map(|(_, node)| match &node.kind {
            NodeKind::Run { text, source } => Some((text.clone(), source.clone())),
            _ => None,
        })
        .unwrap();

    assert_eq!(run.0, "Don't \u{2014} change");
    assert_eq!(run.1.as_deref(), Some("Don&apos;t &#x2014; change"));
    assert_eq!(codec.encode(&tree), xml);
}

#[test]
fn given_markup_inside_text_element_when_decoding_then_fails_with_malformed_tree() {
    let xml = document_xml("<w:p><w:r><w:t>broken<w:br/></w:t></w:r></w:p>");

    let result = WordDocumentCodec::new().decode(&xml);

    assert!(matches!(result, Err(CodecError::MalformedTree(_))));
}

#[test]
fn given_unclosed_paragraph_when_decoding_then_fails_with_malformed_tree() {
    let xml = document_xml("<w:p><w:r><w:t>open</w:t></w:r>");

    let result = WordDocumentCodec::new().decode(&xml);

    assert!(matches!(result, Err(CodecError::MalformedTree(_))));
}

#[test]
fn given_stray_paragraph_close_when_decoding_then_fails_with_malformed_tree() {
    let xml = document_xml("</w:p>");

    let result = WordDocumentCodec::new().decode(&xml);

    assert!(matches!(result, Err(CodecError::MalformedTree(_))));
}

#[test]
fn given_empty_text_element_when_decoding_then_creates_empty_run() {
    let xml = document_xml(r#"<w:p><w:r><w:t></w:t></w:r><w:r><w:t xml:space="preserve"> </w:t></w:r></w:p>"#);
    let codec = WordDocumentCodec::new();

    let tree = codec.decode(&xml).unwrap();

    assert_eq!(tree.run_texts(), vec!["", " "]);
    assert_eq!(codec.encode(&tree), xml);
}

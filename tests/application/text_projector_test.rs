use redactor::application::services::project;
use redactor::domain::{PARAGRAPH_BREAK, RichTextTree};

fn letter() -> RichTextTree {
    let mut tree = RichTextTree::new();
    tree.push_opaque(None, "<w:body>").unwrap();
    let first = tree.push_paragraph(None, "<w:p>", "</w:p>").unwrap();
    tree.push_opaque(Some(first), "<w:pPr/>").unwrap();
    tree.push_run(Some(first), "Dear ").unwrap();
    tree.push_run(Some(first), "Anna Nowak").unwrap();
    tree.push_run(Some(first), ",").unwrap();
    let second = tree.push_paragraph(None, "<w:p>", "</w:p>").unwrap();
    tree.push_run(Some(second), "Regards").unwrap();
    tree.push_paragraph(None, "<w:p/>", "").unwrap();
    tree.push_opaque(None, "</w:body>").unwrap();
    tree
}

#[test]
fn given_tree_when_projecting_then_appends_break_after_each_paragraph() {
    let tree = letter();

    let projection = project(&tree);

    assert_eq!(projection.text, "Dear Anna Nowak,\nRegards\n\n");
    assert_eq!(
        projection.text.matches(PARAGRAPH_BREAK).count(),
        tree.count_paragraphs()
    );
}

#[test]
fn given_tree_when_projecting_then_records_one_reference_per_run_in_order() {
    let tree = letter();

    let projection = project(&tree);

    assert_eq!(projection.references.len(), 4);
    let slices: Vec<&str> = projection
        .references
        .iter()
        .map(|r| projection.slice(r))
        .collect();
    assert_eq!(slices, tree.run_texts());
    for (i, reference) in projection.references.iter().enumerate() {
        assert_eq!(reference.sequence_index, i);
        assert_eq!(tree.run_text(reference.node), Some(slices[i]));
    }
}

#[test]
fn given_tree_when_projecting_twice_then_results_are_identical() {
    let tree = letter();
    let before = tree.clone();

    let first = project(&tree);
    let second = project(&tree);

    assert_eq!(first, second);
    assert_eq!(tree, before);
}

#[test]
fn given_offset_when_looking_up_reference_then_finds_covering_run() {
    let tree = letter();
    let projection = project(&tree);

    let name_offset = projection.text.find("Nowak").unwrap();
    let reference = projection.reference_at(name_offset).unwrap();

    assert_eq!(projection.slice(reference), "Anna Nowak");
    let break_offset = projection.text.find('\n').unwrap();
    assert!(projection.reference_at(break_offset).is_none());
}

#[test]
fn given_empty_tree_when_projecting_then_returns_empty_text() {
    let projection = project(&RichTextTree::new());

    assert!(projection.text.is_empty());
    assert!(projection.references.is_empty());
}

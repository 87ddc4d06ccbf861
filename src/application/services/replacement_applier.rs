use crate::domain::{NodeId, NodeKind, Replacement, RichTextTree};

/// Orders replacements longest `original` first. The sort is stable, so
/// equal lengths keep the order the oracle reported them in.
pub fn sort_longest_first(replacements: &[Replacement]) -> Vec<&Replacement> {
    let mut sorted: Vec<&Replacement> = replacements
        .iter()
        .filter(|r| !r.original.is_empty())
        .collect();
    sorted.sort_by(|a, b| b.original.chars().count().cmp(&a.original.chars().count()));
    sorted
}

/// Applies every replacement, in order, as a literal global substitution
/// over the current value of `text`.
pub fn replace_all_occurrences(text: &str, sorted: &[&Replacement]) -> String {
    sorted.iter().fold(text.to_string(), |acc, r| {
        if acc.contains(r.original.as_str()) {
            acc.replace(r.original.as_str(), &r.anonymized)
        } else {
            acc
        }
    })
}

/// Rewrites the text of every run in `tree` with `replacements`.
///
/// Matching is case-sensitive and literal, one run at a time: a sensitive
/// span split across several runs is only replaced where a registered
/// original fits inside a single run. Paragraph and opaque nodes are never
/// touched and runs without a match keep their original value. Returns the
/// number of runs whose text changed.
pub fn apply_replacements(tree: &mut RichTextTree, replacements: &[Replacement]) -> usize {
    let sorted = sort_longest_first(replacements);
    if sorted.is_empty() {
        return 0;
    }

    let mut rewrites: Vec<(NodeId, String)> = Vec::new();
    for id in runs_in_document_order(tree) {
        let Some(current) = tree.run_text(id) else {
            continue;
        };
        let updated = replace_all_occurrences(current, &sorted);
        if updated != current {
            rewrites.push((id, updated));
        }
    }

    let changed = rewrites.len();
    for (id, text) in rewrites {
        tree.set_run_text(id, text);
    }

    tracing::debug!(
        replacements = sorted.len(),
        runs_changed = changed,
        "Applied replacements to rich-text tree"
    );
    changed
}

fn runs_in_document_order(tree: &RichTextTree) -> Vec<NodeId> {
    let mut runs = Vec::new();
    let mut stack: Vec<NodeId> = tree.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        match node.kind {
            NodeKind::Run { .. } => runs.push(id),
            NodeKind::Paragraph { .. } => stack.extend(node.children().iter().rev()),
            NodeKind::Opaque { .. } => {}
        }
    }
    runs
}

//! Serializer: reconstructs expression text from a tree and renders the
//! tree itself for terminal display.

use termtree::Tree;

use crate::domain::arena::{Index, QueryTree};
use crate::domain::grammar::Grammar;

/// Reconstruct the expression a tree represents.
///
/// Conjunctions come out as their canonical names and whitespace is
/// normalized, so the result is equivalent to, not identical with, the
/// originally parsed text. The output always reparses into an isomorphic
/// tree under the same grammar.
pub fn render(tree: &QueryTree, grammar: &Grammar) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        render_node(tree, root, grammar, &mut out);
    }
    out
}

fn render_node(tree: &QueryTree, idx: Index, grammar: &Grammar, out: &mut String) {
    let Some(node) = tree.node(idx) else { return };

    if let Some(open) = node.delimiter {
        out.push(open);
    }
    if let Some(data) = node.data.as_deref() {
        if !data.is_empty() {
            out.push_str(data);
        }
    }
    if let Some(child) = node.child {
        render_node(tree, child, grammar, out);
    }
    if let Some(open) = node.delimiter {
        // Mirror the opening character when the grammar has no pair for it,
        // keeping reconstruction total.
        out.push(grammar.closing(open).unwrap_or(open));
    }
    match node.conjunction {
        Some(conjunction) => {
            out.push(' ');
            out.push_str(conjunction.canonical());
            out.push(' ');
        }
        // Adjacent siblings must stay distinct tokens when no conjunction
        // separates them.
        None if node.next.is_some() => out.push(' '),
        None => {}
    }
    if let Some(next) = node.next {
        render_node(tree, next, grammar, out);
    }
}

/// Terminal rendering: one [`termtree::Tree`] per entry of the top-level row.
pub fn display_tree(tree: &QueryTree, grammar: &Grammar) -> Vec<Tree<String>> {
    let mut rows = Vec::new();
    let mut cursor = tree.root();
    while let Some(idx) = cursor {
        rows.push(branch(tree, idx, grammar));
        cursor = tree.node(idx).and_then(|node| node.next);
    }
    rows
}

fn branch(tree: &QueryTree, idx: Index, grammar: &Grammar) -> Tree<String> {
    let mut leaves = Vec::new();
    let mut cursor = tree.node(idx).and_then(|node| node.child);
    while let Some(child) = cursor {
        leaves.push(branch(tree, child, grammar));
        cursor = tree.node(child).and_then(|node| node.next);
    }
    Tree::new(label(tree, idx, grammar)).with_leaves(leaves)
}

fn label(tree: &QueryTree, idx: Index, grammar: &Grammar) -> String {
    let Some(node) = tree.node(idx) else {
        return String::new();
    };
    let mut label = match (node.delimiter, node.data.as_deref()) {
        (Some(open), _) => format!("{}{}", open, grammar.closing(open).unwrap_or(open)),
        (None, Some(data)) if !data.is_empty() => data.to_string(),
        _ => "·".to_string(),
    };
    if let Some(conjunction) = node.conjunction {
        label.push_str(&format!("  [{conjunction}]"));
    }
    label
}

//! Arena-backed tree model for parsed query expressions.
//!
//! Nodes are addressed by arena index. `child` and `next` are the owning
//! links: `child` descends one nesting level, `next` stays on the same row.
//! `parent` is a read-only back-reference, never followed for ownership.

use generational_arena::Arena;
pub use generational_arena::Index;

use crate::domain::grammar::Conjunction;

/// A single node in the expression tree.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Text payload; present only on operand nodes.
    pub data: Option<String>,
    /// Opening delimiter that scoped this node, `None` for text and
    /// placeholder nodes.
    pub delimiter: Option<char>,
    /// Relationship to the next sibling, carried by the preceding node.
    pub conjunction: Option<Conjunction>,
    /// Nested content one level down.
    pub child: Option<Index>,
    /// Following sibling on the same row.
    pub next: Option<Index>,
    /// Back-reference for traversal; the root has none.
    pub parent: Option<Index>,
}

impl Node {
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn delimited(open: char) -> Self {
        Self {
            delimiter: Some(open),
            ..Self::default()
        }
    }

    /// Operand nodes carry text and no delimiter.
    pub fn is_operand(&self) -> bool {
        self.delimiter.is_none() && self.data.is_some()
    }
}

/// Arena-based tree produced by one parse call.
///
/// The tree is built once by the parser and read afterwards; no node is
/// removed individually, the whole tree is dropped as a unit.
#[derive(Debug)]
pub struct QueryTree {
    arena: Arena<Node>,
    root: Option<Index>,
}

impl Default for QueryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a detached node; linkage happens through [`QueryTree::set_child`]
    /// and [`QueryTree::set_next`].
    pub fn insert(&mut self, node: Node) -> Index {
        self.arena.insert(node)
    }

    pub fn node(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn node_mut(&mut self, idx: Index) -> Option<&mut Node> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn set_root(&mut self, idx: Index) {
        self.root = Some(idx);
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Make `child` the nested content of `parent` and point the child's
    /// back-reference at it.
    pub fn set_child(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.child = Some(child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Append `sibling` after `node` on the same row. Siblings inherit the
    /// owner's parent, not each other.
    pub fn set_next(&mut self, node: Index, sibling: Index) {
        let parent = self.arena.get(node).and_then(|n| n.parent);
        if let Some(n) = self.arena.get_mut(node) {
            n.next = Some(sibling);
        }
        if let Some(s) = self.arena.get_mut(sibling) {
            s.parent = parent;
        }
    }

    /// Maximum nesting depth. Sibling chains share a level; only `child`
    /// descends.
    pub fn depth(&self) -> usize {
        self.root.map(|root| self.row_depth(root)).unwrap_or(0)
    }

    fn row_depth(&self, first: Index) -> usize {
        let mut deepest = 0;
        let mut cursor = Some(first);
        while let Some(idx) = cursor {
            let Some(node) = self.arena.get(idx) else { break };
            let below = node.child.map(|child| self.row_depth(child)).unwrap_or(0);
            deepest = deepest.max(1 + below);
            cursor = node.next;
        }
        deepest
    }

    /// Pre-order traversal: node, then its child subtree, then its next
    /// sibling.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Text payloads of all operand nodes in pre-order.
    pub fn operands(&self) -> Vec<String> {
        self.iter()
            .filter_map(|(_, node)| node.data.as_deref())
            .filter(|data| !data.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub struct PreOrderIter<'a> {
    tree: &'a QueryTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a QueryTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (Index, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.tree.node(idx)?;
        // Sibling below the child on the stack so the child subtree comes first
        if let Some(next) = node.next {
            self.stack.push(next);
        }
        if let Some(child) = node.child {
            self.stack.push(child);
        }
        Some((idx, node))
    }
}

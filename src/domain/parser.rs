//! Single-pass scanner that turns a boolean query expression into a tree.
//!
//! One left-to-right pass over the input with an explicit stack of open
//! delimiter scopes and a cursor at the tail of the row being built.
//! Conjunctions attach to the node preceding the operator; operands and
//! groups chain as siblings within their enclosing scope.

use tracing::{instrument, trace};

use crate::domain::arena::{Index, Node, QueryTree};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::grammar::{Conjunction, Grammar, TrailingDelimiters};

/// One open delimiter scope: its node, opening character, and byte offset.
struct OpenScope {
    node: Index,
    open: char,
    offset: usize,
}

/// Scanner over a fixed grammar. Stateless between calls; each parse builds
/// its own tree.
pub struct QueryParser<'g> {
    grammar: &'g Grammar,
}

impl<'g> QueryParser<'g> {
    /// Validates the grammar up front; see [`Grammar::validate`].
    pub fn new(grammar: &'g Grammar) -> DomainResult<Self> {
        grammar.validate()?;
        Ok(Self { grammar })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn parse(&self, expression: &str) -> DomainResult<QueryTree> {
        let mut tree = QueryTree::new();
        let mut scopes: Vec<OpenScope> = Vec::new();
        // Tail of the row being built; `None` right after opening a scope.
        let mut cursor: Option<Index> = None;
        let mut offset = 0;

        while offset < expression.len() {
            let rest = &expression[offset..];
            let Some(ch) = rest.chars().next() else { break };

            if ch.is_whitespace() {
                offset += ch.len_utf8();
                continue;
            }

            // Closing delimiter of the innermost open scope. Checked before
            // the opening rule so symmetric pairs like ".." can close.
            let closes_top = scopes
                .last()
                .and_then(|scope| self.grammar.closing(scope.open))
                == Some(ch);
            if closes_top {
                if let Some(scope) = scopes.pop() {
                    trace!("closed '{}' at byte {}", scope.open, offset);
                    // The closed group is the tail of the enclosing row: a
                    // following operator lands its conjunction here.
                    cursor = Some(scope.node);
                }
                offset += ch.len_utf8();
                continue;
            }

            // Opening delimiter starts a nested scope with a fresh row.
            if self.grammar.is_opening(ch) {
                let node = tree.insert(Node::delimited(ch));
                attach(&mut tree, scopes.last().map(|scope| scope.node), node);
                scopes.push(OpenScope {
                    node,
                    open: ch,
                    offset,
                });
                cursor = None;
                offset += ch.len_utf8();
                continue;
            }

            if let Some((token_len, kind)) = self.match_operator(rest) {
                let target = match cursor {
                    Some(idx) => idx,
                    None => {
                        // No preceding node yet: a placeholder carries the
                        // conjunction.
                        let placeholder = tree.insert(Node::default());
                        attach(
                            &mut tree,
                            scopes.last().map(|scope| scope.node),
                            placeholder,
                        );
                        placeholder
                    }
                };
                if let Some(node) = tree.node_mut(target) {
                    node.conjunction = Some(kind);
                }
                trace!("conjunction {} at byte {}", kind, offset);
                cursor = Some(target);
                offset += token_len;
                continue;
            }

            // Operand: maximal run free of whitespace and delimiter-like
            // characters.
            let run_len: usize = rest
                .chars()
                .take_while(|&c| self.grammar.is_text_char(c))
                .map(char::len_utf8)
                .sum();
            if run_len == 0 {
                return Err(DomainError::UnexpectedCharacter {
                    character: ch,
                    offset,
                });
            }
            let node = tree.insert(Node::text(&rest[..run_len]));
            attach(&mut tree, scopes.last().map(|scope| scope.node), node);
            cursor = Some(node);
            offset += run_len;
        }

        if self.grammar.trailing == TrailingDelimiters::Error {
            if let Some(scope) = scopes.last() {
                return Err(DomainError::UnterminatedDelimiter {
                    delimiter: scope.open,
                    offset: scope.offset,
                });
            }
        }
        // Under AutoClose, scopes still open here count as closed: the tree
        // links are already in place, only cursor bookkeeping remains.

        if tree.root().is_none() {
            let empty = tree.insert(Node::text(""));
            tree.set_root(empty);
        }

        Ok(tree)
    }

    /// Longest fully-matching operator token; table order (NOT, AND, OR)
    /// breaks equal-length collisions.
    fn match_operator(&self, rest: &str) -> Option<(usize, Conjunction)> {
        let mut best: Option<(usize, Conjunction)> = None;
        for (token, kind) in self.grammar.operator_table() {
            if rest.starts_with(token) && best.map_or(true, |(len, _)| token.len() > len) {
                best = Some((token.len(), kind));
            }
        }
        best
    }
}

/// Attach a new node under the innermost open scope: as the scope's child if
/// it has none yet, otherwise at the end of its child sibling chain. With no
/// scope open the node joins the top-level row, or becomes the root.
fn attach(tree: &mut QueryTree, scope: Option<Index>, node: Index) {
    let anchor = match scope {
        Some(scope_node) => scope_node,
        None => match tree.root() {
            Some(root) => {
                let tail = row_tail(tree, root);
                tree.set_next(tail, node);
                return;
            }
            None => {
                tree.set_root(node);
                return;
            }
        },
    };
    match tree.node(anchor).and_then(|n| n.child) {
        None => tree.set_child(anchor, node),
        Some(first) => {
            let tail = row_tail(tree, first);
            tree.set_next(tail, node);
        }
    }
}

fn row_tail(tree: &QueryTree, from: Index) -> Index {
    let mut tail = from;
    while let Some(next) = tree.node(tail).and_then(|n| n.next) {
        tail = next;
    }
    tail
}

/// Parse `expression` with `grammar` into a tree.
pub fn parse(expression: &str, grammar: &Grammar) -> DomainResult<QueryTree> {
    QueryParser::new(grammar)?.parse(expression)
}

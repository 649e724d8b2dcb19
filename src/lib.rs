//! rsquery: boolean query expressions as navigable trees.
//!
//! Parses textual boolean queries (operands combined with AND/OR/NOT and
//! grouped by parentheses or quotes) into an arena-backed tree, and renders
//! trees back to canonical text. The grammar — delimiter pairs, operator
//! token spellings, end-of-input policy — is caller-configurable.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    display_tree, parse, render, Conjunction, DomainError, Grammar, Node, QueryParser, QueryTree,
    TrailingDelimiters,
};

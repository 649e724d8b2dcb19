//! Domain layer: the tree model, grammar, parser, and serializer.
//!
//! Independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod render;

pub use arena::{Index, Node, PreOrderIter, QueryTree};
pub use error::{DomainError, DomainResult};
pub use grammar::{Conjunction, Grammar, TrailingDelimiters, RESERVED_CHARS};
pub use parser::{parse, QueryParser};
pub use render::{display_tree, render};

//! Parser and AST types for the nulint analyzer.
//!
//! The AST is an arena: a flat `Vec` of thin `Node` records, each pointing
//! into a per-kind side pool for its payload. Children are created before
//! parents (bottom-up), and parent links are recorded at creation time so
//! later passes can walk upward.

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::node::{Node, NodeArena};
pub use parser::state::{ParseResult, parse_source_file};
pub use parser::syntax_kind_ext;

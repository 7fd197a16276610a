pub mod base;
pub mod node;
pub mod node_access;
pub mod node_arena;
pub mod state;
pub mod syntax_kind_ext;

pub use base::{NodeIndex, NodeList};
pub use node::NodeArena;

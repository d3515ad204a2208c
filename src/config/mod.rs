//! Configuration trees: representation, merge semantics, boundary adapters.

pub mod adapter;
pub mod tree;

pub use tree::{merge, prune_empty, ConfigTree};

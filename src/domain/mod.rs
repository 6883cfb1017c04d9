//! Domain layer: the tree data structure and its queries
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod render;

pub use arena::{Edge, NodeId, PostOrderIterator, Tree, TreeIterator, TreeNode};
pub use error::{TreeError, TreeResult};
pub use render::TreeConvert;

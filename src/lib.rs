//! Generic rooted multi-way tree with traversal and query operations.
//!
//! The [`domain`] layer holds the tree itself; [`cli`] drives it through an
//! interactive text menu.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{Edge, NodeId, Tree, TreeError, TreeNode, TreeResult};

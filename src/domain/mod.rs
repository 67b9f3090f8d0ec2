//! Domain layer: the category tree model and its trimming passes
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod node;
pub mod percentile;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use node::{CategoryNode, NodeId, RawTreeData};
pub use tree::{CategoryTree, NodeData, TreeNode};

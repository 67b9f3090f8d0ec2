//! Domain entities: wire shapes of the raw category tree

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable node identifier assigned by the source system.
///
/// Page ids are integers, but unresolved references may only be known by
/// title, so the id is either form. Unique within one raw snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(u64),
    Str(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for NodeId {
    fn from(n: u64) -> Self {
        NodeId::Int(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

/// One node of the category hierarchy, exactly as (de)serialized from disk.
///
/// `name` is `None` for nodes whose identity is known but whose descriptive
/// metadata was not resolved (broken or redirected references).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: NodeId,
    #[serde(default)]
    pub name: Option<String>,
    pub page_count: u64,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

/// Full raw snapshot: the opaque `meta` block plus the tree under `root`.
///
/// `meta` is source-provided metadata (language code, fetch timestamp,
/// totals) carried alongside the tree and passed through trimming unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTreeData {
    pub meta: Map<String, Value>,
    pub root: CategoryNode,
}

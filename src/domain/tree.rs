//! Arena-based category tree and the trimming passes.
//!
//! A `CategoryTree` is built once from a raw snapshot, mutated in place by
//! an ordered sequence of trim operations, exported via [`CategoryTree::to_raw`]
//! and then discarded. Every trim pass preserves a single connected tree
//! rooted at the original root, and sibling order is never changed.

use generational_arena::{Arena, Index};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{CategoryNode, NodeId, RawTreeData};
use crate::domain::percentile::percentile_of;

/// Data payload of one tree node.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: NodeId,
    pub name: Option<String>,
    pub page_count: u64,
}

impl NodeData {
    fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Tree node in the arena-based hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of the parent node, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in source sibling order
    pub children: Vec<Index>,
}

/// Arena-based category tree with its untouched `meta` block.
///
/// Uses generational arena for memory-safe node references. Each tree
/// represents one language's snapshot.
#[derive(Debug)]
pub struct CategoryTree {
    arena: Arena<TreeNode>,
    root: Index,
    meta: Map<String, Value>,
}

impl CategoryTree {
    /// Build a tree from the deserialized raw snapshot.
    ///
    /// Validates that node ids are unique across the snapshot. A cycle in
    /// the source graph that was flattened into the nested input repeats an
    /// id and is rejected the same way.
    #[instrument(level = "debug", skip(raw), fields(meta_keys = raw.meta.len()))]
    pub fn from_raw(raw: RawTreeData) -> DomainResult<Self> {
        let mut arena: Arena<TreeNode> = Arena::new();
        let mut seen: HashSet<NodeId> = HashSet::new();

        let root = insert_subtree(&mut arena, &mut seen, raw.root, None)?;
        debug!(nodes = arena.len(), "built category tree");

        Ok(Self {
            arena,
            root,
            meta: raw.meta,
        })
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Number of nodes currently in the tree.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Pre-order (parent before children, left to right) iterator.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Height of the tree: the root alone is 0.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.arena.get(idx) {
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Discard nodes whose page count falls below the given percentile of
    /// the page-count distribution across all nodes currently in the tree.
    ///
    /// The cutoff is computed once from the pre-trim distribution; any
    /// non-root node strictly below it is removed together with its entire
    /// subtree. The root is never removed.
    #[instrument(level = "debug", skip(self))]
    pub fn trim_by_page_count_percentile(&mut self, pages_percentile: u8) -> DomainResult<()> {
        if pages_percentile > 100 {
            return Err(DomainError::PercentileOutOfRange(pages_percentile));
        }

        let counts: Vec<u64> = self.iter().map(|(_, node)| node.data.page_count).collect();
        let Some(cutoff) = percentile_of(&counts, pages_percentile) else {
            return Ok(());
        };
        debug!(cutoff, nodes = counts.len(), "page count cutoff");

        let doomed = self.collect_prunable(|node, _| (node.data.page_count as f64) < cutoff);
        for idx in doomed {
            self.remove_subtree(idx);
        }
        Ok(())
    }

    /// Remove nodes that carry an id but no resolved name (dangling or
    /// redirected references), together with their subtrees. The root is
    /// never removed.
    #[instrument(level = "debug", skip(self))]
    pub fn trim_by_id_without_name(&mut self) {
        let doomed = self.collect_prunable(|node, _| !node.data.has_name());
        for idx in doomed {
            self.remove_subtree(idx);
        }
    }

    /// Bound the tree's height: the root is depth 0 and any node strictly
    /// deeper than `max_depth` is removed with its subtree. `None` means no
    /// bound. Depth is measured on the current (already trimmed) tree.
    #[instrument(level = "debug", skip(self))]
    pub fn trim_by_max_depth(&mut self, max_depth: Option<u32>) {
        let Some(max_depth) = max_depth else {
            return;
        };

        let doomed = self.collect_prunable(|_, depth| depth > max_depth as usize);
        for idx in doomed {
            self.remove_subtree(idx);
        }
    }

    /// Export the tree back into the plain nested raw shape, `meta`
    /// untouched. Does not mutate; calling it repeatedly yields identical
    /// results.
    pub fn to_raw(&self) -> RawTreeData {
        RawTreeData {
            meta: self.meta.clone(),
            root: self.export_node(self.root),
        }
    }

    fn export_node(&self, idx: Index) -> CategoryNode {
        // Indices reachable from the root are live: remove_subtree detaches
        // a subtree from its parent before freeing its slots.
        let node = &self.arena[idx];
        CategoryNode {
            id: node.data.id.clone(),
            name: node.data.name.clone(),
            page_count: node.data.page_count,
            children: node
                .children
                .iter()
                .map(|&child| self.export_node(child))
                .collect(),
        }
    }

    /// Pre-order walk collecting the top-most non-root nodes matched by
    /// `doomed`. Matched subtrees are not descended into, so the returned
    /// indices are disjoint subtree roots.
    fn collect_prunable<F>(&self, doomed: F) -> Vec<Index>
    where
        F: Fn(&TreeNode, usize) -> bool,
    {
        let mut marked = Vec::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.arena.get(idx) {
                for &child in node.children.iter().rev() {
                    if let Some(child_node) = self.arena.get(child) {
                        if doomed(child_node, depth + 1) {
                            marked.push(child);
                        } else {
                            stack.push((child, depth + 1));
                        }
                    }
                }
            }
        }
        marked
    }

    /// Delete a node and all of its descendants. Children are not
    /// reattached to the grandparent.
    fn remove_subtree(&mut self, idx: Index) {
        if idx == self.root {
            return;
        }

        // Detach from the parent first so the tree stays connected even if
        // traversal observes it mid-removal.
        if let Some(parent_idx) = self.arena.get(idx).and_then(|n| n.parent) {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.retain(|&child| child != idx);
            }
        }

        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
            }
        }
    }
}

fn insert_subtree(
    arena: &mut Arena<TreeNode>,
    seen: &mut HashSet<NodeId>,
    node: CategoryNode,
    parent: Option<Index>,
) -> DomainResult<Index> {
    if !seen.insert(node.id.clone()) {
        return Err(DomainError::DuplicateId(node.id));
    }

    let idx = arena.insert(TreeNode {
        data: NodeData {
            id: node.id,
            name: node.name,
            page_count: node.page_count,
        },
        parent,
        children: Vec::new(),
    });

    if let Some(parent_idx) = parent {
        if let Some(parent_node) = arena.get_mut(parent_idx) {
            parent_node.children.push(idx);
        }
    }

    for child in node.children {
        insert_subtree(arena, seen, child, Some(idx))?;
    }
    Ok(idx)
}

/// Depth-first pre-order iterator over live tree nodes.
pub struct TreeIterator<'a> {
    tree: &'a CategoryTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a CategoryTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(id: u64, name: &str, page_count: u64) -> CategoryNode {
        CategoryNode {
            id: NodeId::Int(id),
            name: Some(name.to_string()),
            page_count,
            children: vec![],
        }
    }

    fn raw(root: CategoryNode) -> RawTreeData {
        let mut meta = Map::new();
        meta.insert("language".into(), json!("en"));
        RawTreeData { meta, root }
    }

    #[test]
    fn given_nested_input_when_building_then_preserves_sibling_order() {
        let mut root = leaf(1, "Root", 0);
        root.children = vec![leaf(2, "A", 10), leaf(3, "B", 20), leaf(4, "C", 30)];

        let tree = CategoryTree::from_raw(raw(root)).unwrap();

        let names: Vec<_> = tree
            .iter()
            .filter_map(|(_, n)| n.data.name.clone())
            .collect();
        assert_eq!(names, vec!["Root", "A", "B", "C"]);
    }

    #[test]
    fn given_duplicate_id_when_building_then_errors() {
        let mut root = leaf(1, "Root", 0);
        root.children = vec![leaf(2, "A", 10), leaf(2, "A again", 20)];

        let result = CategoryTree::from_raw(raw(root));

        assert!(matches!(result, Err(DomainError::DuplicateId(_))));
    }

    #[test]
    fn given_removed_subtree_when_counting_then_descendants_are_gone() {
        let mut child = leaf(2, "A", 10);
        child.children = vec![leaf(3, "A1", 5), leaf(4, "A2", 5)];
        let mut root = leaf(1, "Root", 0);
        root.children = vec![child, leaf(5, "B", 10)];

        let mut tree = CategoryTree::from_raw(raw(root)).unwrap();
        assert_eq!(tree.node_count(), 5);

        let a_idx = tree
            .iter()
            .find(|(_, n)| n.data.id == NodeId::Int(2))
            .map(|(idx, _)| idx)
            .unwrap();
        tree.remove_subtree(a_idx);

        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.height(), 1);
    }
}

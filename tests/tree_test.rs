//! Tests for CategoryTree construction and export

use serde_json::{json, Map};

use cattree::domain::{CategoryNode, CategoryTree, DomainError, NodeId, RawTreeData};

fn node(id: u64, name: &str, page_count: u64, children: Vec<CategoryNode>) -> CategoryNode {
    CategoryNode {
        id: NodeId::Int(id),
        name: Some(name.to_string()),
        page_count,
        children,
    }
}

fn raw(root: CategoryNode) -> RawTreeData {
    let mut meta = Map::new();
    meta.insert("language".into(), json!("en"));
    meta.insert("fetched".into(), json!("2026-08-30T00:00:00Z"));
    RawTreeData { meta, root }
}

// ============================================================
// Construction and Validation
// ============================================================

#[test]
fn given_valid_raw_input_when_building_then_all_nodes_are_reachable() {
    let root = node(
        1,
        "Root",
        0,
        vec![
            node(2, "Science", 120, vec![node(3, "Physics", 80, vec![])]),
            node(4, "Arts", 40, vec![]),
        ],
    );

    let tree = CategoryTree::from_raw(raw(root)).unwrap();

    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.height(), 2);
}

#[test]
fn given_duplicate_ids_when_building_then_fails_with_malformed_tree() {
    // A cycle flattened into nested input repeats an id; construction
    // rejects it instead of silently breaking the cycle.
    let root = node(
        1,
        "Root",
        0,
        vec![node(2, "A", 10, vec![node(2, "A again", 10, vec![])])],
    );

    let result = CategoryTree::from_raw(raw(root));

    match result {
        Err(DomainError::DuplicateId(id)) => assert_eq!(id, NodeId::Int(2)),
        other => panic!("expected DuplicateId, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn given_string_and_integer_ids_when_building_then_both_are_accepted() {
    let mut root = node(1, "Root", 0, vec![]);
    root.children.push(CategoryNode {
        id: NodeId::Str("Category:Unresolved".into()),
        name: None,
        page_count: 0,
        children: vec![],
    });

    let tree = CategoryTree::from_raw(raw(root)).unwrap();

    assert_eq!(tree.node_count(), 2);
}

#[test]
fn given_tree_when_iterating_then_order_is_preorder_left_to_right() {
    let root = node(
        1,
        "Root",
        0,
        vec![
            node(2, "A", 10, vec![node(3, "A1", 5, vec![]), node(4, "A2", 5, vec![])]),
            node(5, "B", 20, vec![]),
        ],
    );

    let tree = CategoryTree::from_raw(raw(root)).unwrap();

    let order: Vec<_> = tree
        .iter()
        .filter_map(|(_, n)| n.data.name.clone())
        .collect();
    assert_eq!(order, vec!["Root", "A", "A1", "A2", "B"]);
}

// ============================================================
// Export
// ============================================================

#[test]
fn given_untrimmed_tree_when_exporting_then_round_trips_exactly() {
    let input = raw(node(
        1,
        "Root",
        0,
        vec![
            node(2, "Science", 120, vec![node(3, "Physics", 80, vec![])]),
            node(4, "Arts", 40, vec![]),
        ],
    ));

    let tree = CategoryTree::from_raw(input.clone()).unwrap();

    assert_eq!(tree.to_raw(), input);
}

#[test]
fn given_same_tree_when_exporting_twice_then_results_are_identical() {
    let tree = CategoryTree::from_raw(raw(node(
        1,
        "Root",
        0,
        vec![node(2, "A", 10, vec![]), node(5, "B", 20, vec![])],
    )))
    .unwrap();

    let first = tree.to_raw();
    let second = tree.to_raw();

    assert_eq!(first, second);
}

#[test]
fn given_meta_block_when_trimming_and_exporting_then_meta_is_untouched() {
    let input = raw(node(
        1,
        "Root",
        0,
        vec![node(2, "A", 10, vec![]), node(5, "B", 20, vec![])],
    ));
    let expected_meta = input.meta.clone();

    let mut tree = CategoryTree::from_raw(input).unwrap();
    tree.trim_by_page_count_percentile(100).unwrap();
    tree.trim_by_id_without_name();
    tree.trim_by_max_depth(Some(0));

    assert_eq!(tree.to_raw().meta, expected_meta);
}

#[test]
fn given_raw_json_when_deserializing_then_missing_name_and_children_default() {
    let value = json!({
        "meta": {"language": "de"},
        "root": {
            "id": 1,
            "name": "Root",
            "page_count": 0,
            "children": [
                {"id": 2, "page_count": 3}
            ]
        }
    });

    let parsed: RawTreeData = serde_json::from_value(value).unwrap();

    assert_eq!(parsed.root.children.len(), 1);
    assert_eq!(parsed.root.children[0].name, None);
    assert!(parsed.root.children[0].children.is_empty());
}

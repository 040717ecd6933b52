use super::{
    backward_and_up, breadth_first, depth_first, forward_and_over, forward_and_up, last_descendant,
    next_sibling, previous_sibling, Tree,
};
use crate::builder::build_from_classes;
use crate::formats::Classification;
use crate::hierarchy::{Hierarchy, NodeId};
use proptest::prelude::*;

const fn h(depth: usize) -> Classification {
    Classification::Headline { depth }
}

const P: Classification = Classification::Plain;

/// `# A`, `a1`, `## B`, `b1`, `# C`
fn scenario() -> Hierarchy {
    build_from_classes(&[h(1), P, h(2), P, h(1)])
}

/// `# A`, `## B`, `b1`, `## C`, `c1`
fn two_sections() -> Hierarchy {
    build_from_classes(&[h(1), h(2), P, h(2), P])
}

fn cells(hierarchy: &Hierarchy, nodes: impl Iterator<Item = NodeId>) -> Vec<usize> {
    nodes
        .filter_map(|id| hierarchy.block(id))
        .map(|block| block.index())
        .collect()
}

fn at(hierarchy: &Hierarchy, index: usize) -> NodeId {
    hierarchy.node_at(index).unwrap()
}

#[test]
fn test_depth_first_is_document_order() {
    let tree = scenario();
    let a = at(&tree, 0);
    assert_eq!(cells(&tree, depth_first(&tree, a)), vec![0, 1, 2, 3]);

    let tree = two_sections();
    assert_eq!(
        cells(&tree, depth_first(&tree, NodeId::ROOT)),
        vec![0, 1, 2, 3, 4]
    );
}

#[test]
fn test_breadth_first_goes_level_by_level() {
    let tree = two_sections();
    let a = at(&tree, 0);
    assert_eq!(cells(&tree, breadth_first(&tree, a)), vec![0, 1, 3, 2, 4]);
}

#[test]
fn test_walks_from_root_start_with_root() {
    let tree = scenario();
    assert_eq!(depth_first(&tree, NodeId::ROOT).next(), Some(NodeId::ROOT));
    assert_eq!(breadth_first(&tree, NodeId::ROOT).next(), Some(NodeId::ROOT));
    assert_eq!(depth_first(&tree, NodeId::ROOT).count(), tree.len());
    assert_eq!(breadth_first(&tree, NodeId::ROOT).count(), tree.len());
}

#[test]
fn test_forward_and_over_skips_descendants() {
    let tree = scenario();
    let b = at(&tree, 2);
    assert_eq!(cells(&tree, forward_and_over(&tree, b)), vec![4]);

    let a = at(&tree, 0);
    assert_eq!(cells(&tree, forward_and_over(&tree, a)), vec![4]);

    let c = at(&tree, 4);
    assert_eq!(forward_and_over(&tree, c).next(), None);
}

#[test]
fn test_forward_and_up_walks_rest_of_document() {
    let tree = scenario();
    let a = at(&tree, 0);
    assert_eq!(cells(&tree, forward_and_up(&tree, a)), vec![1, 2, 3, 4]);

    let b1 = at(&tree, 3);
    assert_eq!(cells(&tree, forward_and_up(&tree, b1).take(1)), vec![4]);
}

#[test]
fn test_backward_and_up_enters_previous_section_end() {
    let tree = scenario();
    let c = at(&tree, 4);
    assert_eq!(cells(&tree, backward_and_up(&tree, c)), vec![3, 2, 1, 0]);
}

#[test]
fn test_backward_and_up_never_yields_root() {
    let tree = scenario();
    let a = at(&tree, 0);
    assert_eq!(backward_and_up(&tree, a).next(), None);

    let a1 = at(&tree, 1);
    assert_eq!(cells(&tree, backward_and_up(&tree, a1)), vec![0]);
}

#[test]
fn test_exhausted_walks_stay_exhausted() {
    let tree = scenario();
    let c = at(&tree, 4);
    let mut walk = forward_and_up(&tree, c);
    assert_eq!(walk.next(), None);
    assert_eq!(walk.next(), None);
}

#[test]
fn test_sibling_helpers() {
    let tree = scenario();
    let (a, a1, b, b1) = (at(&tree, 0), at(&tree, 1), at(&tree, 2), at(&tree, 3));

    assert_eq!(next_sibling(&tree, a1), Some(b));
    assert_eq!(previous_sibling(&tree, b), Some(a1));
    assert_eq!(previous_sibling(&tree, a1), None);
    assert_eq!(next_sibling(&tree, b), None);
    assert_eq!(next_sibling(&tree, NodeId::ROOT), None);
    assert_eq!(last_descendant(&tree, a), b1);
    assert_eq!(last_descendant(&tree, b1), b1);
}

/// Minimal tree over plain indices, to check the walks need nothing from `Hierarchy`.
struct Indexed {
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl Tree for Indexed {
    type Node = usize;

    fn parent(&self, node: usize) -> Option<usize> {
        self.parents[node]
    }

    fn children(&self, node: usize) -> &[usize] {
        &self.children[node]
    }
}

#[test]
fn test_walks_work_on_any_tree() {
    //     0
    //   1   4
    //  2 3
    let tree = Indexed {
        parents: vec![None, Some(0), Some(1), Some(1), Some(0)],
        children: vec![vec![1, 4], vec![2, 3], vec![], vec![], vec![]],
    };

    assert_eq!(depth_first(&tree, 0).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert_eq!(breadth_first(&tree, 0).collect::<Vec<_>>(), vec![0, 1, 4, 2, 3]);
    assert_eq!(forward_and_over(&tree, 2).collect::<Vec<_>>(), vec![3, 4]);
    assert_eq!(forward_and_up(&tree, 1).collect::<Vec<_>>(), vec![2, 3, 4]);
    assert_eq!(backward_and_up(&tree, 4).collect::<Vec<_>>(), vec![3, 2, 1]);
}

fn classes() -> impl Strategy<Value = Vec<Classification>> {
    prop::collection::vec(prop::option::of(1usize..=6), 0..40).prop_map(|depths| {
        depths
            .into_iter()
            .map(|depth| depth.map_or(P, h))
            .collect()
    })
}

proptest! {
    #[test]
    fn test_full_walks_visit_each_node_once(classes in classes()) {
        let tree = build_from_classes(&classes);
        for walk in [
            depth_first(&tree, NodeId::ROOT).collect::<Vec<_>>(),
            breadth_first(&tree, NodeId::ROOT).collect::<Vec<_>>(),
        ] {
            let mut seen = walk.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(walk.len(), tree.len());
            prop_assert_eq!(seen.len(), tree.len());
        }
    }

    #[test]
    fn test_forward_then_backward_returns(classes in classes()) {
        let tree = build_from_classes(&classes);
        for index in 0..classes.len().saturating_sub(1) {
            let node = tree.node_at(index).unwrap();
            let next = forward_and_up(&tree, node).next().unwrap();
            prop_assert_eq!(tree.block(next).map(|b| b.index()), Some(index + 1));
            prop_assert_eq!(backward_and_up(&tree, next).next(), Some(node));
        }
    }

    #[test]
    fn test_backward_then_forward_returns(classes in classes()) {
        let tree = build_from_classes(&classes);
        for index in 1..classes.len() {
            let node = tree.node_at(index).unwrap();
            let previous = backward_and_up(&tree, node).next().unwrap();
            prop_assert_eq!(forward_and_up(&tree, previous).next(), Some(node));
        }
    }

    #[test]
    fn test_forward_and_over_lands_after_subtree(classes in classes()) {
        let tree = build_from_classes(&classes);
        for id in tree.ids().skip(1) {
            let end = tree.subtree_range(id).unwrap().end;
            let over = forward_and_over(&tree, id).next().and_then(|n| tree.block(n));
            let expected = (end + 1 < classes.len()).then_some(end + 1);
            prop_assert_eq!(over.map(|b| b.index()), expected);
        }
    }
}

//! Lazy walks over any tree that can report a node's parent and children.
//!
//! Each walk is an explicit iterator holding only cursor state, so a caller can take the
//! first element for a goto and drop the rest, or keep pulling for multi-step moves. None of
//! them knows about cells or headings.
//!
//! | Walk | Yields |
//! |---|---|
//! | [`depth_first`] | the start node, then its descendants in pre-order |
//! | [`breadth_first`] | the start node, then its descendants level by level |
//! | [`forward_and_over`] | next sibling, climbing to ancestors' next siblings when needed |
//! | [`forward_and_up`] | next node in document order (descends into children first) |
//! | [`backward_and_up`] | previous node in document order (ends of prior subtrees, then parents) |

use std::collections::VecDeque;
use std::iter::FusedIterator;

/// A rooted tree addressed by copyable node handles.
///
/// The root is the node whose [`parent`](Tree::parent) is `None`.
pub trait Tree {
    /// Node handle.
    type Node: Copy + Eq;

    /// Enclosing node, or `None` at the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Directly nested nodes in order.
    fn children(&self, node: Self::Node) -> &[Self::Node];
}

/// Parent of `node` and the position of `node` among the parent's children.
fn position_in_parent<T: Tree + ?Sized>(tree: &T, node: T::Node) -> Option<(T::Node, usize)> {
    let parent = tree.parent(node)?;
    let position = tree.children(parent).iter().position(|&c| c == node)?;
    Some((parent, position))
}

/// The sibling immediately after `node`.
pub fn next_sibling<T: Tree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    let (parent, position) = position_in_parent(tree, node)?;
    tree.children(parent).get(position + 1).copied()
}

/// The sibling immediately before `node`.
pub fn previous_sibling<T: Tree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    let (parent, position) = position_in_parent(tree, node)?;
    let before = position.checked_sub(1)?;
    tree.children(parent).get(before).copied()
}

/// Deepest, rightmost node of the subtree at `node` (`node` itself when it is a leaf).
pub fn last_descendant<T: Tree + ?Sized>(tree: &T, node: T::Node) -> T::Node {
    let mut current = node;
    while let Some(&last) = tree.children(current).last() {
        current = last;
    }
    current
}

fn step_over<T: Tree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    let mut current = node;
    loop {
        if let Some(next) = next_sibling(tree, current) {
            return Some(next);
        }
        current = tree.parent(current)?;
    }
}

fn step_forward<T: Tree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    match tree.children(node).first() {
        Some(&first) => Some(first),
        None => step_over(tree, node),
    }
}

fn step_backward<T: Tree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    if let Some(previous) = previous_sibling(tree, node) {
        return Some(last_descendant(tree, previous));
    }
    let parent = tree.parent(node)?;
    // the root is not a destination
    tree.parent(parent).map(|_| parent)
}

/// Pre-order walk of the subtree at a node.
pub struct DepthFirst<'t, T: Tree + ?Sized> {
    tree: &'t T,
    stack: Vec<T::Node>,
}

/// Walk `start` and its descendants in pre-order.
pub fn depth_first<T: Tree + ?Sized>(tree: &T, start: T::Node) -> DepthFirst<'_, T> {
    DepthFirst {
        tree,
        stack: vec![start],
    }
}

impl<T: Tree + ?Sized> Iterator for DepthFirst<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(node).iter().rev().copied());
        Some(node)
    }
}

impl<T: Tree + ?Sized> FusedIterator for DepthFirst<'_, T> {}

/// Level-order walk of the subtree at a node.
pub struct BreadthFirst<'t, T: Tree + ?Sized> {
    tree: &'t T,
    queue: VecDeque<T::Node>,
}

/// Walk `start` and its descendants level by level.
pub fn breadth_first<T: Tree + ?Sized>(tree: &T, start: T::Node) -> BreadthFirst<'_, T> {
    BreadthFirst {
        tree,
        queue: VecDeque::from([start]),
    }
}

impl<T: Tree + ?Sized> Iterator for BreadthFirst<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        let node = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(node).iter().copied());
        Some(node)
    }
}

impl<T: Tree + ?Sized> FusedIterator for BreadthFirst<'_, T> {}

/// Which single-step move a [`Walk`] repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Over,
    Forward,
    Backward,
}

/// Repeated single-step movement away from a start node, which is itself not yielded.
///
/// Built by [`forward_and_over`], [`forward_and_up`] and [`backward_and_up`].
pub struct Walk<'t, T: Tree + ?Sized> {
    tree: &'t T,
    step: Step,
    current: Option<T::Node>,
}

impl<T: Tree + ?Sized> Iterator for Walk<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        let from = self.current?;
        let next = match self.step {
            Step::Over => step_over(self.tree, from),
            Step::Forward => step_forward(self.tree, from),
            Step::Backward => step_backward(self.tree, from),
        };
        self.current = next;
        next
    }
}

impl<T: Tree + ?Sized> FusedIterator for Walk<'_, T> {}

/// Next sibling subtrees after `start`, skipping descendants.
///
/// When a node has no next sibling the walk climbs to the nearest ancestor that does. It ends
/// once the root is reached.
pub fn forward_and_over<T: Tree + ?Sized>(tree: &T, start: T::Node) -> Walk<'_, T> {
    Walk {
        tree,
        step: Step::Over,
        current: Some(start),
    }
}

/// Nodes after `start` in document order: first child if any, else as [`forward_and_over`].
pub fn forward_and_up<T: Tree + ?Sized>(tree: &T, start: T::Node) -> Walk<'_, T> {
    Walk {
        tree,
        step: Step::Forward,
        current: Some(start),
    }
}

/// Nodes before `start` in document order.
///
/// Each step lands on the previous sibling's last descendant, or on the parent when there is
/// no previous sibling. The walk never yields the root.
pub fn backward_and_up<T: Tree + ?Sized>(tree: &T, start: T::Node) -> Walk<'_, T> {
    Walk {
        tree,
        step: Step::Backward,
        current: Some(start),
    }
}

#[cfg(test)]
#[path = "tests/traversal.rs"]
mod tests;

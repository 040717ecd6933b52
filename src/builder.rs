//! Infers the outline of a flat cell sequence from heading depths alone.
//!
//! A headline at depth `d` opens a scope that swallows every following cell until the next
//! headline at depth `d` or shallower. Plain cells are always leaves. Nesting falls out of the
//! recursion: a deeper headline inside a scope opens its own scope, and a shallow headline
//! closes every open scope at its depth or deeper because each level of the recursion checks
//! it in turn.

use crate::block::{Block, CellSequence};
use crate::formats::{Classification, Classifier};
use crate::hierarchy::{Hierarchy, NodeId};
use crate::traversal::Tree;
use tracing::debug;

/// Classify every cell once, in order.
///
/// Out-of-range reads (a sequence whose `len` disagrees with its accessors) classify as plain.
pub fn classify_all<S, C>(cells: &S, classifier: &mut C) -> Vec<Classification>
where
    S: CellSequence + ?Sized,
    C: Classifier + ?Sized,
{
    (0..cells.len())
        .map(|index| match (cells.kind_at(index), cells.text_at(index)) {
            (Some(kind), Some(text)) => classifier.classify(kind, text),
            _ => Classification::Plain,
        })
        .collect()
}

/// Build the outline of `cells`.
///
/// Runs one left-to-right pass with one classifier call per cell. Any sequence, including an
/// empty one, yields a valid hierarchy.
pub fn build_hierarchy<S, C>(cells: &S, classifier: &mut C) -> Hierarchy
where
    S: CellSequence + ?Sized,
    C: Classifier + ?Sized,
{
    let classes = classify_all(cells, classifier);
    let hierarchy = build_from_classes(&classes);
    debug!(
        cells = classes.len(),
        top_level = hierarchy.children(NodeId::ROOT).len(),
        "built cell hierarchy"
    );
    hierarchy
}

/// Build the outline from classifications already computed, one per cell.
#[must_use]
pub fn build_from_classes(classes: &[Classification]) -> Hierarchy {
    let mut builder = TreeBuilder {
        classes,
        hierarchy: Hierarchy::with_capacity(classes.len()),
    };
    let mut cursor = 0;
    while cursor < classes.len() {
        cursor = builder.parse_node(NodeId::ROOT, cursor);
    }
    builder.hierarchy
}

struct TreeBuilder<'a> {
    classes: &'a [Classification],
    hierarchy: Hierarchy,
}

impl TreeBuilder<'_> {
    /// Attach the cell at `index` (and, for a headline, its whole scope) under `parent`.
    ///
    /// Returns the position of the first cell not consumed.
    fn parse_node(&mut self, parent: NodeId, index: usize) -> usize {
        let class = self.classes[index];
        let node = self
            .hierarchy
            .push_branch(parent, Block::new(index), class.depth());

        let Classification::Headline { depth } = class else {
            return index + 1;
        };

        let mut cursor = index + 1;
        while let Some(next) = self.classes.get(cursor) {
            if next.depth().is_some_and(|d| d <= depth) {
                break;
            }
            cursor = self.parse_node(node, cursor);
        }
        cursor
    }
}

#[cfg(test)]
#[path = "tests/builder.rs"]
mod tests;

//! Questions a selection command asks of a built hierarchy.
//!
//! Lookups that come up empty return `None`. Asking for a range that needs a parent scope
//! the node does not have is a caller bug and returns [`Error::InvalidRange`].

use crate::block::{Block, CellRange};
use crate::error::{Error, Result};
use crate::hierarchy::{Hierarchy, NodeId};
use crate::traversal::{depth_first, last_descendant, Tree};

/// Ancestors of a node, nearest first, ending with the root.
pub struct Ancestors<'h> {
    hierarchy: &'h Hierarchy,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next?;
        self.next = self.hierarchy.parent(node);
        Some(node)
    }
}

impl Hierarchy {
    /// Blocks in the subtree at `node`, in document order, starting with the node's own block.
    pub fn cells_of(&self, node: NodeId) -> impl Iterator<Item = Block> + '_ {
        depth_first(self, node).filter_map(|id| self.block(id))
    }

    #[must_use]
    /// The branch wrapping `block`, if any.
    pub fn find_node(&self, block: Block) -> Option<NodeId> {
        depth_first(self, NodeId::ROOT).find(|&id| self.block(id) == Some(block))
    }

    #[must_use]
    /// The branch wrapping the cell at `index`; out-of-range positions give `None`.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.find_node(Block::new(index))
    }

    #[must_use]
    /// Parent hops from `node` to the root, less one: the root is -1, its children 0.
    pub fn depth_of(&self, node: NodeId) -> isize {
        let mut depth = -1;
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    #[must_use]
    /// Ancestors of `node`, nearest first, ending at the root.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            hierarchy: self,
            next: self.parent(node),
        }
    }

    #[must_use]
    /// Nearest enclosing headline: the parent, unless that is the root.
    pub fn enclosing_headline(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|parent| !parent.is_root())
    }

    #[must_use]
    /// Contiguous cell range spanned by the subtree at `node`.
    ///
    /// `None` for the root of an empty hierarchy.
    pub fn subtree_range(&self, node: NodeId) -> Option<CellRange> {
        let first = self.cells_of(node).next()?;
        let last = self.block(last_descendant(self, node))?;
        Some(CellRange::new(first.index(), last.index()))
    }

    /// Range from the first sibling of `node` through the end of the subtree at `node`.
    ///
    /// Siblings after `node` are not included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when `node` has no parent (the root, or an id from
    /// another hierarchy).
    pub fn sibling_range(&self, node: NodeId) -> Result<CellRange> {
        let parent = self.parent(node).ok_or_else(|| {
            Error::InvalidRange(format!("node {} has no sibling set", node.index()))
        })?;
        let first = self
            .children(parent)
            .first()
            .and_then(|&first| self.block(first));
        let last = self.block(last_descendant(self, node));
        match (first, last) {
            (Some(first), Some(last)) => Ok(CellRange::new(first.index(), last.index())),
            _ => Err(Error::InvalidRange(format!(
                "node {} spans no cells",
                node.index()
            ))),
        }
    }

    /// Range of the section enclosing `node`: the subtree of its parent headline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when `node` is the root or a direct child of it, since
    /// the root is not a section.
    pub fn parent_range(&self, node: NodeId) -> Result<CellRange> {
        let parent = self
            .parent(node)
            .ok_or_else(|| Error::InvalidRange(format!("node {} has no parent", node.index())))?;
        if parent.is_root() {
            return Err(Error::InvalidRange(format!(
                "node {} is top level and has no enclosing section",
                node.index()
            )));
        }
        self.subtree_range(parent).ok_or_else(|| {
            Error::InvalidRange(format!("section {} spans no cells", parent.index()))
        })
    }
}

#[cfg(test)]
#[path = "tests/navigation.rs"]
mod tests;

//! The outline tree inferred from a flat cell sequence.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]. Ownership runs from
//! parent to children; the parent link is a plain index back into the same arena. Slot 0 is
//! always the synthetic root, which wraps no block.

use crate::block::Block;
use crate::traversal::Tree;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Stable index of a node in its [`Hierarchy`].
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root of every hierarchy.
    pub const ROOT: Self = Self(0);

    #[must_use]
    /// Arena slot of this node.
    pub const fn index(self) -> usize {
        self.0
    }

    #[must_use]
    /// Whether this is the synthetic root.
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One node of the outline.
pub enum HierarchyNode {
    /// Synthetic top of the tree.
    Root {
        /// Top-level nodes in document order.
        children: Vec<NodeId>,
    },
    /// A node wrapping exactly one block.
    Branch {
        /// The wrapped block.
        block: Block,
        /// Concluding heading depth when the block is a headline.
        headline: Option<usize>,
        /// Enclosing node (root or another branch).
        parent: NodeId,
        /// Nested nodes in document order; always empty for plain blocks.
        children: Vec<NodeId>,
    },
}

impl HierarchyNode {
    #[must_use]
    /// Block wrapped by this node; `None` for the root.
    pub const fn block(&self) -> Option<Block> {
        match self {
            Self::Root { .. } => None,
            Self::Branch { block, .. } => Some(*block),
        }
    }

    #[must_use]
    /// Enclosing node; `None` for the root.
    pub const fn parent(&self) -> Option<NodeId> {
        match self {
            Self::Root { .. } => None,
            Self::Branch { parent, .. } => Some(*parent),
        }
    }

    #[must_use]
    /// Directly nested nodes in document order.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Root { children } | Self::Branch { children, .. } => children,
        }
    }

    #[must_use]
    /// Concluding heading depth, when the wrapped block is a headline.
    pub const fn headline(&self) -> Option<usize> {
        match self {
            Self::Root { .. } => None,
            Self::Branch { headline, .. } => *headline,
        }
    }

    fn children_mut(&mut self) -> &mut Vec<NodeId> {
        match self {
            Self::Root { children } | Self::Branch { children, .. } => children,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Arena-backed outline tree rooted at [`NodeId::ROOT`].
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl Hierarchy {
    #[must_use]
    /// A hierarchy holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![HierarchyNode::Root {
                children: Vec::new(),
            }],
        }
    }

    /// Hierarchy with room for `blocks` branches.
    pub(crate) fn with_capacity(blocks: usize) -> Self {
        let mut nodes = Vec::with_capacity(blocks + 1);
        nodes.push(HierarchyNode::Root {
            children: Vec::new(),
        });
        Self { nodes }
    }

    /// Append a branch for `block` under `parent`, linking both directions.
    pub(crate) fn push_branch(
        &mut self,
        parent: NodeId,
        block: Block,
        headline: Option<usize>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HierarchyNode::Branch {
            block,
            headline,
            parent,
            children: Vec::new(),
        });
        self.nodes[parent.0].children_mut().push(id);
        id
    }

    #[must_use]
    /// The root node id.
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[must_use]
    /// Node stored at `id`, if it belongs to this hierarchy.
    pub fn node(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.0)
    }

    #[must_use]
    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether the hierarchy has no branches.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    #[must_use]
    /// Block wrapped by `id`; `None` for the root or an unknown id.
    pub fn block(&self, id: NodeId) -> Option<Block> {
        self.node(id).and_then(HierarchyNode::block)
    }

    #[must_use]
    /// Concluding heading depth of `id` when it wraps a headline.
    pub fn headline(&self, id: NodeId) -> Option<usize> {
        self.node(id).and_then(HierarchyNode::headline)
    }

    /// Every node id in arena order, which is also document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }
}

impl Tree for Hierarchy {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(HierarchyNode::parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        match self.node(node) {
            Some(node) => node.children(),
            None => &[],
        }
    }
}

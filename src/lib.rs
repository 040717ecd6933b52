//! celltree: heading outlines for notebooks, inferred from a flat list of cells.
//!
//! A notebook has no explicit nesting. Its structure is implied by the heading depth of
//! Markdown cells, the same way a Markdown document's outline is implied by `#` counts.
//! celltree classifies each cell, rebuilds that outline as a tree, and answers navigation
//! questions over it: next and previous cell in document order, next sibling section,
//! enclosing headline, and the cell ranges of sections and sibling runs.
//!
//! ```
//! use celltree::block::Cell;
//! use celltree::builder::build_hierarchy;
//! use celltree::formats::markdown::MarkdownClassifier;
//!
//! let cells = vec![
//!     Cell::markdown("# Intro"),
//!     Cell::code("print('hi')"),
//!     Cell::markdown("## Detail"),
//!     Cell::markdown("# Next"),
//! ];
//! let mut classifier = MarkdownClassifier::markdown()?;
//! let hierarchy = build_hierarchy(&cells, &mut classifier);
//!
//! let intro = hierarchy.node_at(0).expect("cell 0 is in the outline");
//! let range = hierarchy.subtree_range(intro).expect("sections span cells");
//! assert_eq!((range.start, range.end), (0, 2));
//! # Ok::<(), celltree::Error>(())
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod block;
pub mod builder;
pub mod commands;
pub mod config;
pub mod edit_plan;
pub mod error;
pub mod formats;
pub mod hierarchy;
pub mod logging;
pub mod navigation;
pub mod notebook;
pub mod outline;
pub mod traversal;

pub use block::{Block, Cell, CellKind, CellRange, CellSequence};
pub use builder::build_hierarchy;
pub use commands::{execute, BlockEditor, Command, Selection, SelectionHost};
pub use error::{Error, Result};
pub use formats::{Classification, Classifier};
pub use hierarchy::{Hierarchy, HierarchyNode, NodeId};
pub use notebook::Notebook;
pub use traversal::Tree;

//! Navigation and selection commands, run against whatever currently holds the selection.
//!
//! Every command re-reads the cell sequence and rebuilds the hierarchy, so there is no cached
//! outline to go stale between commands. A command that cannot resolve a target (nothing
//! selected, selection outside the notebook, top-level node asked for its parent section)
//! leaves the selection untouched and returns `None`.

use crate::block::{Block, CellRange, CellSequence};
use crate::builder::build_hierarchy;
use crate::error::Result;
use crate::formats::Classifier;
use crate::hierarchy::{Hierarchy, NodeId};
use crate::traversal::{backward_and_up, forward_and_over, forward_and_up, previous_sibling, Tree};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Caller-visible moves over the outline.
pub enum Command {
    /// Next cell in document order, descending into a section before leaving it.
    Next,
    /// Previous cell in document order, entering the end of the prior section.
    Previous,
    /// Next sibling section, climbing out of the current one when it is the last.
    NextSibling,
    /// Previous sibling in the same section.
    PreviousSibling,
    /// Nearest enclosing headline.
    Parent,
    /// First cell nested under the current headline.
    FirstChild,
    /// The current cell and everything nested under it.
    SelectSection,
    /// Earlier siblings through the end of the current section.
    SelectSiblings,
    /// The whole section enclosing the current cell.
    SelectParent,
}

/// Read and write access to a host's cell selection.
pub trait SelectionHost {
    /// First selected cell, if anything is selected.
    fn selection_start(&self) -> Option<usize>;

    /// Last selected cell (inclusive), if anything is selected.
    fn selection_end(&self) -> Option<usize>;

    /// Replace the selection with `range`.
    fn set_inclusive_range(&mut self, range: CellRange);

    /// Scroll `range` into view.
    fn reveal(&mut self, _range: CellRange) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// In-memory selection for hosts without one of their own.
pub struct Selection {
    /// Current inclusive range, `None` when nothing is selected.
    pub range: Option<CellRange>,
}

impl Selection {
    #[must_use]
    /// Selection of `start..=end`.
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            range: Some(CellRange::new(start, end)),
        }
    }

    #[must_use]
    /// Selection of a single cell.
    pub const fn cell(index: usize) -> Self {
        Self::new(index, index)
    }
}

impl SelectionHost for Selection {
    fn selection_start(&self) -> Option<usize> {
        self.range.map(|range| range.start)
    }

    fn selection_end(&self) -> Option<usize> {
        self.range.map(|range| range.end)
    }

    fn set_inclusive_range(&mut self, range: CellRange) {
        self.range = Some(range);
    }
}

/// Run `command` from the host's selection start and apply the result to the host.
///
/// Returns the new selection, or `None` when the command had nothing to do.
pub fn execute<S, C, H>(
    command: Command,
    cells: &S,
    classifier: &mut C,
    host: &mut H,
) -> Option<CellRange>
where
    S: CellSequence + ?Sized,
    C: Classifier + ?Sized,
    H: SelectionHost + ?Sized,
{
    let start = host.selection_start()?;
    let Some(block) = cells.block_at(start) else {
        debug!(start, cells = cells.len(), "selection is outside the notebook");
        return None;
    };
    let hierarchy = build_hierarchy(cells, classifier);
    let node = hierarchy.find_node(block)?;
    let target = resolve(command, &hierarchy, node)?;
    debug!(?command, from = start, to = %target, "resolved command");
    host.set_inclusive_range(target);
    host.reveal(target);
    Some(target)
}

#[must_use]
/// Target range of `command` starting at `node`.
pub fn resolve(command: Command, hierarchy: &Hierarchy, node: NodeId) -> Option<CellRange> {
    let goto = |target: Option<NodeId>| {
        target
            .and_then(|id| hierarchy.block(id))
            .map(|block| CellRange::single(block.index()))
    };
    match command {
        Command::Next => goto(forward_and_up(hierarchy, node).next()),
        Command::Previous => goto(backward_and_up(hierarchy, node).next()),
        Command::NextSibling => goto(forward_and_over(hierarchy, node).next()),
        Command::PreviousSibling => goto(previous_sibling(hierarchy, node)),
        Command::Parent => goto(hierarchy.enclosing_headline(node)),
        Command::FirstChild => goto(hierarchy.children(node).first().copied()),
        Command::SelectSection => hierarchy.subtree_range(node),
        Command::SelectSiblings => settle(hierarchy.sibling_range(node)),
        Command::SelectParent => settle(hierarchy.parent_range(node)),
    }
}

fn settle(range: Result<CellRange>) -> Option<CellRange> {
    match range {
        Ok(range) => Some(range),
        Err(error) => {
            debug!(%error, "no range to select");
            None
        }
    }
}

/// Write-back side of a headline depth change, supplied by the document host.
pub trait BlockEditor {
    /// Deepen every heading in `block` by one level.
    ///
    /// # Errors
    ///
    /// Returns whatever the host reports when the rewrite cannot be made.
    fn increment_heading_depth(&mut self, block: Block) -> Result<()>;
}

/// Deepen each headline among `blocks`, skipping plain blocks.
///
/// Returns how many blocks were handed to the editor.
///
/// # Errors
///
/// Stops at and returns the first error from `editor`.
pub fn increment_headlines<S, C, E, I>(
    cells: &S,
    classifier: &mut C,
    blocks: I,
    editor: &mut E,
) -> Result<usize>
where
    S: CellSequence + ?Sized,
    C: Classifier + ?Sized,
    E: BlockEditor + ?Sized,
    I: IntoIterator<Item = Block>,
{
    let mut touched = 0;
    for block in blocks {
        let (Some(kind), Some(text)) = (cells.kind_at(block.index()), cells.text_at(block.index()))
        else {
            continue;
        };
        if classifier.classify(kind, text).is_headline() {
            editor.increment_heading_depth(block)?;
            touched += 1;
        }
    }
    debug!(touched, "incremented headline depth");
    Ok(touched)
}

/// Deepen each headline in the host's current selection.
///
/// # Errors
///
/// Returns the first error from `editor`.
pub fn increment_selection<S, C, H, E>(
    cells: &S,
    classifier: &mut C,
    host: &H,
    editor: &mut E,
) -> Result<usize>
where
    S: CellSequence + ?Sized,
    C: Classifier + ?Sized,
    H: SelectionHost + ?Sized,
    E: BlockEditor + ?Sized,
{
    let (Some(start), Some(end)) = (host.selection_start(), host.selection_end()) else {
        return Ok(0);
    };
    let blocks = (start..=end).map_while(|index| cells.block_at(index));
    increment_headlines(cells, classifier, blocks, editor)
}

#[cfg(test)]
#[path = "tests/commands.rs"]
mod tests;

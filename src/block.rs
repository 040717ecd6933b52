//! Blocks are handles into a cell sequence owned by somebody else.
//!
//! The hierarchy never copies cell text. It holds [`Block`] handles (positions in the host's
//! sequence) and asks the [`CellSequence`] for kind and text when it needs to classify.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// What sort of content a cell carries.
pub enum CellKind {
    /// Markdown prose; the only kind that can be a headline.
    Markdown,
    /// Executable source.
    Code,
    /// Raw passthrough content.
    Raw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Opaque handle to one cell, identified by its 0-based position in the sequence.
pub struct Block(usize);

impl Block {
    #[must_use]
    /// Wraps a position in the cell sequence.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    /// Position of this block in the sequence it came from.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {}", self.0)
    }
}

/// Random access into an externally owned, ordered list of cells.
pub trait CellSequence {
    /// Number of cells in the sequence.
    fn len(&self) -> usize;

    /// Kind of the cell at `index`, or `None` when out of bounds.
    fn kind_at(&self, index: usize) -> Option<CellKind>;

    /// Text of the cell at `index`, or `None` when out of bounds.
    fn text_at(&self, index: usize) -> Option<&str>;

    /// Whether the sequence has no cells.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handle for the cell at `index`; out-of-bounds positions resolve to `None`.
    fn block_at(&self, index: usize) -> Option<Block> {
        (index < self.len()).then_some(Block::new(index))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An owned cell, used by the notebook host and handy for building sequences in memory.
pub struct Cell {
    /// Content kind.
    pub kind: CellKind,
    /// Full cell text, lines joined with `\n`.
    pub source: String,
}

impl Cell {
    /// Markdown cell with the given text.
    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Markdown,
            source: source.into(),
        }
    }

    /// Code cell with the given text.
    pub fn code(source: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Code,
            source: source.into(),
        }
    }
}

impl CellSequence for [Cell] {
    fn len(&self) -> usize {
        <[Cell]>::len(self)
    }

    fn kind_at(&self, index: usize) -> Option<CellKind> {
        self.get(index).map(|cell| cell.kind)
    }

    fn text_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(|cell| cell.source.as_str())
    }
}

impl CellSequence for Vec<Cell> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn kind_at(&self, index: usize) -> Option<CellKind> {
        self.as_slice().kind_at(index)
    }

    fn text_at(&self, index: usize) -> Option<&str> {
        self.as_slice().text_at(index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Inclusive span of cell positions, the unit a selection host works in.
pub struct CellRange {
    /// First cell in the range.
    pub start: usize,
    /// Last cell in the range (inclusive).
    pub end: usize,
}

impl CellRange {
    #[must_use]
    /// Range covering both ends, whichever order they are given in.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[must_use]
    /// Range covering a single cell.
    pub const fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    #[must_use]
    /// Whether `index` falls inside the range.
    pub const fn contains(self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..={}", self.start, self.end)
        }
    }
}

#[cfg(test)]
#[path = "tests/block.rs"]
mod tests;

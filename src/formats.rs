//! Format trait and the block classifier built on it.
//!
//! A [`Format`] supplies the tree-sitter grammar and heading query for one markup language.
//! [`FormatClassifier`] runs that query over a cell's text to decide whether the cell is a
//! headline and, if so, at what depth it concludes.

pub mod markdown;

use crate::block::CellKind;
use crate::error::Result;
use std::borrow::Cow;
use streaming_iterator::StreamingIterator;
use tracing::warn;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Grammar and heading query for a markup language.
pub trait Format {
    /// Tree-sitter grammar for the format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading node.
    fn heading_query(&self) -> &str;
    /// Heading depth of a captured heading node (1 for a top-level heading).
    fn heading_depth(&self, heading: Node<'_>) -> Option<usize>;
    /// Marker node that a deeper heading would extend, if the heading style has one.
    fn depth_marker<'t>(&self, heading: Node<'t>) -> Option<Node<'t>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A heading found in a block's text.
pub struct Heading {
    /// Byte offset where the heading starts.
    pub start: usize,
    /// Heading depth (1 for a top-level heading).
    pub depth: usize,
    /// Byte offset of the depth marker (`#` run), for marker-style headings.
    pub marker: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a block participates in the outline.
pub enum Classification {
    /// Ordinary content; always a leaf.
    Plain,
    /// Introduces a heading and concludes at `depth`.
    Headline {
        /// Depth of the last heading marker in the block.
        depth: usize,
    },
}

impl Classification {
    #[must_use]
    /// Whether the block introduces a heading.
    pub const fn is_headline(self) -> bool {
        matches!(self, Self::Headline { .. })
    }

    #[must_use]
    /// Concluding depth for headlines, `None` for plain blocks.
    pub const fn depth(self) -> Option<usize> {
        match self {
            Self::Plain => None,
            Self::Headline { depth } => Some(depth),
        }
    }
}

/// Decides whether a block is a headline.
pub trait Classifier {
    /// Classify one block from its kind and text.
    fn classify(&mut self, kind: CellKind, text: &str) -> Classification;
}

impl<F> Classifier for F
where
    F: FnMut(CellKind, &str) -> Classification,
{
    fn classify(&mut self, kind: CellKind, text: &str) -> Classification {
        self(kind, text)
    }
}

/// Classifier that parses each Markdown cell with a tree-sitter grammar.
pub struct FormatClassifier<F: Format> {
    format: F,
    parser: Parser,
    query: Query,
}

impl<F: Format> FormatClassifier<F> {
    /// Load the format's grammar and compile its heading query.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar is incompatible with the linked tree-sitter or the
    /// heading query does not compile.
    pub fn new(format: F) -> Result<Self> {
        let language = format.language();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let query = Query::new(&language, format.heading_query())?;
        Ok(Self {
            format,
            parser,
            query,
        })
    }

    /// Every heading in `text`, in document order.
    ///
    /// A final line without a newline is parsed as if it had one, since the grammar only
    /// closes a heading at a line ending and notebook cells usually omit the last one.
    pub fn headings(&mut self, text: &str) -> Vec<Heading> {
        let source: Cow<'_, str> = if text.is_empty() || text.ends_with('\n') {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(format!("{text}\n"))
        };
        let Some(tree) = self.parser.parse(source.as_bytes(), None) else {
            warn!(bytes = text.len(), "markdown parse failed, treating cell as plain");
            return Vec::new();
        };

        let mut headings = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, tree.root_node(), source.as_bytes());
        while let Some(query_match) = matches.next() {
            for capture in query_match.captures {
                let node = capture.node;
                let Some(depth) = self.format.heading_depth(node) else {
                    continue;
                };
                headings.push(Heading {
                    start: node.start_byte(),
                    depth,
                    marker: self
                        .format
                        .depth_marker(node)
                        .map(|marker| marker.start_byte()),
                });
            }
        }
        headings.sort_by_key(|heading| heading.start);
        headings
    }

    /// Add one level to every marker-style heading in `text` shallower than `max_depth`.
    ///
    /// Headings inside code blocks are not headings to the grammar and stay as written, as do
    /// underlined headings, which have no deeper form past level 2.
    pub fn deepen_headings(&mut self, text: &str, max_depth: usize) -> String {
        let mut out = text.to_string();
        let markers: Vec<usize> = self
            .headings(text)
            .into_iter()
            .filter(|heading| heading.depth < max_depth)
            .filter_map(|heading| heading.marker)
            .collect();
        // back to front so earlier offsets stay valid
        for marker in markers.into_iter().rev() {
            out.insert(marker, '#');
        }
        out
    }
}

impl<F: Format> Classifier for FormatClassifier<F> {
    fn classify(&mut self, kind: CellKind, text: &str) -> Classification {
        if kind != CellKind::Markdown {
            return Classification::Plain;
        }
        self.headings(text)
            .last()
            .map_or(Classification::Plain, |heading| Classification::Headline {
                depth: heading.depth,
            })
    }
}


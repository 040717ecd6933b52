//! Markdown format implementation using tree-sitter-md.
//!
//! Both ATX (`#` prefixed) and setext (underlined) headings count towards a cell's
//! concluding depth. Only ATX headings have a marker that can be deepened.

use crate::error::Result;
use crate::formats::{Format, FormatClassifier};
use tree_sitter::Node;

/// Tree-sitter queries for Markdown headings.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading"
    }

    fn heading_depth(&self, heading: Node<'_>) -> Option<usize> {
        let mut walker = heading.walk();
        let depth = heading.children(&mut walker).find_map(|child| match child.kind() {
            "atx_h1_marker" | "setext_h1_underline" => Some(1),
            "atx_h2_marker" | "setext_h2_underline" => Some(2),
            "atx_h3_marker" => Some(3),
            "atx_h4_marker" => Some(4),
            "atx_h5_marker" => Some(5),
            "atx_h6_marker" => Some(6),
            _ => None,
        });
        depth
    }

    fn depth_marker<'t>(&self, heading: Node<'t>) -> Option<Node<'t>> {
        let mut walker = heading.walk();
        let marker = heading.children(&mut walker).find(|child| {
            let kind = child.kind();
            kind.starts_with("atx_h") && kind.ends_with("_marker")
        });
        marker
    }
}

/// Headline classifier for Markdown cells.
pub type MarkdownClassifier = FormatClassifier<MarkdownFormat>;

impl MarkdownClassifier {
    /// Classifier backed by the tree-sitter-md block grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar or heading query fails to load.
    pub fn markdown() -> Result<Self> {
        Self::new(MarkdownFormat)
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;

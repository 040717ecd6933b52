//! Renders a hierarchy for people (a box-drawn tree) and for programs (nested JSON entries).

use crate::block::{CellKind, CellSequence};
use crate::hierarchy::{Hierarchy, NodeId};
use crate::traversal::Tree;
use serde::Serialize;
use std::fmt::Write;

const SNIPPET_CHARS: usize = 48;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One node of a rendered outline.
pub struct OutlineEntry {
    /// Position of the cell in the sequence.
    pub cell: usize,
    /// Concluding heading depth for headlines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<usize>,
    /// First non-blank line of the cell, shortened.
    pub label: String,
    /// Nested entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineEntry>,
}

/// First non-blank line of `text`, cut to a readable length.
///
/// Headline markers are dropped since the depth is shown separately.
fn snippet(text: &str, headline: bool) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let line = if headline {
        line.trim_start_matches('#').trim_start()
    } else {
        line
    };
    if line.chars().count() > SNIPPET_CHARS {
        let cut: String = line.chars().take(SNIPPET_CHARS - 1).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}

fn entry<S: CellSequence + ?Sized>(
    hierarchy: &Hierarchy,
    cells: &S,
    node: NodeId,
) -> Option<OutlineEntry> {
    let block = hierarchy.block(node)?;
    let headline = hierarchy.headline(node);
    Some(OutlineEntry {
        cell: block.index(),
        headline,
        label: snippet(
            cells.text_at(block.index()).unwrap_or_default(),
            headline.is_some(),
        ),
        children: entries_under(hierarchy, cells, node),
    })
}

fn entries_under<S: CellSequence + ?Sized>(
    hierarchy: &Hierarchy,
    cells: &S,
    node: NodeId,
) -> Vec<OutlineEntry> {
    hierarchy
        .children(node)
        .iter()
        .filter_map(|&child| entry(hierarchy, cells, child))
        .collect()
}

/// Nested entries for every top-level node of `hierarchy`.
pub fn outline_entries<S: CellSequence + ?Sized>(
    hierarchy: &Hierarchy,
    cells: &S,
) -> Vec<OutlineEntry> {
    entries_under(hierarchy, cells, hierarchy.root())
}

fn marker<S: CellSequence + ?Sized>(hierarchy: &Hierarchy, cells: &S, node: NodeId) -> String {
    if let Some(depth) = hierarchy.headline(node) {
        return "#".repeat(depth);
    }
    let kind = hierarchy
        .block(node)
        .and_then(|block| cells.kind_at(block.index()));
    match kind {
        Some(CellKind::Code) => "code".to_string(),
        Some(CellKind::Raw) => "raw".to_string(),
        Some(CellKind::Markdown) | None => "md".to_string(),
    }
}

/// Write the children of `node`, each line led by `indent` plus a branch glyph.
///
/// Top-level entries (`indent` of `None`) get no glyph; their children start the rails.
fn render_level<S: CellSequence + ?Sized>(
    hierarchy: &Hierarchy,
    cells: &S,
    node: NodeId,
    indent: Option<&str>,
    out: &mut String,
) {
    let children = hierarchy.children(node);
    for (i, &child) in children.iter().enumerate() {
        let Some(block) = hierarchy.block(child) else {
            continue;
        };
        let (lead, nested) = match indent {
            None => (String::new(), String::new()),
            Some(indent) if i + 1 == children.len() => {
                (format!("{indent}└── "), format!("{indent}    "))
            }
            Some(indent) => (format!("{indent}├── "), format!("{indent}│   ")),
        };
        let text = cells.text_at(block.index()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{lead}[{}] {} {}",
            block.index(),
            marker(hierarchy, cells, child),
            snippet(text, hierarchy.headline(child).is_some()),
        );
        render_level(hierarchy, cells, child, Some(&nested), out);
    }
}

/// Box-drawn text tree of `hierarchy`, one cell per line.
pub fn render_outline<S: CellSequence + ?Sized>(hierarchy: &Hierarchy, cells: &S) -> String {
    let mut out = String::new();
    render_level(hierarchy, cells, hierarchy.root(), None, &mut out);
    out
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;

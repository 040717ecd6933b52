//! Jupyter notebook host: reads `.ipynb` files into a cell sequence and writes edits back.
//!
//! The original JSON document is kept alongside the parsed cells so that saving only touches
//! the `source` of cells that were edited; metadata, outputs, and unknown fields survive.

use crate::block::{Block, Cell, CellKind, CellSequence};
use crate::commands::BlockEditor;
use crate::edit_plan::{Edit, EditPlan};
use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownClassifier;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
struct RawNotebook {
    cells: Vec<RawCell>,
}

#[derive(Deserialize)]
struct RawCell {
    cell_type: String,
    #[serde(default)]
    source: RawSource,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for RawSource {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl RawSource {
    fn into_text(self) -> String {
        match self {
            Self::Lines(lines) => lines.concat(),
            Self::Text(text) => text,
        }
    }
}

fn cell_kind(cell_type: &str) -> Result<CellKind> {
    match cell_type {
        "markdown" => Ok(CellKind::Markdown),
        "code" => Ok(CellKind::Code),
        "raw" => Ok(CellKind::Raw),
        other => Err(Error::Notebook(format!("unknown cell type {other:?}"))),
    }
}

const fn cell_type(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Markdown => "markdown",
        CellKind::Code => "code",
        CellKind::Raw => "raw",
    }
}

/// Split cell text into nbformat's line list, each line keeping its newline.
fn source_lines(text: &str) -> Value {
    Value::Array(
        text.split_inclusive('\n')
            .map(|line| Value::String(line.to_string()))
            .collect(),
    )
}

#[derive(Clone, Debug)]
/// A loaded notebook: parsed cells plus the JSON document they came from.
pub struct Notebook {
    document: Value,
    cells: Vec<Cell>,
}

impl Notebook {
    #[must_use]
    /// Minimal nbformat 4 notebook holding `cells`.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        let raw_cells: Vec<Value> = cells
            .iter()
            .map(|cell| {
                json!({
                    "cell_type": cell_type(cell.kind),
                    "metadata": {},
                    "source": source_lines(&cell.source),
                })
            })
            .collect();
        let document = json!({
            "cells": raw_cells,
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5,
        });
        Self { document, cells }
    }

    /// Parse notebook JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON, has no `cells` array, or contains a cell type
    /// other than markdown, code, or raw.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        let raw: RawNotebook = serde_json::from_value(document.clone())?;
        let cells = raw
            .cells
            .into_iter()
            .map(|cell| {
                Ok(Cell {
                    kind: cell_kind(&cell.cell_type)?,
                    source: cell.source.into_text(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { document, cells })
    }

    /// Read and parse a notebook file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    #[must_use]
    /// Parsed cells in notebook order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Replace the text of the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notebook has no such cell.
    pub fn set_source(&mut self, index: usize, source: &str) -> Result<()> {
        let missing = || Error::Notebook(format!("notebook has no cell {index}"));
        let cell = self.cells.get_mut(index).ok_or_else(missing)?;
        let raw = self
            .document
            .get_mut("cells")
            .and_then(|cells| cells.get_mut(index))
            .and_then(Value::as_object_mut)
            .ok_or_else(missing)?;
        raw.insert("source".to_string(), source_lines(source));
        cell.source = source.to_string();
        Ok(())
    }

    /// Serialise the notebook back to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.document)?;
        text.push('\n');
        Ok(text)
    }

    /// Write the notebook to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl CellSequence for Notebook {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn kind_at(&self, index: usize) -> Option<CellKind> {
        self.cells.kind_at(index)
    }

    fn text_at(&self, index: usize) -> Option<&str> {
        self.cells.text_at(index)
    }
}

/// [`BlockEditor`] that records heading rewrites of a notebook's cells in an [`EditPlan`].
///
/// Headings are found with the same Markdown grammar the classifier uses, so a rewrite only
/// ever touches what the outline treats as a heading.
pub struct HeadingEditor<'n> {
    notebook: &'n Notebook,
    markdown: MarkdownClassifier,
    max_depth: usize,
    plan: EditPlan,
}

impl<'n> HeadingEditor<'n> {
    /// Editor for `notebook` that never deepens a heading past `max_depth`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Markdown grammar fails to load.
    pub fn new(notebook: &'n Notebook, max_depth: usize) -> Result<Self> {
        Ok(Self {
            notebook,
            markdown: MarkdownClassifier::markdown()?,
            max_depth,
            plan: EditPlan::default(),
        })
    }

    #[must_use]
    /// The rewrites recorded so far.
    pub fn into_plan(self) -> EditPlan {
        self.plan
    }
}

impl BlockEditor for HeadingEditor<'_> {
    fn increment_heading_depth(&mut self, block: Block) -> Result<()> {
        let notebook = self.notebook;
        let text = notebook
            .text_at(block.index())
            .ok_or_else(|| Error::Notebook(format!("{block} is not in the notebook")))?;
        let source = self.markdown.deepen_headings(text, self.max_depth);
        if source != text {
            let item_name = self
                .markdown
                .headings(text)
                .first()
                .and_then(|heading| text[heading.start..].lines().next())
                .unwrap_or_default()
                .trim()
                .to_string();
            debug!(cell = block.index(), item = %item_name, "deepened headings");
            self.plan.push(Edit {
                cell_index: block.index(),
                source,
                item_name,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/notebook.rs"]
mod tests;

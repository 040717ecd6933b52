use super::{HeadingEditor, Notebook};
use crate::block::{Block, Cell, CellKind, CellSequence};
use crate::builder::build_hierarchy;
use crate::commands::BlockEditor;
use crate::error::Error;
use crate::formats::markdown::MarkdownClassifier;
use crate::traversal::Tree;
use serde_json::Value;
use tempfile::NamedTempFile;

const NOTEBOOK: &str = r###"{
  "cells": [
    {
      "cell_type": "markdown",
      "id": "intro",
      "metadata": {},
      "source": ["# Analysis\n", "\n", "Loading the data."]
    },
    {
      "cell_type": "code",
      "execution_count": 1,
      "id": "load",
      "metadata": {"tags": ["setup"]},
      "outputs": [],
      "source": "import pandas as pd"
    },
    {
      "cell_type": "markdown",
      "id": "results",
      "metadata": {},
      "source": ["## Results"]
    },
    {
      "cell_type": "raw",
      "id": "notes",
      "metadata": {},
      "source": []
    }
  ],
  "metadata": {"kernelspec": {"name": "python3"}},
  "nbformat": 4,
  "nbformat_minor": 5
}"###;

#[test]
fn test_from_json_reads_cells() {
    let nb = Notebook::from_json(NOTEBOOK).unwrap();

    assert_eq!(nb.len(), 4);
    assert_eq!(nb.kind_at(0), Some(CellKind::Markdown));
    assert_eq!(nb.kind_at(1), Some(CellKind::Code));
    assert_eq!(nb.kind_at(3), Some(CellKind::Raw));
    assert_eq!(nb.text_at(0), Some("# Analysis\n\nLoading the data."));
    assert_eq!(nb.text_at(1), Some("import pandas as pd"));
    assert_eq!(nb.text_at(3), Some(""));
    assert_eq!(nb.text_at(4), None);
}

#[test]
fn test_unknown_cell_type_is_rejected() {
    let text = r#"{"cells": [{"cell_type": "widget", "source": ""}]}"#;
    assert!(matches!(Notebook::from_json(text), Err(Error::Notebook(_))));
}

#[test]
fn test_missing_cells_is_rejected() {
    assert!(matches!(Notebook::from_json("{}"), Err(Error::Json(_))));
    assert!(matches!(Notebook::from_json("not json"), Err(Error::Json(_))));
}

#[test]
fn test_set_source_keeps_other_fields() {
    let mut nb = Notebook::from_json(NOTEBOOK).unwrap();
    nb.set_source(0, "## Analysis\n\nLoading the data.").unwrap();

    assert_eq!(nb.text_at(0), Some("## Analysis\n\nLoading the data."));

    let saved: Value = serde_json::from_str(&nb.to_json().unwrap()).unwrap();
    assert_eq!(
        saved["cells"][0]["source"],
        serde_json::json!(["## Analysis\n", "\n", "Loading the data."])
    );
    assert_eq!(saved["cells"][0]["id"], "intro");
    assert_eq!(saved["cells"][1]["metadata"]["tags"][0], "setup");
    assert_eq!(saved["cells"][1]["execution_count"], 1);
    assert_eq!(saved["metadata"]["kernelspec"]["name"], "python3");
}

#[test]
fn test_set_source_out_of_range() {
    let mut nb = Notebook::from_json(NOTEBOOK).unwrap();
    assert!(matches!(nb.set_source(9, "# x"), Err(Error::Notebook(_))));
}

#[test]
fn test_save_and_reload() {
    let file = NamedTempFile::new().unwrap();
    let nb = Notebook::from_cells(vec![Cell::markdown("# Title\nbody"), Cell::code("x = 1")]);
    nb.save(file.path()).unwrap();

    let reloaded = Notebook::load(file.path()).unwrap();
    assert_eq!(reloaded.cells(), nb.cells());
}

#[test]
fn test_heading_only_cells_shape_the_outline() {
    let text = r###"{
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Intro"]},
    {"cell_type": "code", "metadata": {}, "outputs": [], "source": ["x = 1\n", "x"]},
    {"cell_type": "markdown", "metadata": {}, "source": ["## Detail"]},
    {"cell_type": "markdown", "metadata": {}, "source": ["# Next"]}
  ],
  "metadata": {},
  "nbformat": 4,
  "nbformat_minor": 5
}"###;
    let nb = Notebook::from_json(text).unwrap();
    let mut classifier = MarkdownClassifier::markdown().unwrap();
    let hierarchy = build_hierarchy(&nb, &mut classifier);

    let top: Vec<usize> = hierarchy
        .children(hierarchy.root())
        .iter()
        .filter_map(|&id| hierarchy.block(id))
        .map(|block| block.index())
        .collect();
    assert_eq!(top, vec![0, 3]);
    let intro = hierarchy.node_at(0).unwrap();
    assert_eq!(hierarchy.children(intro).len(), 2);
    assert_eq!(hierarchy.headline(hierarchy.node_at(2).unwrap()), Some(2));
}

fn deepened(text: &str, max_depth: usize) -> Option<String> {
    let nb = Notebook::from_cells(vec![Cell::markdown(text)]);
    let mut editor = HeadingEditor::new(&nb, max_depth).unwrap();
    editor.increment_heading_depth(Block::new(0)).unwrap();
    editor.into_plan().edits.pop().map(|edit| edit.source)
}

#[test]
fn test_heading_editor_deepens_every_heading() {
    assert_eq!(deepened("# Title", 6).as_deref(), Some("## Title"));
    assert_eq!(
        deepened("# A\n\ntext\n\n## B", 6).as_deref(),
        Some("## A\n\ntext\n\n### B")
    );
    assert_eq!(deepened("  ## Indented", 6).as_deref(), Some("  ### Indented"));
}

#[test]
fn test_heading_editor_stops_at_max_depth() {
    assert_eq!(deepened("###### Six", 6), None);
    assert_eq!(
        deepened("## Two\n### Three", 3).as_deref(),
        Some("### Two\n### Three")
    );
}

#[test]
fn test_heading_editor_leaves_code_blocks_alone() {
    assert_eq!(
        deepened("# Real\n\n````\n```\n# comment\n````\n", 6).as_deref(),
        Some("## Real\n\n````\n```\n# comment\n````\n")
    );
    assert_eq!(deepened("    # indented code", 6), None);
}

#[test]
fn test_heading_editor_reaches_quoted_headings() {
    assert_eq!(deepened("> # Quoted", 6).as_deref(), Some("> ## Quoted"));
}

#[test]
fn test_heading_editor_skips_what_is_not_a_heading() {
    assert_eq!(deepened("#hashtag", 6), None);
    assert_eq!(deepened("Title\n=====", 6), None);
}

#[test]
fn test_heading_editor_records_changes() {
    let nb = Notebook::from_json(NOTEBOOK).unwrap();
    let mut editor = HeadingEditor::new(&nb, 6).unwrap();
    editor.increment_heading_depth(Block::new(0)).unwrap();
    editor.increment_heading_depth(Block::new(2)).unwrap();
    let plan = editor.into_plan();

    assert_eq!(plan.edits.len(), 2);
    assert_eq!(plan.edits[0].cell_index, 0);
    assert_eq!(plan.edits[0].source, "## Analysis\n\nLoading the data.");
    assert_eq!(plan.edits[0].item_name, "# Analysis");
    assert_eq!(plan.edits[1].source, "### Results");
}

#[test]
fn test_heading_editor_skips_unchanged_cells() {
    let nb = Notebook::from_cells(vec![Cell::markdown("###### Deep"), Cell::markdown("text")]);
    let mut editor = HeadingEditor::new(&nb, 6).unwrap();
    editor.increment_heading_depth(Block::new(0)).unwrap();
    editor.increment_heading_depth(Block::new(1)).unwrap();

    assert!(editor.into_plan().is_empty());
}

#[test]
fn test_heading_editor_rejects_missing_block() {
    let nb = Notebook::from_cells(vec![Cell::markdown("# Only")]);
    let mut editor = HeadingEditor::new(&nb, 6).unwrap();
    assert!(matches!(
        editor.increment_heading_depth(Block::new(3)),
        Err(Error::Notebook(_))
    ));
}

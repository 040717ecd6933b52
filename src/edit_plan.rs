//! The edit plan collects cell rewrites so they can be reviewed, saved, and applied later.
//!
//! Headline changes are never written straight into a notebook. The host's editor records
//! each rewrite as an [`Edit`]; the plan can be serialised to JSON, loaded back, and applied
//! to a [`Notebook`] in one go.

use crate::error::Result;
use crate::notebook::Notebook;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Serialisable collection of cell rewrites.
pub struct EditPlan {
    /// Rewrites in the order they were recorded.
    pub edits: Vec<Edit>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Replacement text for one cell.
pub struct Edit {
    /// Position of the cell in the notebook.
    pub cell_index: usize,
    /// New full text of the cell.
    pub source: String,
    /// Heading line the edit was made for, for tracking and review.
    pub item_name: String,
}

impl EditPlan {
    #[must_use]
    /// Whether the plan has nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Add an edit, replacing any earlier edit to the same cell.
    pub fn push(&mut self, edit: Edit) {
        self.edits.retain(|e| e.cell_index != edit.cell_index);
        self.edits.push(edit);
    }

    /// Apply every edit to `notebook`.
    ///
    /// Edits are applied in order; the notebook is left partly updated if one fails.
    ///
    /// # Errors
    ///
    /// Returns an error if an edit targets a cell the notebook does not have.
    pub fn apply(&self, notebook: &mut Notebook) -> Result<()> {
        for edit in &self.edits {
            notebook.set_source(edit.cell_index, &edit.source)?;
        }
        Ok(())
    }

    /// Load a plan saved with [`EditPlan::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a plan.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the plan as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;

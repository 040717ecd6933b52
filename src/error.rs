//! Error types shared by the library and the command-line host.
//!
//! Looking something up and not finding it is not an error here: lookups return `Option`.
//! An [`Error`] means a caller broke a precondition (asking for the sibling set of the root)
//! or an outer collaborator failed (grammar loading, file IO, malformed notebook JSON).

use thiserror::Error;

#[derive(Debug, Error)]
/// Failures surfaced by hierarchy navigation and the notebook host.
pub enum Error {
    /// A range was requested for a node that has no parent set to range over.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The tree-sitter Markdown grammar could not be loaded.
    #[error("failed to load markdown grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The heading query did not compile against the grammar.
    #[error("invalid heading query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// `celltree.toml` could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The notebook JSON parsed but does not have the expected shape.
    #[error("notebook format error: {0}")]
    Notebook(String),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Notebook or edit plan JSON could not be (de)serialised.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

//! celltree: heading outline navigation for Jupyter notebooks.
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use celltree::builder::build_hierarchy;
use celltree::commands::{self, Command, Selection, SelectionHost};
use celltree::config::Config;
use celltree::edit_plan::EditPlan;
use celltree::formats::markdown::MarkdownClassifier;
use celltree::logging::{self, Verbosity};
use celltree::notebook::{HeadingEditor, Notebook};
use celltree::outline;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "celltree")]
#[command(about = "Heading outline navigation for notebook cells", long_about = None)]
struct Args {
    /// Notebook (.ipynb) to read
    #[arg(value_name = "NOTEBOOK")]
    notebook: PathBuf,

    /// Configuration file [default: ./celltree.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log debug events to stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Log errors only
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the heading outline inferred from the cells
    Outline,
    /// Run a navigation or selection command from a cell
    Go {
        /// Command to run
        #[arg(value_enum)]
        command: Command,
        /// First selected cell
        #[arg(long)]
        cell: usize,
        /// Last selected cell [default: same as --cell]
        #[arg(long)]
        end: Option<usize>,
    },
    /// Deepen every headline in the selected cells by one level
    Increment {
        /// First selected cell
        #[arg(long)]
        cell: usize,
        /// Last selected cell [default: same as --cell]
        #[arg(long)]
        end: Option<usize>,
        /// Rewrite the notebook in place
        #[arg(long)]
        write: bool,
        /// Save the edit plan as JSON
        #[arg(long, value_name = "FILE")]
        plan: Option<PathBuf>,
    },
    /// Apply an edit plan saved by `increment --plan`
    Apply {
        /// Edit plan JSON file
        #[arg(value_name = "FILE")]
        plan: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let verbosity = if args.verbose {
        Verbosity::Verbose
    } else if args.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };
    logging::init(verbosity, &cfg.log_level);

    let json = args.json || cfg.json;
    let notebook = Notebook::load(&args.notebook)
        .with_context(|| format!("reading {}", args.notebook.display()))?;
    let mut classifier = MarkdownClassifier::markdown()?;

    match args.action {
        Action::Outline => {
            let hierarchy = build_hierarchy(&notebook, &mut classifier);
            if json {
                let entries = outline::outline_entries(&hierarchy, &notebook);
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", outline::render_outline(&hierarchy, &notebook));
            }
        }
        Action::Go { command, cell, end } => {
            let mut selection = Selection::new(cell, end.unwrap_or(cell));
            let moved = commands::execute(command, &notebook, &mut classifier, &mut selection);
            report_selection(command, moved, &selection, json)?;
        }
        Action::Increment {
            cell,
            end,
            write,
            plan,
        } => {
            let selection = Selection::new(cell, end.unwrap_or(cell));
            let mut editor = HeadingEditor::new(&notebook, cfg.max_heading_depth)?;
            commands::increment_selection(&notebook, &mut classifier, &selection, &mut editor)?;
            let edit_plan = editor.into_plan();
            finish_plan(notebook, &args.notebook, &edit_plan, write, plan.as_deref(), json)?;
        }
        Action::Apply { plan } => {
            let edit_plan = EditPlan::load(&plan)
                .with_context(|| format!("reading edit plan {}", plan.display()))?;
            finish_plan(notebook, &args.notebook, &edit_plan, true, None, json)?;
        }
    }

    Ok(())
}

fn report_selection(
    command: Command,
    moved: Option<celltree::CellRange>,
    selection: &Selection,
    json: bool,
) -> Result<()> {
    if json {
        let report = json!({
            "command": command,
            "moved": moved.is_some(),
            "selection": selection.range,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let (Some(start), Some(end)) = (selection.selection_start(), selection.selection_end())
    {
        let status = if moved.is_some() { "" } else { " (unchanged)" };
        if start == end {
            println!("{start}{status}");
        } else {
            println!("{start}..={end}{status}");
        }
    }
    Ok(())
}

fn finish_plan(
    mut notebook: Notebook,
    notebook_path: &Path,
    edit_plan: &EditPlan,
    write: bool,
    plan_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    if let Some(path) = plan_path {
        edit_plan
            .save(path)
            .with_context(|| format!("writing edit plan {}", path.display()))?;
    }

    if write && !edit_plan.is_empty() {
        edit_plan.apply(&mut notebook)?;
        notebook
            .save(notebook_path)
            .with_context(|| format!("writing {}", notebook_path.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(edit_plan)?);
    } else if edit_plan.is_empty() {
        println!("No headlines to change");
    } else {
        for edit in &edit_plan.edits {
            println!("[{}] {}", edit.cell_index, edit.item_name);
        }
    }
    Ok(())
}

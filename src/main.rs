//! # taskpad - file-backed to-do list
//!
//! A small task manager for the terminal: add, edit, complete, and delete
//! short text tasks carrying a priority and a status label, then search and
//! filter them from the CLI or an interactive TUI.
//!
//! ## Quick start
//!
//! ```bash
//! # Add a task via CLI
//! taskpad add "Buy milk" --priority low
//!
//! # List tasks, searched and filtered
//! taskpad list --search milk --priority low
//!
//! # Mark it done / reopen it
//! taskpad toggle 1714650123456
//!
//! # Or manage everything interactively
//! taskpad ui
//! ```
//!
//! Tasks are stored as a single JSON array in `~/.taskpad/todos.json`
//! (override with `--db`). The file is rewritten atomically after every
//! change and re-read on startup, so the list survives between sessions.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod filter;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use storage::JsonFile;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    // Completions need no store at all.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let dir = PathBuf::from(home).join(".taskpad");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Failed to create taskpad directory {}: {}", dir.display(), e);
            std::process::exit(1);
        }
        dir.join("todos.json")
    });

    let mut store = match TaskStore::open(Box::new(JsonFile::new(db_path))) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load tasks: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Ui => cmd_ui(store),

        Commands::Add { text, priority, status } => cmd_add(&mut store, text, priority, status),

        Commands::List { search, priority, status } => cmd_list(&store, search, priority, status),

        Commands::View { id } => cmd_view(&store, id),

        Commands::Edit { id, text, priority, status } =>
            cmd_edit(&mut store, id, text, priority, status),

        Commands::Toggle { id } => cmd_toggle(&mut store, id),

        Commands::Delete { id } => cmd_delete(&mut store, id),

        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}

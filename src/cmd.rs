//! Command implementations for the CLI interface.
//!
//! One handler per subcommand. The store keeps invalid input as silent
//! no-ops; the handlers here are the user-facing surface, so they turn
//! those no-ops into messages and exit codes.

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use chrono::Local;

use crate::cli::Cli;
use crate::fields::{format_priority, format_status, Priority, Status};
use crate::filter::TaskFilter;
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// The task text.
        text: String,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Status: not-started | in-progress | completed.
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// List tasks, optionally searched and filtered.
    List {
        /// Show only tasks whose text contains this term (case-insensitive).
        #[arg(long)]
        search: Option<String>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// View a single task by ID.
    View {
        /// Task ID to view.
        id: u64,
    },

    /// Replace a task's text and optionally its priority/status.
    Edit {
        /// Task ID to edit.
        id: u64,
        /// New task text.
        text: String,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Toggle a task's completion flag.
    Toggle {
        /// Task ID to toggle.
        id: u64,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID to delete.
        id: u64,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(store: TaskStore) {
    if let Err(e) = run_tui(store) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the store.
pub fn cmd_add(store: &mut TaskStore, text: String, priority: Priority, status: Option<Status>) {
    match store.add(&text, priority, status) {
        Ok(Some(id)) => println!("Added task {id}"),
        Ok(None) => {
            eprintln!("Task text cannot be empty.");
            std::process::exit(1);
        }
        Err(e) => fail_save(e),
    }
}

/// List tasks through the view-layer filter.
pub fn cmd_list(
    store: &TaskStore,
    search: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
) {
    let filter = TaskFilter {
        search: search.unwrap_or_default(),
        priority,
        status,
    };
    let visible = filter.apply(store.tasks());
    print_table(&visible);
    if visible.is_empty() && filter.is_active() {
        println!("(no tasks match)");
    }
}

/// View a single task in detail.
pub fn cmd_view(store: &TaskStore, id: u64) {
    let Some(task) = store.get(id) else {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    };
    println!("ID:        {}", task.id);
    println!("Text:      {}", task.text);
    println!("Completed: {}", if task.completed { "yes" } else { "no" });
    println!("Priority:  {}", format_priority(task.priority));
    println!("Status:    {}", format_status(task.status));
    println!("Created:   {}", task.created_at.to_rfc3339());
}

/// Replace a task's text/priority/status.
pub fn cmd_edit(
    store: &mut TaskStore,
    id: u64,
    text: String,
    priority: Option<Priority>,
    status: Option<Status>,
) {
    if text.trim().is_empty() {
        eprintln!("Task text cannot be empty.");
        std::process::exit(1);
    }
    match store.edit(id, &text, priority, status) {
        Ok(true) => println!("Updated task {id}"),
        Ok(false) => {
            eprintln!("Task {id} not found.");
            std::process::exit(1);
        }
        Err(e) => fail_save(e),
    }
}

/// Flip a task's completion flag.
pub fn cmd_toggle(store: &mut TaskStore, id: u64) {
    match store.toggle_complete(id) {
        Ok(true) => {
            // Unwrap is safe: toggle just found it.
            let task = store.get(id).unwrap();
            let verb = if task.completed { "Completed" } else { "Reopened" };
            println!("{verb} task {id}");
        }
        Ok(false) => {
            eprintln!("Task {id} not found.");
            std::process::exit(1);
        }
        Err(e) => fail_save(e),
    }
}

/// Delete a task.
pub fn cmd_delete(store: &mut TaskStore, id: u64) {
    match store.delete(id) {
        Ok(true) => println!("Deleted task {id}"),
        Ok(false) => {
            eprintln!("Task {id} not found.");
            std::process::exit(1);
        }
        Err(e) => fail_save(e),
    }
}

/// Generate shell completions to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn fail_save(e: std::io::Error) -> ! {
    eprintln!("Failed to save tasks: {e}");
    std::process::exit(1);
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<15} {:<4} {:<8} {:<12} {:<17} {}",
        "ID", "Done", "Pri", "Status", "Created", "Text"
    );
    for t in tasks {
        println!(
            "{:<15} {:<4} {:<8} {:<12} {:<17} {}",
            t.id,
            if t.completed { "x" } else { "-" },
            format_priority(t.priority),
            format_status(t.status),
            t.created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M"),
            t.text
        );
    }
}

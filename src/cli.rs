use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed to-do list CLI.
/// Storage defaults to ~/.taskpad/todos.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "taskpad", version, about = "File-backed to-do list with search and filters")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

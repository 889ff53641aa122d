use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trayclip")]
#[command(about = "Keep named text snippets and copy them to the clipboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Use this entries file instead of the configured one
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new entry
    Add {
        title: String,

        /// Initial content
        #[arg(short, long)]
        content: Option<String>,
    },
    /// List all entries
    List,
    /// Print the content of an entry
    Show { title: String },
    /// Copy the content of an entry to the clipboard
    Copy { title: String },
    /// Replace the content of an entry
    Set { title: String, content: String },
    /// Remove an entry
    Remove { title: String },
    /// Print the location of the entries file
    Path,
}

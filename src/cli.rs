//! CLI Argument Parsing
//!
//! Global flags (`--config`, `-v`) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// treenav - browse and print trees
#[derive(Parser, Debug)]
#[command(name = "treenav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./.treenav.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse a directory interactively
    Browse {
        /// Directory to browse
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Include dot-files
        #[arg(long)]
        hidden: bool,

        /// Allow several selections; quit to finish
        #[arg(long)]
        multi: bool,

        /// Use ASCII icons
        #[arg(long)]
        ascii: bool,
    },

    /// Print a tree built from a JSON array of records
    Print {
        /// JSON file holding an array of objects
        file: PathBuf,

        /// Record field holding the parent path
        #[arg(long, default_value = "path")]
        path_key: String,

        /// Record field holding the node name
        #[arg(long, default_value = "name")]
        name_key: String,

        /// Select this node id and expand its ancestors
        #[arg(long)]
        select: Option<String>,

        /// Expand every node that has children
        #[arg(long)]
        expand_all: bool,

        /// Emit nodes and state as JSON
        #[arg(long)]
        json: bool,

        /// Use ASCII icons
        #[arg(long)]
        ascii: bool,
    },
}

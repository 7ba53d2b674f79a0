//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// callbrief - Post-call summaries for customer calls
#[derive(Parser, Debug)]
#[command(name = "callbrief")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a call for the contact with the given phone number
    Analyze {
        /// Phone number of the caller, as written in the contact store
        #[arg(short, long)]
        phone: String,

        /// Call transcript text
        #[arg(short, long, required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,

        /// Read the call transcript from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Contact store CSV (defaults to contacts.path from config)
        #[arg(short, long)]
        contacts: Option<PathBuf>,

        /// Model to use (defaults to llm.model from config)
        #[arg(short, long)]
        model: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Do not record the outcome in the history
        #[arg(long)]
        no_save: bool,
    },

    /// Show the contact record for a phone number
    Lookup {
        /// Phone number to look up
        phone: String,

        /// Contact store CSV (defaults to contacts.path from config)
        #[arg(short, long)]
        contacts: Option<PathBuf>,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent analyses
    History {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

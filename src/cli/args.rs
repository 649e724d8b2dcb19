//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

/// Boolean query toolbox: parse search expressions into trees and render them back
#[derive(Parser, Debug)]
#[command(name = "rsquery")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Raise log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Override the AND operator token
    #[arg(long, global = true, value_name = "TOKEN")]
    pub and: Option<String>,

    /// Override the OR operator token
    #[arg(long, global = true, value_name = "TOKEN")]
    pub or: Option<String>,

    /// Override the NOT operator token
    #[arg(long, global = true, value_name = "TOKEN")]
    pub not: Option<String>,

    /// Replace delimiter pairs (two characters, opening then closing; repeatable)
    #[arg(long = "delimiter", global = true, value_name = "PAIR")]
    pub delimiters: Vec<String>,

    /// Fail on delimiters left open at end of input
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an expression and print its canonical form
    Render {
        /// Boolean query expression
        expression: String,
    },

    /// Parse an expression and show its tree
    Tree {
        /// Boolean query expression
        expression: String,
    },

    /// List the operand terms of an expression
    Terms {
        /// Boolean query expression
        expression: String,
    },

    /// Validate an expression (exit code reports the outcome)
    Check {
        /// Boolean query expression
        expression: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config path
    Path,
}

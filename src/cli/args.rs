//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// resloc - resource location toolkit
///
/// Resolves file, archive and runtime-image identifiers to concrete
/// locations, parses resource names and hashes resource contents.
#[derive(Parser, Debug)]
#[command(name = "resloc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RESLOC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve an identifier to a concrete location
    Resolve(ResolveArgs),

    /// Hash the contents of a resource
    Hash(HashArgs),

    /// Parse basename and extensions of a location string
    Name(NameArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path, file: URI, jar: URI or jrt:/ URI
    pub identifier: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the hash command
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// Path, file: URI, jar: URI or jrt:/ URI
    pub identifier: String,

    /// Digest algorithm (e.g. SHA-256); defaults to the configured one
    #[arg(short, long)]
    pub algorithm: Option<String>,
}

/// Arguments for the name command
#[derive(Parser, Debug)]
pub struct NameArgs {
    /// Raw location string
    pub location: String,

    /// Treat the location as a directory
    #[arg(short, long)]
    pub directory: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for the resolve command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable key/value lines
    Plain,
    /// JSON output
    Json,
}

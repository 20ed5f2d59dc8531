//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::check::OutputFormat;
use crate::deps::Variant;

/// depaudit - Consistency checks for packaging dependency data.
#[derive(Debug, Parser)]
#[command(name = "depaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true, env = "DEPAUDIT_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to settings file (overrides default .depaudit.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run every consistency check (default if no command specified)
    Check(CheckArgs),

    /// Print the resolved package list for one build combination
    Packages(PackagesArgs),

    /// Write bash lookup tables generated from the dependency data
    Generate(GenerateArgs),

    /// Print the JSON Schema of a data document
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Do not run shellcheck
    #[arg(long)]
    pub skip_shellcheck: bool,

    /// Do not run the resolver tool for each combination
    #[arg(long)]
    pub skip_tool: bool,
}

/// Arguments for the `packages` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PackagesArgs {
    /// Dependency document to read
    #[arg(long, value_enum)]
    pub variant: Variant,

    /// Build family (debian, rhel, bsd, ...)
    #[arg(long)]
    pub family: String,

    /// Operating system key, e.g. ubuntu_24.04
    #[arg(long)]
    pub os: String,

    /// Package manager key
    #[arg(long)]
    pub pkgmgr: String,

    /// Include LDAP on the server variant (ON/OFF, yes/no, 1/0)
    #[arg(long)]
    pub enable_ldap: Option<String>,

    /// Include NETSNMP on the server variant (ON/OFF, yes/no, 1/0)
    #[arg(long)]
    pub enable_snmp: Option<String>,
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GenerateArgs {
    /// Output file (default from settings)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compare with the file on disk instead of writing it
    #[arg(long)]
    pub check: bool,
}

/// Documents with a JSON Schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SchemaDocument {
    /// deps-client.yaml, deps-localclient.yaml, deps-server.yaml
    #[default]
    Deps,
    /// deps-map.yaml
    Map,
    /// deps-meta.yaml
    Meta,
}

/// Arguments for the `schema` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SchemaArgs {
    /// Document to describe
    #[arg(value_enum, default_value_t = SchemaDocument::Deps)]
    pub document: SchemaDocument,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

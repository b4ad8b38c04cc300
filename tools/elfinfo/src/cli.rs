//! Command-line interface definitions for elfinfo.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect ELF headers and extract sections.
#[derive(Parser)]
#[command(name = "elfinfo", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Only print errors.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every decoded header to stderr.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the identification, file header, section and program headers.
    Headers(HeadersArgs),
    /// Extract the contents of one section.
    Section(SectionArgs),
}

/// Arguments for the `headers` subcommand.
#[derive(Parser)]
pub struct HeadersArgs {
    /// ELF file to read.
    pub file: PathBuf,
}

/// Arguments for the `section` subcommand.
#[derive(Parser)]
pub struct SectionArgs {
    /// ELF file to read.
    pub file: PathBuf,

    /// Exact section name, e.g. `.text`.
    pub name: String,

    /// Write the raw bytes here instead of hex-dumping to stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

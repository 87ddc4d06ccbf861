use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::LlmProvider;

/// Anonymize plain text or .docx documents with an LLM.
#[derive(Debug, Parser)]
#[command(name = "redactor", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Anonymize text (plain, or extracted from .docx/.pdf) and print the result
    Text(TextArgs),

    /// Anonymize a .docx file, keeping its formatting
    Document(DocumentArgs),

    /// Print the text a supported file would be anonymized from
    Extract(ExtractArgs),

    /// List the configured LLM providers
    Providers,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Input file (.txt, .docx or .pdf), or `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Provider to use instead of the configured default
    #[arg(short, long)]
    pub provider: Option<LlmProvider>,

    /// Print a JSON report with detected PII instead of the bare text
    #[arg(long)]
    pub json: bool,

    /// Submit all chunks concurrently
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Args)]
pub struct DocumentArgs {
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    #[arg(short, long)]
    pub provider: Option<LlmProvider>,

    /// Print the replacement list as JSON after writing the document
    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::request::HashEncoding;

#[derive(Parser)]
#[command(
    name = "qlv",
    about = "Verify that a ledger revision is included under a trusted digest",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify a revision's inclusion proof against a ledger digest
    Verify(VerifyArgs),
    /// Print the canonical pairwise join of two hashes
    Join(JoinArgs),
    /// Flip one random bit of a hash
    Tamper(TamperArgs),
    /// Build a sample tree and print a verification request for one leaf
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Request file (TOML, or JSON with a .json extension)
    #[arg(long, conflicts_with_all = ["document_hash", "digest", "proof", "proof_response"])]
    pub request: Option<PathBuf>,
    /// Hash of the revision being verified
    #[arg(long)]
    pub document_hash: Option<String>,
    /// Trusted ledger digest
    #[arg(long)]
    pub digest: Option<String>,
    /// Proof as Ion text, or @path to read it from a file
    #[arg(long, conflicts_with = "proof_response")]
    pub proof: Option<String>,
    /// Saved get-revision JSON response carrying the proof
    #[arg(long)]
    pub proof_response: Option<PathBuf>,
    #[arg(long, default_value = "base64")]
    pub encoding: HashEncoding,
}

#[derive(Args)]
pub struct JoinArgs {
    pub left: String,
    pub right: String,
    #[arg(long, default_value = "base64")]
    pub encoding: HashEncoding,
}

#[derive(Args)]
pub struct TamperArgs {
    pub hash: String,
    #[arg(long, default_value = "base64")]
    pub encoding: HashEncoding,
}

#[derive(Args)]
pub struct DemoArgs {
    #[arg(long, default_value = "8")]
    pub leaves: usize,
    #[arg(long, default_value = "0")]
    pub index: usize,
}

pub mod build;
pub mod check;
pub mod completions;
pub mod generate;
pub mod init;

use clap::{Parser, Subcommand};

/// asset-decl - TypeScript declarations for packaged asset bundles
#[derive(Parser, Debug)]
#[command(name = "asset-decl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the declaration stage of an assetpack.yaml pipeline
    Build(build::BuildArgs),

    /// Generate a declaration from an explicit manifest path
    Generate(generate::GenerateArgs),

    /// Report duplicate keys and unreadable sprite sheets without writing
    Check(check::CheckArgs),

    /// Create a starter assetpack.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

use asset_decl::cli::{Cli, Commands};
use asset_decl::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => asset_decl::cli::build::run(args, &printer)?,
        Commands::Generate(args) => asset_decl::cli::generate::run(args, &printer)?,
        Commands::Check(args) => asset_decl::cli::check::run(args, &printer)?,
        Commands::Init(args) => asset_decl::cli::init::run(args, &printer)?,
        Commands::Completions(args) => asset_decl::cli::completions::run(args)?,
    }

    Ok(())
}

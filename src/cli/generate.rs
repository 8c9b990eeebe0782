//! Generate command implementation.
//!
//! Runs the declaration stage against an explicit manifest, without a
//! pipeline config.

use std::path::PathBuf;

use clap::Args;

use crate::emit::options::{DEFAULT_DIST, DEFAULT_OBJECT_NAME, DEFAULT_TYPE_NAME};
use crate::emit::{DeclarationOptions, LoadFunctionOptions};
use crate::error::Result;
use crate::output::{display_path, plural, Printer, Reporter};
use crate::pipeline::DeclarationStage;

/// Generate a declaration from an explicit manifest path
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Build manifest produced by the packaging stage
    #[arg(long, short)]
    pub manifest: PathBuf,

    /// Directory sprite-sheet sources are relative to (default: the manifest's directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Declaration output path
    #[arg(long, default_value = DEFAULT_DIST)]
    pub dist: PathBuf,

    /// Name of the generated type
    #[arg(long, default_value = DEFAULT_TYPE_NAME)]
    pub type_name: String,

    /// Name of the loaded-assets field
    #[arg(long, default_value = DEFAULT_OBJECT_NAME)]
    pub object_name: String,

    /// Omit the loader helpers
    #[arg(long, conflicts_with = "change_pixi_assets")]
    pub no_load_function: bool,

    /// Also emit installLoadBundle
    #[arg(long)]
    pub change_pixi_assets: bool,

    /// Print the declaration to stdout instead of writing any file
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateArgs {
    fn options(&self) -> DeclarationOptions {
        DeclarationOptions {
            dist: self.dist.clone(),
            type_name: self.type_name.clone(),
            object_name: self.object_name.clone(),
            create_load_function: (!self.no_load_function).then(|| LoadFunctionOptions {
                change_pixi_assets: self.change_pixi_assets,
            }),
            format: None,
        }
    }

    fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.manifest
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let stage = DeclarationStage::new(args.options());
    let output_dir = args.resolved_output_dir();

    if args.stdout {
        let rendered = stage.render(&args.manifest, &output_dir, printer)?;
        print!("{}", rendered.declaration.contents);
        return Ok(());
    }

    let outcome = stage.generate(&args.manifest, &output_dir, printer)?;
    printer.status(
        "Finished",
        &format!(
            "{} in {}",
            plural(outcome.entries, "key", "keys"),
            display_path(&outcome.dist)
        ),
    );

    Ok(())
}

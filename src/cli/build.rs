//! Build command implementation.
//!
//! Loads the pipeline config and signals `finish` to the declaration stage.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::pipeline::{Pipeline, PipelineConfig, PIPELINE_FILENAME};

/// Run the declaration stage of an assetpack.yaml pipeline
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Pipeline config file
    #[arg(long, short, default_value = PIPELINE_FILENAME)]
    pub config: PathBuf,

    /// Render outputs without writing them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let config = PipelineConfig::load(&args.config)?;
    let pipeline = Pipeline::from_config_with(config, args.dry_run)?;
    pipeline.finish(printer)
}

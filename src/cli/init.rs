//! Init command implementation.
//!
//! Writes a starter `assetpack.yaml` wiring the manifest stage to the
//! declaration stage.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{DeclError, Result};
use crate::output::{display_path, Printer, Reporter};
use crate::pipeline::{DECLARATION_STAGE, MANIFEST_STAGE, PIPELINE_FILENAME};

/// Create a starter assetpack.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Directory the packaging stages write to
    #[arg(long, default_value = "public/assets")]
    pub output: String,

    /// Overwrite existing assetpack.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(PIPELINE_FILENAME);

    if config_path.exists() && !args.force {
        return Err(DeclError::Config {
            message: format!("{} already exists", PIPELINE_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let output = args.output.trim_end_matches('/');
    let manifest = format!("{}/manifest.json", output);

    // Build YAML manually for clean formatting
    let mut yaml = String::new();
    yaml.push_str(&format!("output: {}\n", output));
    yaml.push_str("stages:\n");
    yaml.push_str(&format!("  - name: {}\n", MANIFEST_STAGE));
    yaml.push_str(&format!("    output: {}\n", manifest));
    yaml.push_str(&format!("  - name: {}\n", DECLARATION_STAGE));
    yaml.push_str("    dist: ./src/assets.ts\n");
    yaml.push_str("    typeName: AssetsDeclaration\n");
    yaml.push_str("    objectName: assets\n");
    yaml.push_str("    createLoadFunction:\n");
    yaml.push_str("      changePixiAssets: false\n");

    fs::write(&config_path, &yaml).map_err(|e| DeclError::Io {
        path: config_path.clone(),
        message: format!("Failed to write pipeline config: {}", e),
    })?;

    if args.path.join(&manifest).exists() {
        printer.info("Found", &manifest);
    }
    printer.status("Created", &display_path(&config_path));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DeclarationStage, PipelineConfig};
    use tempfile::tempdir;

    fn init_args(path: PathBuf, force: bool) -> InitArgs {
        InitArgs {
            path,
            output: "public/assets".to_string(),
            force,
        }
    }

    #[test]
    fn test_init_creates_loadable_config() {
        let dir = tempdir().unwrap();
        run(init_args(dir.path().to_path_buf(), false), &Printer::new()).unwrap();

        let config = PipelineConfig::load(&dir.path().join(PIPELINE_FILENAME)).unwrap();
        assert_eq!(config.output, PathBuf::from("public/assets"));
        assert_eq!(
            config.stage(MANIFEST_STAGE).unwrap().string_option("output"),
            Some("public/assets/manifest.json")
        );

        let stage = DeclarationStage::from_stage_config(config.stage(DECLARATION_STAGE).unwrap()).unwrap();
        assert_eq!(stage.options(), &crate::emit::DeclarationOptions::default());
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PIPELINE_FILENAME), "output: build").unwrap();

        assert!(run(init_args(dir.path().to_path_buf(), false), &Printer::new()).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PIPELINE_FILENAME), "output: build").unwrap();

        run(init_args(dir.path().to_path_buf(), true), &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join(PIPELINE_FILENAME)).unwrap();
        assert!(content.contains("output: public/assets\n"));
    }
}

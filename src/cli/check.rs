//! Check command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{DeclError, Result};
use crate::manifest::BuildManifest;
use crate::output::{display_path, plural, Printer, Reporter};
use crate::pipeline::{PipelineConfig, MANIFEST_STAGE, PIPELINE_FILENAME};
use crate::validation::{print_diagnostics, validate_manifest};

/// Report duplicate keys and unreadable sprite sheets without writing
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Pipeline config file
    #[arg(long, short, default_value = PIPELINE_FILENAME)]
    pub config: PathBuf,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let config = PipelineConfig::load(&args.config)?;
    let manifest_path = config
        .manifest_path(printer)
        .ok_or_else(|| DeclError::ManifestNotConfigured {
            stage: MANIFEST_STAGE.to_string(),
        })?;

    printer.status("Checking", &display_path(&manifest_path));
    let manifest = BuildManifest::load(&manifest_path)?;
    printer.info(
        "Found",
        &format!(
            "{} in {}",
            plural(manifest.asset_count(), "asset", "assets"),
            plural(manifest.bundles.len(), "bundle", "bundles")
        ),
    );

    let result = validate_manifest(&manifest, &config.output);
    print_diagnostics(&result, printer);

    if result.has_errors() {
        return Err(DeclError::Config {
            message: format!("{} found", plural(result.error_count(), "problem", "problems")),
            help: Some("Sprite-sheet assets with unreadable descriptors are declared as `any`".to_string()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn project(dir: &std::path::Path, manifest: &str) -> PathBuf {
        let out = dir.join("public");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("manifest.json"), manifest).unwrap();

        let config = dir.join(PIPELINE_FILENAME);
        fs::write(
            &config,
            format!(
                "output: {out}\nstages:\n  - name: pixi-manifest\n    output: {out}/manifest.json\n",
                out = out.display()
            ),
        )
        .unwrap();
        config
    }

    #[test]
    fn test_check_passes_with_warnings() {
        let dir = tempdir().unwrap();
        let config = project(
            dir.path(),
            r#"{"bundles":[{"assets":[{"alias":["a/b"],"src":["1.png"]},{"alias":["a.b"],"src":["2.png"]}]}]}"#,
        );

        run(CheckArgs { config }, &Printer::new()).unwrap();
    }

    #[test]
    fn test_check_fails_on_missing_descriptor() {
        let dir = tempdir().unwrap();
        let config = project(
            dir.path(),
            r#"{"bundles":[{"assets":[{"alias":["hero"],"src":["hero.json"],"data":{"tags":{"tps":true}}}]}]}"#,
        );

        assert!(run(CheckArgs { config }, &Printer::new()).is_err());
    }

    #[test]
    fn test_check_does_not_rewrite_manifest() {
        let dir = tempdir().unwrap();
        let original = r#"{"bundles":[{"assets":[{"alias":["ui/a.png"],"src":["a.png"]}]}]}"#;
        let config = project(dir.path(), original);

        run(CheckArgs { config }, &Printer::new()).unwrap();
        let after = fs::read_to_string(dir.path().join("public/manifest.json")).unwrap();
        assert_eq!(after, original);
    }
}

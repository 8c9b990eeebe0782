//! The declaration stage.

use std::path::{Path, PathBuf};

use crate::emit::{emit_declaration, DeclarationOptions};
use crate::error::{DeclError, Result};
use crate::manifest::{walk_manifest, BuildManifest};
use crate::output::{display_path, plural, Reporter};

use super::persist::{persist_all, Artifact};
use super::{PipelineConfig, Stage, StageConfig, StageTags, DECLARATION_STAGE, DECLARATION_TAGS, MANIFEST_STAGE};

/// Both artifacts of one build, rendered but not yet written.
#[derive(Debug, Clone)]
pub struct RenderedOutputs {
    pub declaration: Artifact,
    /// The manifest with normalized aliases, written back to its own path.
    pub manifest: Artifact,
    pub entries: usize,
    pub unresolved: usize,
}

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub manifest_path: PathBuf,
    pub dist: PathBuf,
    pub entries: usize,
    pub unresolved: usize,
    pub written: bool,
}

/// Generates the asset declaration after the manifest stage has run.
#[derive(Debug, Clone, Default)]
pub struct DeclarationStage {
    options: DeclarationOptions,
    dry_run: bool,
}

impl DeclarationStage {
    pub fn new(options: DeclarationOptions) -> Self {
        Self {
            options,
            dry_run: false,
        }
    }

    /// Build from the stage's entry in the pipeline config.
    pub fn from_stage_config(config: &StageConfig) -> Result<Self> {
        DeclarationOptions::from_value(config.options_value()).map(Self::new)
    }

    /// Render outputs without writing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn options(&self) -> &DeclarationOptions {
        &self.options
    }

    /// Read the manifest and render both artifacts in memory.
    ///
    /// A manifest that cannot be read or parsed fails the whole step.
    /// Sprite-sheet descriptor problems only degrade the affected asset.
    pub fn render(&self, manifest_path: &Path, output_dir: &Path, reporter: &dyn Reporter) -> Result<RenderedOutputs> {
        reporter.status("Reading", &display_path(manifest_path));
        let mut manifest = BuildManifest::load(manifest_path)?;

        if let Some(tool) = self.options.format {
            reporter.warning("Skipped", &format!("format option {:?} is not supported yet", tool));
        }

        let entries = walk_manifest(&mut manifest, output_dir, reporter);
        let unresolved = entries.iter().filter(|e| e.ty.is_unresolved()).count();
        let declaration = emit_declaration(&entries, &self.options);

        Ok(RenderedOutputs {
            declaration: Artifact::new(&self.options.dist, declaration),
            manifest: Artifact::new(manifest_path, manifest.to_json()?),
            entries: entries.len(),
            unresolved,
        })
    }

    /// Generate the declaration for an explicit manifest path.
    pub fn generate(&self, manifest_path: &Path, output_dir: &Path, reporter: &dyn Reporter) -> Result<BuildOutcome> {
        let rendered = self.render(manifest_path, output_dir, reporter)?;

        if self.dry_run {
            reporter.info("Dry run", &format!("{} not written", display_path(&rendered.declaration.path)));
        } else {
            persist_all(&[rendered.declaration.clone(), rendered.manifest.clone()])?;
            reporter.status("Wrote", &display_path(&rendered.declaration.path));
            reporter.status("Rewrote", &display_path(&rendered.manifest.path));
        }

        if rendered.unresolved > 0 {
            reporter.warning(
                "Degraded",
                &format!("{} typed as any", plural(rendered.unresolved, "key", "keys")),
            );
        }

        Ok(BuildOutcome {
            manifest_path: manifest_path.to_path_buf(),
            dist: rendered.declaration.path,
            entries: rendered.entries,
            unresolved: rendered.unresolved,
            written: !self.dry_run,
        })
    }

    /// Locate the manifest through the pipeline and generate.
    pub fn run(&self, pipeline: &PipelineConfig, reporter: &dyn Reporter) -> Result<BuildOutcome> {
        reporter.info("Building", DECLARATION_STAGE);

        let manifest_path = pipeline
            .manifest_path(reporter)
            .ok_or_else(|| DeclError::ManifestNotConfigured {
                stage: MANIFEST_STAGE.to_string(),
            })?;

        self.generate(&manifest_path, &pipeline.output, reporter)
    }
}

impl Stage for DeclarationStage {
    fn name(&self) -> &str {
        DECLARATION_STAGE
    }

    fn tags(&self) -> StageTags {
        DECLARATION_TAGS
    }

    fn finish(&self, pipeline: &PipelineConfig, reporter: &dyn Reporter) -> Result<()> {
        let outcome = self.run(pipeline, reporter)?;
        reporter.status(
            "Finished",
            &format!("{} in {}", plural(outcome.entries, "key", "keys"), display_path(&outcome.dist)),
        );
        Ok(())
    }
}

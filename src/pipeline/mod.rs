//! Host pipeline integration.
//!
//! A pipeline is a list of named stages sharing one output directory. It is
//! described by an `assetpack.yaml` file:
//!
//! ```yaml
//! output: public/assets
//! stages:
//!   - name: pixi-manifest
//!     output: public/assets/manifest.json
//!   - name: declaration
//!     dist: src/assets.ts
//!     createLoadFunction:
//!       changePixiAssets: true
//! ```
//!
//! The declaration stage reads the manifest stage's `output` option to find
//! the manifest it should describe.

pub mod persist;
mod stage;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DeclError, Result};
use crate::output::Reporter;

pub use persist::{persist_all, Artifact};
pub use stage::{BuildOutcome, DeclarationStage, RenderedOutputs};

/// The name of the pipeline config file.
pub const PIPELINE_FILENAME: &str = "assetpack.yaml";

/// Name of the stage that produces the build manifest.
pub const MANIFEST_STAGE: &str = "pixi-manifest";

/// Name of the declaration stage.
pub const DECLARATION_STAGE: &str = "declaration";

/// File tags a stage registers with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTags {
    pub manifest: &'static str,
    pub m_ignore: &'static str,
}

/// Tags the declaration stage participates in.
pub const DECLARATION_TAGS: StageTags = StageTags {
    manifest: "m",
    m_ignore: "mIgnore",
};

/// Configuration of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,

    /// Stage-specific options.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl StageConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Map::new(),
        }
    }

    /// Set an option (builder style).
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// A string option, if present and non-empty.
    pub fn string_option(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// All options as a single JSON object.
    pub fn options_value(&self) -> Value {
        Value::Object(self.options.clone())
    }
}

/// Pipeline description shared by every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory the packaging stages write to.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            stages: vec![],
        }
    }
}

impl PipelineConfig {
    /// Load from an `assetpack.yaml` file.
    ///
    /// Relative paths in the config resolve against the current directory,
    /// the same way the packaging tools resolve them.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DeclError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read pipeline config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| DeclError::Parse {
            message: format!("Invalid pipeline config: {}", e),
            help: Some(format!("Check {} syntax", PIPELINE_FILENAME)),
        })
    }

    /// First stage named `name`.
    pub fn stage(&self, name: &str) -> Option<&StageConfig> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Manifest path configured on the manifest stage.
    ///
    /// Problems are reported; the caller decides whether a missing path is
    /// fatal.
    pub fn manifest_path(&self, reporter: &dyn Reporter) -> Option<PathBuf> {
        let Some(stage) = self.stage(MANIFEST_STAGE) else {
            reporter.error("Missing", &format!("{} stage not found", MANIFEST_STAGE));
            return None;
        };

        match stage.string_option("output") {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                reporter.error("Invalid", &format!("{} output path is invalid", MANIFEST_STAGE));
                None
            }
        }
    }
}

/// A stage the host pipeline drives.
pub trait Stage {
    fn name(&self) -> &str;

    fn tags(&self) -> StageTags;

    /// Called once after every stage has finished processing files.
    fn finish(&self, pipeline: &PipelineConfig, reporter: &dyn Reporter) -> Result<()>;
}

/// Runs registered stages in order.
pub struct Pipeline {
    config: PipelineConfig,
    stages: Vec<Box<dyn Stage>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("stages", &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stages: Vec::new(),
        }
    }

    /// Build a pipeline with the stages this crate implements.
    ///
    /// Stages named in the config that are handled by other tools (such as
    /// the manifest stage) are left to them. A config without a declaration
    /// stage has nothing to run and is rejected.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        Self::from_config_with(config, false)
    }

    /// Like [`Pipeline::from_config`], optionally rendering without writing.
    pub fn from_config_with(config: PipelineConfig, dry_run: bool) -> Result<Self> {
        let stage_config = config.stage(DECLARATION_STAGE).ok_or_else(no_declaration_stage)?;
        let stage = DeclarationStage::from_stage_config(stage_config)?.with_dry_run(dry_run);

        let mut pipeline = Self::new(config);
        pipeline.register(Box::new(stage));
        Ok(pipeline)
    }

    pub fn register(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Signal `finish` to every stage, stopping at the first failure.
    pub fn finish(&self, reporter: &dyn Reporter) -> Result<()> {
        if self.stages.is_empty() {
            return Err(no_declaration_stage());
        }

        for stage in &self.stages {
            let tags = stage.tags();
            reporter.info(
                "Finishing",
                &format!("{} (tags {}, {})", stage.name(), tags.manifest, tags.m_ignore),
            );
            stage.finish(&self.config, reporter)?;
        }
        Ok(())
    }
}

fn no_declaration_stage() -> DeclError {
    DeclError::Config {
        message: format!("No '{}' stage configured", DECLARATION_STAGE),
        help: Some(format!("Add `- name: {}` under `stages`", DECLARATION_STAGE)),
    }
}

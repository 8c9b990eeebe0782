//! Build manifest loading and traversal.
//!
//! The manifest is produced by the packaging stage. It is read once per
//! build, aliases are normalized in place while walking, and the result is
//! serialized back to the same path.

mod types;
pub mod walker;

use std::path::Path;

use serde_json::Value;

use crate::error::{DeclError, Result};

pub use types::{is_truthy, AssetData, AssetEntry, BuildManifest, Bundle};
pub use walker::{walk_manifest, DeclarationEntry};

impl BuildManifest {
    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DeclError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a manifest from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let invalid = |e: serde_json::Error| DeclError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("The manifest must be a JSON object with a `bundles` array".to_string()),
        };

        let source: Value = serde_json::from_str(content).map_err(invalid)?;
        let mut manifest: Self = serde_json::from_value(source.clone()).map_err(invalid)?;
        manifest.source = Some(source);
        Ok(manifest)
    }

    /// Serialize to compact JSON, the way the packaging stage writes it.
    ///
    /// A parsed manifest is written as it was read, with only the `alias`
    /// arrays replaced.
    pub fn to_json(&self) -> Result<String> {
        let result = match &self.source {
            Some(source) => {
                let mut document = source.clone();
                self.write_aliases(&mut document);
                serde_json::to_string(&document)
            }
            None => serde_json::to_string(self),
        };

        result.map_err(|e| DeclError::Parse {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    fn write_aliases(&self, document: &mut Value) {
        let bundles = document.get_mut("bundles").and_then(Value::as_array_mut);
        for (bundle, raw_bundle) in self.bundles.iter().zip(bundles.into_iter().flatten()) {
            let Some(assets) = raw_bundle.get_mut("assets").and_then(Value::as_array_mut) else {
                continue;
            };
            for (asset, raw_asset) in bundle.assets.iter().zip(assets) {
                if let Some(alias) = raw_asset.get_mut("alias") {
                    *alias = Value::from(asset.alias.clone());
                }
            }
        }
    }

    /// Normalize every alias in place. Returns the number of aliases changed.
    pub fn normalize_aliases(&mut self) -> usize {
        let mut changed = 0;
        for bundle in &mut self.bundles {
            for asset in &mut bundle.assets {
                for alias in &mut asset.alias {
                    let normalized = crate::ident::normalize_alias(alias);
                    if *alias != normalized {
                        *alias = normalized;
                        changed += 1;
                    }
                }
            }
        }
        changed
    }
}

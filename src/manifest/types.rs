//! Build manifest data model.
//!
//! Only the fields the generator reads are typed. Everything else is kept in
//! `extra`, and a manifest loaded from JSON also keeps the document as read
//! so it can be written back with only the aliases changed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root of a packaged build manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub bundles: Vec<Bundle>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// The document this manifest was parsed from.
    #[serde(skip)]
    pub(crate) source: Option<Value>,
}

/// A named group of assets loaded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub assets: Vec<AssetEntry>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One packaged asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub alias: Vec<String>,

    /// Source paths relative to the pipeline output directory.
    #[serde(default)]
    pub src: Vec<String>,

    #[serde(default)]
    pub data: AssetData,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-asset metadata attached by the packaging stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetData {
    #[serde(default)]
    pub tags: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetEntry {
    /// Create an asset with no tags.
    pub fn new(alias: Vec<String>, src: Vec<String>) -> Self {
        Self {
            alias,
            src,
            data: AssetData::default(),
            extra: Map::new(),
        }
    }

    /// Set a tag value (builder style).
    pub fn with_tag(mut self, tag: &str, value: impl Into<Value>) -> Self {
        self.data.tags.insert(tag.to_string(), value.into());
        self
    }

    /// Primary source path.
    pub fn primary_src(&self) -> Option<&str> {
        self.src.first().map(String::as_str)
    }

    /// Whether `tag` is present with a truthy value.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.data.tags.get(tag).map(is_truthy).unwrap_or(false)
    }
}

impl BuildManifest {
    /// Total number of assets across all bundles.
    pub fn asset_count(&self) -> usize {
        self.bundles.iter().map(|b| b.assets.len()).sum()
    }

    /// Iterate over every asset in bundle order.
    pub fn assets(&self) -> impl Iterator<Item = &AssetEntry> {
        self.bundles.iter().flat_map(|b| b.assets.iter())
    }
}

/// JavaScript truthiness for tag values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

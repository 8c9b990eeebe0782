//! Declaration stage options.
//!
//! Options are read from the declaration stage's entry in the pipeline
//! config. Keys are camelCase; unknown keys are ignored.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Default output path of the declaration file.
pub const DEFAULT_DIST: &str = "./src/assets.ts";

/// Default name of the emitted type.
pub const DEFAULT_TYPE_NAME: &str = "AssetsDeclaration";

/// Default name of the loaded-assets field.
pub const DEFAULT_OBJECT_NAME: &str = "assets";

/// Options controlling the generated declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationOptions {
    /// Output path of the declaration file.
    #[serde(default = "default_dist")]
    pub dist: PathBuf,

    /// Name of the emitted structural type.
    #[serde(default = "default_type_name")]
    pub type_name: String,

    /// Name of the loaded-assets field on the holder.
    #[serde(default = "default_object_name")]
    pub object_name: String,

    /// Loader helper generation; `None` omits the helper block.
    #[serde(
        default = "default_load_function",
        deserialize_with = "deserialize_load_function"
    )]
    pub create_load_function: Option<LoadFunctionOptions>,

    /// Reserved formatter selection. Not applied.
    #[serde(default)]
    pub format: Option<FormatTool>,
}

/// Options for the generated loader helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFunctionOptions {
    /// Also emit `installLoadBundle`, which swaps the runtime's loader for
    /// the wrapper when the caller invokes it.
    #[serde(default)]
    pub change_pixi_assets: bool,
}

/// Formatter a future version may run over the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTool {
    Eslint,
    Prettier,
}

fn default_dist() -> PathBuf {
    PathBuf::from(DEFAULT_DIST)
}

fn default_type_name() -> String {
    DEFAULT_TYPE_NAME.to_string()
}

fn default_object_name() -> String {
    DEFAULT_OBJECT_NAME.to_string()
}

fn default_load_function() -> Option<LoadFunctionOptions> {
    Some(LoadFunctionOptions::default())
}

/// Accepts an options object, a boolean, or null.
fn deserialize_load_function<'de, D>(deserializer: D) -> Result<Option<LoadFunctionOptions>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Setting {
        Flag(bool),
        Options(LoadFunctionOptions),
    }

    Ok(match Option::<Setting>::deserialize(deserializer)? {
        None | Some(Setting::Flag(false)) => None,
        Some(Setting::Flag(true)) => Some(LoadFunctionOptions::default()),
        Some(Setting::Options(options)) => Some(options),
    })
}

impl Default for DeclarationOptions {
    fn default() -> Self {
        Self {
            dist: default_dist(),
            type_name: default_type_name(),
            object_name: default_object_name(),
            create_load_function: default_load_function(),
            format: None,
        }
    }
}

impl DeclarationOptions {
    /// Build options from a free-form options value (JSON or YAML origin).
    pub fn from_value(value: serde_json::Value) -> crate::error::Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::error::DeclError::Config {
            message: format!("Invalid declaration options: {}", e),
            help: Some("Known options: dist, typeName, objectName, createLoadFunction, format".to_string()),
        })
    }

    /// Whether the loader helper block is emitted.
    pub fn load_function_enabled(&self) -> bool {
        self.create_load_function.is_some()
    }

    /// Whether `installLoadBundle` is emitted.
    pub fn installs_loader(&self) -> bool {
        self.create_load_function
            .as_ref()
            .map(|o| o.change_pixi_assets)
            .unwrap_or(false)
    }
}

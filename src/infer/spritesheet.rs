//! Sprite-sheet type inference.
//!
//! Reads a TexturePacker-style JSON Hash descriptor and exposes every frame
//! name as a texture field.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DeclError, Result};
use crate::ident::property_name;
use crate::manifest::AssetEntry;

/// Runtime type each frame resolves to.
pub const TEXTURE_HANDLE: &str = "Texture";

/// Structural type of a loaded sprite sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheetType {
    /// Frame names in descriptor order.
    pub frames: Vec<String>,
}

impl fmt::Display for SpriteSheetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{textures:{{")?;
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", property_name(frame), TEXTURE_HANDLE)?;
        }
        write!(f, "}}}}")
    }
}

// Only `frames` is read; `meta` and anything else are ignored.
#[derive(Deserialize)]
struct Descriptor {
    frames: Map<String, Value>,
}

/// Resolve the descriptor path for `asset` under `output_dir`.
pub fn descriptor_path(asset: &AssetEntry, output_dir: &Path) -> Result<PathBuf> {
    let src = asset.primary_src().ok_or_else(|| DeclError::Parse {
        message: format!("Asset {:?} has no source path", asset.alias),
        help: Some("Sprite-sheet assets need the descriptor as their first `src` entry".to_string()),
    })?;
    Ok(output_dir.join(src))
}

/// Parse descriptor JSON into a sprite-sheet type.
pub fn parse_descriptor(content: &str) -> Result<SpriteSheetType> {
    let descriptor: Descriptor = serde_json::from_str(content).map_err(|e| DeclError::Parse {
        message: format!("Invalid sprite-sheet descriptor: {}", e),
        help: Some("Expected a JSON object with a `frames` map".to_string()),
    })?;

    Ok(SpriteSheetType {
        frames: descriptor.frames.into_iter().map(|(name, _)| name).collect(),
    })
}

/// Infer the structural type of a sprite-sheet asset.
pub fn infer_sprite_sheet(asset: &AssetEntry, output_dir: &Path) -> Result<SpriteSheetType> {
    let path = descriptor_path(asset, output_dir)?;
    let content = fs::read_to_string(&path).map_err(|e| DeclError::Io {
        path: path.clone(),
        message: format!("Failed to read sprite-sheet descriptor: {}", e),
    })?;

    parse_descriptor(&content).map_err(|e| match e {
        DeclError::Parse { message, help } => DeclError::Parse {
            message: format!("{} ({})", message, path.display()),
            help,
        },
        other => other,
    })
}

//! Asset type resolution.
//!
//! Each asset is classified into an [`AssetKind`] from its tags, and the
//! kind selects the inference strategy. Adding a new strategy means adding a
//! variant here; the compiler points at every match that needs updating.

pub mod spritesheet;

use std::fmt;
use std::path::Path;

use crate::manifest::AssetEntry;
use crate::output::Reporter;

pub use spritesheet::{infer_sprite_sheet, SpriteSheetType, TEXTURE_HANDLE};

/// Tag the packaging stage sets on sprite-sheet descriptors.
pub const SPRITE_SHEET_TAG: &str = "tps";

/// Untyped fallback.
pub const ANY: &str = "any";

/// Recognized asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    SpriteSheet,
    Untyped,
}

impl AssetKind {
    /// Classify an asset from its tags.
    pub fn classify(asset: &AssetEntry) -> Self {
        if asset.has_tag(SPRITE_SHEET_TAG) {
            AssetKind::SpriteSheet
        } else {
            AssetKind::Untyped
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::SpriteSheet => "sprite-sheet",
            AssetKind::Untyped => "untyped",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Type inferred for an asset.
///
/// `Display` yields the type contribution: `any`, the sprite-sheet literal,
/// or an empty string when inference failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetType {
    Any,
    SpriteSheet(SpriteSheetType),
    Unresolved,
}

impl AssetType {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, AssetType::Unresolved)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Any => write!(f, "{}", ANY),
            AssetType::SpriteSheet(sheet) => write!(f, "{}", sheet),
            AssetType::Unresolved => Ok(()),
        }
    }
}

/// Resolve the type of `asset`.
///
/// Inference failures are reported and isolated to this asset.
pub fn resolve_asset_type(asset: &AssetEntry, output_dir: &Path, reporter: &dyn Reporter) -> AssetType {
    match AssetKind::classify(asset) {
        AssetKind::SpriteSheet => match infer_sprite_sheet(asset, output_dir) {
            Ok(sheet) => AssetType::SpriteSheet(sheet),
            Err(e) => {
                reporter.error("Unresolved", &e.to_string());
                AssetType::Unresolved
            }
        },
        AssetKind::Untyped => AssetType::Any,
    }
}

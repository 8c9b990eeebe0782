//! Manifest checks.
//!
//! Each check reads the manifest without modifying it and returns a
//! `ValidationResult`.

use std::collections::HashMap;
use std::path::Path;

use crate::ident::normalize_alias;
use crate::infer::{infer_sprite_sheet, AssetKind};
use crate::manifest::BuildManifest;

use super::warning::{Diagnostic, ValidationResult};

pub const DUPLICATE_KEY: &str = "asset_decl::check::duplicate-key";
pub const NO_ALIAS: &str = "asset_decl::check::no-alias";
pub const BAD_DESCRIPTOR: &str = "asset_decl::check::descriptor";

/// Aliases that collapse to the same declaration key.
pub fn check_duplicate_keys(manifest: &BuildManifest) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashMap<String, &str> = HashMap::new();

    for asset in manifest.assets() {
        for alias in &asset.alias {
            let key = normalize_alias(alias);
            if let Some(first) = seen.get(&key) {
                result.push(
                    Diagnostic::warning(
                        DUPLICATE_KEY,
                        format!("'{}' and '{}' both declare key \"{}\"", first, alias, key),
                    )
                    .with_help("The later alias wins; rename one if they are different assets"),
                );
            } else {
                seen.insert(key, alias.as_str());
            }
        }
    }

    result
}

/// Assets that contribute nothing to the declaration.
pub fn check_empty_aliases(manifest: &BuildManifest) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (b, bundle) in manifest.bundles.iter().enumerate() {
        for asset in bundle.assets.iter().filter(|a| a.alias.is_empty()) {
            let bundle_name = bundle.name.clone().unwrap_or_else(|| format!("#{}", b));
            result.push(Diagnostic::warning(
                NO_ALIAS,
                format!(
                    "Asset {} in bundle '{}' has no alias",
                    asset.primary_src().unwrap_or("<no src>"),
                    bundle_name
                ),
            ));
        }
    }

    result
}

/// Sprite-sheet assets whose descriptor cannot be read.
pub fn check_sprite_sheets(manifest: &BuildManifest, output_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();

    for asset in manifest.assets() {
        if AssetKind::classify(asset) != AssetKind::SpriteSheet {
            continue;
        }
        if let Err(e) = infer_sprite_sheet(asset, output_dir) {
            result.push(
                Diagnostic::error(BAD_DESCRIPTOR, e.to_string())
                    .with_help("These aliases will be declared as `any`"),
            );
        }
    }

    result
}

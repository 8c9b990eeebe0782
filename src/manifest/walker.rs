//! Manifest traversal.
//!
//! Visits bundles, then assets, then aliases, in document order. Each asset's
//! type is resolved once and shared by all of its aliases.

use std::path::Path;

use crate::ident::normalize_alias;
use crate::infer::{resolve_asset_type, AssetType};
use crate::output::Reporter;

use super::BuildManifest;

/// One key of the generated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationEntry {
    /// Normalized alias.
    pub key: String,
    pub ty: AssetType,
}

/// Walk `manifest`, normalizing aliases in place and collecting one entry
/// per alias.
///
/// Entries are not sorted or deduplicated; a repeated key appears twice and
/// the later one wins in the emitted type.
pub fn walk_manifest(
    manifest: &mut BuildManifest,
    output_dir: &Path,
    reporter: &dyn Reporter,
) -> Vec<DeclarationEntry> {
    let mut entries = Vec::new();

    for bundle in &mut manifest.bundles {
        for asset in &mut bundle.assets {
            for alias in &mut asset.alias {
                *alias = normalize_alias(alias);
            }

            let ty = resolve_asset_type(asset, output_dir, reporter);
            entries.extend(asset.alias.iter().map(|key| DeclarationEntry {
                key: key.clone(),
                ty: ty.clone(),
            }));
        }
    }

    entries
}

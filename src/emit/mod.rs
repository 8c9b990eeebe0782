//! Declaration source generation.
//!
//! Output layout, in order: the runtime import, the optional loader helper
//! block, then the structural type with one member per key.

mod loader;
pub mod options;

use std::collections::HashMap;

use crate::ident::quote_key;
use crate::infer::{AssetType, ANY};
use crate::manifest::DeclarationEntry;

pub use loader::render_loader;
pub use options::{DeclarationOptions, FormatTool, LoadFunctionOptions};

/// Runtime symbols the generated module may reference.
pub const RUNTIME_IMPORT: &str =
    "import { Spritesheet, Texture, Assets, ArrayOr, ProgressCallback } from 'pixi.js';";

/// Marker appended to members whose type could not be inferred.
pub const UNRESOLVED_MARKER: &str = "/* unresolved */";

/// Collapse repeated keys. A repeated key keeps its first position and takes
/// the type of its last occurrence.
pub fn collapse_duplicates(entries: &[DeclarationEntry]) -> Vec<(&str, &AssetType)> {
    let mut members: Vec<(&str, &AssetType)> = Vec::with_capacity(entries.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        match index.get(entry.key.as_str()) {
            Some(&i) => members[i].1 = &entry.ty,
            None => {
                index.insert(entry.key.as_str(), members.len());
                members.push((entry.key.as_str(), &entry.ty));
            }
        }
    }

    members
}

/// Render the `export type` block.
pub fn render_type(entries: &[DeclarationEntry], type_name: &str) -> String {
    let mut out = format!("export type {} = {{", type_name);

    for (key, ty) in collapse_duplicates(entries) {
        out.push('\n');
        out.push_str(&quote_key(key));
        out.push(':');
        match ty {
            AssetType::Unresolved => {
                out.push_str(ANY);
                out.push(' ');
                out.push_str(UNRESOLVED_MARKER);
            }
            resolved => out.push_str(&resolved.to_string()),
        }
    }

    out.push_str("\n}\n");
    out
}

/// Assemble the complete declaration source.
pub fn emit_declaration(entries: &[DeclarationEntry], options: &DeclarationOptions) -> String {
    let mut out = String::from(RUNTIME_IMPORT);
    out.push('\n');

    if let Some(block) = render_loader(options) {
        out.push_str(&block);
    }

    out.push('\n');
    out.push_str(&render_type(entries, &options.type_name));
    out
}

//! asset-decl - TypeScript declarations for packaged asset bundles
//!
//! Reads the build manifest written by an asset packaging pipeline and
//! generates a TypeScript type mapping every asset alias to its runtime
//! type. Sprite sheets get a structural type listing their frames; every
//! other asset is declared as `any`.

pub mod cli;
pub mod emit;
pub mod error;
pub mod ident;
pub mod infer;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod validation;

pub use emit::{emit_declaration, DeclarationOptions, FormatTool, LoadFunctionOptions};
pub use error::{DeclError, Result};
pub use ident::normalize_alias;
pub use infer::{resolve_asset_type, AssetKind, AssetType, SpriteSheetType};
pub use manifest::{walk_manifest, AssetEntry, BuildManifest, Bundle, DeclarationEntry};
pub use output::{MemoryReporter, Printer, Reporter};
pub use pipeline::{DeclarationStage, Pipeline, PipelineConfig, Stage, StageConfig};
pub use validation::{validate_manifest, Diagnostic, Severity, ValidationResult};

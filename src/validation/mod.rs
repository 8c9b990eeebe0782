//! Manifest validation.
//!
//! Reports what the generator would silently degrade: duplicate keys,
//! aliasless assets and unreadable sprite-sheet descriptors. Used by
//! `asset-decl check`.

mod checks;
mod warning;

use std::path::Path;

pub use checks::{BAD_DESCRIPTOR, DUPLICATE_KEY, NO_ALIAS};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::manifest::BuildManifest;
use crate::output::{plural, Printer};

/// Run all checks against the manifest.
pub fn validate_manifest(manifest: &BuildManifest, output_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_duplicate_keys(manifest));
    result.merge(checks::check_empty_aliases(manifest));
    result.merge(checks::check_sprite_sheets(manifest, output_dir));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("  {}[{}]: {}", label, printer.dim(&d.code), d.message);
        if let Some(help) = &d.help {
            eprintln!("    {}: {}", printer.bold("help"), help);
        }
    }

    let errors = plural(result.error_count(), "error", "errors");
    let warnings = plural(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        eprintln!("Check failed: {}, {}", errors, warnings);
    } else if result.warning_count() > 0 {
        eprintln!("Check passed ({})", warnings);
    } else {
        eprintln!("Check passed.");
    }
}

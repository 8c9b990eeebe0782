use miette::Diagnostic;
use thiserror::Error;

/// Main error type for declaration generation
#[derive(Error, Diagnostic, Debug)]
pub enum DeclError {
    #[error("IO error: {0}")]
    #[diagnostic(code(asset_decl::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(asset_decl::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(asset_decl::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(asset_decl::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("No manifest path available from the '{stage}' stage")]
    #[diagnostic(
        code(asset_decl::config::manifest),
        help("Register the manifest stage with a non-empty `output` option")
    )]
    ManifestNotConfigured { stage: String },

    #[error("Failed to persist outputs: {message}")]
    #[diagnostic(code(asset_decl::persist))]
    Persist {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, DeclError>;

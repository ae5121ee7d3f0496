//! Error handling for the scaffold application.
//! Defines the error taxonomy and result type used throughout the generation pipeline.

use std::io;
use thiserror::Error;

/// Errors that can occur while generating a project.
///
/// Every variant carries the path or key that caused it so the operator can
/// locate the problem without re-running in verbose mode.
#[derive(Error, Debug)]
pub enum Error {
    /// The template path given on the command line does not exist.
    #[error("Path '{path}' does not exist.")]
    PathNotFound { path: String },

    /// The per-run configuration file is absent or unreadable.
    #[error("Unable to find and/or load config file '{path}': {source}.")]
    ConfigNotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The configuration document could not be interpreted.
    #[error("Configuration file '{path}' is malformed: {reason}.")]
    ConfigMalformed { path: String, reason: String },

    /// The per-run configuration collides with the process-wide settings file.
    #[error(
        "Configuration file '{path}' uses the reserved name 'base', which is kept for process-wide settings."
    )]
    ConfigConflict { path: String },

    /// The interactive input channel broke while asking for a value.
    #[error("Prompt for '{key}' failed: {source}.")]
    PromptFailure {
        key: String,
        #[source]
        source: io::Error,
    },

    /// A path name or a file body could not be rendered.
    #[error("Failed to render '{path}': {reason}.")]
    RenderFailure { path: String, reason: String },

    /// A filesystem operation on a generated path failed.
    #[error("Failed to {action} '{path}': {source}.")]
    IoFailure {
        action: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// The output directory is already present.
    #[error("Output directory '{path}' already exists.")]
    OutputExists { path: String },

    /// The rollback watcher could not remove the output directory.
    #[error("Rollback of '{path}' failed: {reason}.")]
    RollbackFailed { path: String, reason: String },

    /// Directory enumeration failed.
    #[error("Walk error: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// A hook file pattern could not be compiled.
    #[error("Pattern error: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Template engine error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),
}

impl Error {
    /// Shorthand for building an [`Error::IoFailure`] from a path-like value.
    pub fn io<P: AsRef<std::path::Path>>(action: &'static str, path: P, source: io::Error) -> Self {
        Error::IoFailure { action, path: path.as_ref().display().to_string(), source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Only the binary calls this; library callers get the error back as a value.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}

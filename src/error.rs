//! Error handling for mdtemplate.
//! Defines the error taxonomy shared by acquisition, conversion and registration.

use std::io;
use thiserror::Error;

/// Boxed error reported by a markup converter.
pub type ConversionFailure = Box<dyn std::error::Error + Send + Sync>;

/// Custom error types for mdtemplate operations.
///
/// Every variant is returned to the immediate caller; nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// A required collaborator or configuration value is missing or invalid.
    #[error("Configuration error: {0}.")]
    ConfigurationError(String),

    /// The glob pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {source}.")]
    PatternError {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The glob pattern is valid but matched nothing.
    #[error("Pattern '{pattern}' matches no files.")]
    NoMatchError { pattern: String },

    /// An explicit file list was empty.
    #[error("No files named in call to parse_files.")]
    NoFilesError,

    /// A unit could not be read.
    #[error("Failed to read '{path}': {source}.")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The markup converter rejected a unit. Stops the whole batch.
    #[error("Failed to convert Markdown to HTML for '{name}': {source}.")]
    MarkupConversionError {
        name: String,
        #[source]
        source: ConversionFailure,
    },

    /// A unit name that cannot be written as a quoted template name.
    #[error("Invalid template name {name:?}: quotes, backslashes and control characters are not allowed.")]
    InvalidNameError { name: String },

    /// The generated template source was rejected by the engine.
    #[error("{message}\n Template:\n{envelope}")]
    TemplateSyntaxError { name: String, message: String, envelope: String },

    /// A template calls a template that is not defined in the namespace.
    #[error("Template '{template}' references undefined template '{reference}'.")]
    UnresolvedReferenceError { template: String, reference: String },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with mdtemplate's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}

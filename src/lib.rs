//! mdtemplate lets templates be written in Markdown.
//! Each Markdown unit is converted to HTML, its mangled `{{ template }}` calls
//! are repaired, and the result is registered as a named definition in a
//! shared template namespace.

/// Command-line interface module for the mdtemplate binary
pub mod cli;

/// Configuration handling (mdtemplate.json, mdtemplate.yml, mdtemplate.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Repair of template calls mangled by the Markdown converter
pub mod directive;

/// Template namespace trait and the gtmpl-backed template set
pub mod engine;

/// Error types and handling
pub mod error;

/// Markdown to HTML conversion
pub mod markup;

/// Acquisition, conversion and registration pipeline
pub mod preprocessor;

/// Definition envelopes and namespace registration
pub mod registrar;

/// Source acquisition: globs, file lists and name derivation
pub mod source;

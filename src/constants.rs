//! Common constants used throughout mdtemplate.

/// Suffix stripped from a unit's base file name to obtain its template name.
pub const DEFAULT_SUFFIX: &str = ".mod.md";

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["mdtemplate.json", "mdtemplate.yml", "mdtemplate.yaml"];

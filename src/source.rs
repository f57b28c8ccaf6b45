//! Source acquisition: turns glob patterns, file lists and in-memory strings
//! into an ordered sequence of [`Unit`]s.

use crate::error::{Error, Result};
use globset::GlobBuilder;
use log::debug;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One logical template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Template name the unit is registered under.
    pub name: String,
    /// Markup exactly as read.
    pub raw: Vec<u8>,
}

impl Unit {
    pub fn new<S: Into<String>, B: Into<Vec<u8>>>(name: S, raw: B) -> Self {
        Self { name: name.into(), raw: raw.into() }
    }
}

/// Trait for reading unit sources from storage.
///
/// Implemented for any `Fn(&Path) -> io::Result<(String, Vec<u8>)>`, so tests
/// can substitute an in-memory closure.
pub trait SourceReader {
    /// Reads the file at `path`.
    ///
    /// # Returns
    /// * `io::Result<(String, Vec<u8>)>` - The file's base name and its bytes
    fn read(&self, path: &Path) -> io::Result<(String, Vec<u8>)>;
}

impl<F> SourceReader for F
where
    F: Fn(&Path) -> io::Result<(String, Vec<u8>)>,
{
    fn read(&self, path: &Path) -> io::Result<(String, Vec<u8>)> {
        self(path)
    }
}

/// Reads units from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<(String, Vec<u8>)> {
        let bytes = std::fs::read(path)?;
        Ok((base_name(path), bytes))
    }
}

/// Returns the last component of `path`, lossily converted to UTF-8.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Derives a template name from a base file name by removing `suffix`.
///
/// `page.mod.md` with suffix `.mod.md` becomes `page`. Names without the
/// suffix, or consisting only of it, are returned unchanged.
pub fn unit_name(base_name: &str, suffix: &str) -> String {
    match base_name.strip_suffix(suffix) {
        Some(stem) if !suffix.is_empty() && !stem.is_empty() => stem.to_string(),
        _ => base_name.to_string(),
    }
}

fn is_glob_meta(part: &str) -> bool {
    part.contains(['*', '?', '[', '{'])
}

/// Splits a pattern into the literal directory to walk and the depth limit.
fn walk_root(pattern: &str) -> (PathBuf, Option<usize>) {
    let mut root = PathBuf::new();
    let mut rest = Vec::new();
    for component in Path::new(pattern).components() {
        let part = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !is_glob_meta(&part) {
            root.push(component);
        } else {
            rest.push(part.into_owned());
        }
    }
    if rest.is_empty() {
        // Literal pattern: walk its parent and match the file itself.
        let parent = Path::new(pattern).parent().map(Path::to_path_buf).unwrap_or_default();
        return (parent, Some(1));
    }
    let depth = if rest.iter().any(|part| part.contains("**")) { None } else { Some(rest.len()) };
    (root, depth)
}

/// Expands `pattern` against the filesystem.
///
/// A `*` never crosses a path separator; `**` matches any number of
/// directories. Directories are skipped and results are sorted.
///
/// # Errors
/// * `Error::PatternError` if the pattern is invalid
/// * `Error::NoMatchError` if nothing matches
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| Error::PatternError { pattern: pattern.to_string(), source })?
        .compile_matcher();

    let (root, depth) = walk_root(pattern);
    let relative = root.as_os_str().is_empty();
    let start = if relative { PathBuf::from(".") } else { root };

    let mut walker = WalkDir::new(&start).follow_links(true);
    if let Some(depth) = depth {
        walker = walker.max_depth(depth);
    }

    let mut matches = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry while expanding '{pattern}': {e}");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        let path = if relative {
            strip_current_dir(entry.path())
        } else {
            entry.path().to_path_buf()
        };
        if matcher.is_match(&path) {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(Error::NoMatchError { pattern: pattern.to_string() });
    }
    matches.sort();
    debug!("Pattern '{pattern}' matched {} file(s)", matches.len());
    Ok(matches)
}

fn strip_current_dir(path: &Path) -> PathBuf {
    path.components().skip_while(|c| matches!(c, Component::CurDir)).collect()
}

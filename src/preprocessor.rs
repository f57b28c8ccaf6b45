//! Core processing pipeline.
//! Acquires units, converts them to HTML, repairs their directives and
//! registers them into a caller-owned namespace, one unit at a time.

use crate::config::Config;
use crate::constants::DEFAULT_SUFFIX;
use crate::directive::repair;
use crate::engine::Namespace;
use crate::error::{Error, Result};
use crate::markup::{ComrakConverter, MarkupConverter};
use crate::registrar::{register, register_new, Envelope, Fragment};
use crate::source::{expand_glob, unit_name, FsReader, SourceReader, Unit};
use log::debug;
use std::path::{Path, PathBuf};

/// Markdown-to-template preprocessor.
///
/// Every entry point takes the namespace explicitly and hands the same
/// handle back so registrations can be chained. The first error stops the
/// batch; units registered before it stay registered.
pub struct Preprocessor {
    converter: Box<dyn MarkupConverter>,
    reader: Box<dyn SourceReader>,
    suffix: String,
}

/// Builder for [`Preprocessor`].
#[derive(Default)]
pub struct PreprocessorBuilder {
    converter: Option<Box<dyn MarkupConverter>>,
    reader: Option<Box<dyn SourceReader>>,
    suffix: Option<String>,
}

impl PreprocessorBuilder {
    /// Sets the markup converter. Required.
    pub fn converter<C: MarkupConverter + 'static>(mut self, converter: C) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Sets the source reader. Defaults to [`FsReader`].
    pub fn reader<R: SourceReader + 'static>(mut self, reader: R) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Sets the suffix stripped from file names. Defaults to `.mod.md`.
    pub fn suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// # Errors
    /// * `Error::ConfigurationError` if no converter was supplied
    pub fn build(self) -> Result<Preprocessor> {
        let converter = self.converter.ok_or_else(|| {
            Error::ConfigurationError("no markup converter supplied".to_string())
        })?;
        Ok(Preprocessor {
            converter,
            reader: self.reader.unwrap_or_else(|| Box::new(FsReader)),
            suffix: self.suffix.unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
        })
    }
}

impl Preprocessor {
    pub fn builder() -> PreprocessorBuilder {
        PreprocessorBuilder::default()
    }

    /// Comrak converter and filesystem reader set up from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            converter: Box::new(ComrakConverter::new(&config.markdown)),
            reader: Box::new(FsReader),
            suffix: config.suffix.clone(),
        }
    }

    /// Reads one file into a unit, deriving its name unless `name` is given.
    ///
    /// # Errors
    /// * `Error::ReadError` if the reader fails
    pub fn read_unit(&self, path: &Path, name: Option<&str>) -> Result<Unit> {
        let (base, raw) = self.reader.read(path).map_err(|source| Error::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        let name = match name {
            Some(name) => name.to_string(),
            None => unit_name(&base, &self.suffix),
        };
        debug!("Read '{}' as unit '{}' ({} bytes)", path.display(), name, raw.len());
        Ok(Unit { name, raw })
    }

    /// Converts a unit to HTML and repairs its template calls.
    ///
    /// # Errors
    /// * `Error::MarkupConversionError` if the converter rejects the unit
    pub fn convert(&self, unit: &Unit) -> Result<Fragment> {
        let html = self.converter.convert(&unit.raw).map_err(|source| {
            Error::MarkupConversionError { name: unit.name.clone(), source }
        })?;
        Ok(Fragment { html: repair(&html) })
    }

    /// The engine source generated for a unit.
    ///
    /// # Errors
    /// * `Error::MarkupConversionError` if the converter rejects the unit
    /// * `Error::InvalidNameError` if the unit name cannot be quoted
    pub fn envelope(&self, unit: &Unit) -> Result<Envelope> {
        let fragment = self.convert(unit)?;
        Envelope::wrap(&unit.name, &fragment)
    }

    fn register_unit<'n, N: Namespace>(&self, namespace: &'n mut N, unit: &Unit) -> Result<&'n mut N> {
        let envelope = self.envelope(unit)?;
        register(namespace, &envelope)
    }

    fn register_paths<'n, N: Namespace>(
        &self,
        namespace: &'n mut N,
        paths: &[PathBuf],
        name: Option<&str>,
    ) -> Result<&'n mut N> {
        if paths.is_empty() {
            return Err(Error::NoFilesError);
        }
        for path in paths {
            let unit = self.read_unit(path, name)?;
            self.register_unit(&mut *namespace, &unit)?;
        }
        Ok(namespace)
    }

    /// Registers every file matching `pattern`.
    ///
    /// # Errors
    /// * `Error::PatternError` / `Error::NoMatchError` before anything is registered
    /// * any read, conversion or syntax error of an individual unit
    pub fn parse_glob<'n, N: Namespace>(&self, namespace: &'n mut N, pattern: &str) -> Result<&'n mut N> {
        let paths = expand_glob(pattern)?;
        self.register_paths(namespace, &paths, None)
    }

    /// Registers the given files under names derived from their file names.
    ///
    /// # Errors
    /// * `Error::NoFilesError` if `files` is empty
    pub fn parse_files<'n, N: Namespace, P: AsRef<Path>>(
        &self,
        namespace: &'n mut N,
        files: &[P],
    ) -> Result<&'n mut N> {
        let paths: Vec<PathBuf> = files.iter().map(|file| file.as_ref().to_path_buf()).collect();
        self.register_paths(namespace, &paths, None)
    }

    /// Registers one file under an explicit template name.
    pub fn parse_file<'n, N: Namespace, P: AsRef<Path>>(
        &self,
        namespace: &'n mut N,
        name: &str,
        file: P,
    ) -> Result<&'n mut N> {
        self.register_paths(namespace, &[file.as_ref().to_path_buf()], Some(name))
    }

    /// Registers in-memory markup under `name`.
    pub fn parse_str<'n, N: Namespace>(
        &self,
        namespace: &'n mut N,
        name: &str,
        markup: &str,
    ) -> Result<&'n mut N> {
        self.register_unit(namespace, &Unit::new(name, markup))
    }

    /// Like [`Preprocessor::parse_glob`] without an existing namespace: the
    /// namespace is created and rooted at the first matching unit.
    pub fn glob_new<N: Namespace>(&self, pattern: &str) -> Result<N> {
        let paths = expand_glob(pattern)?;
        let (first, rest) =
            paths.split_first().ok_or_else(|| Error::NoMatchError { pattern: pattern.to_string() })?;

        let unit = self.read_unit(first, None)?;
        let mut namespace: N = register_new(&self.envelope(&unit)?)?;
        for path in rest {
            let unit = self.read_unit(path, None)?;
            self.register_unit(&mut namespace, &unit)?;
        }
        Ok(namespace)
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Preprocessor::from_config(&Config::default())
    }
}

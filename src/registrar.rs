//! Template registration: wraps converted HTML in a named definition and
//! parses it into a caller-owned [`Namespace`].

use crate::engine::Namespace;
use crate::error::{Error, Result};
use log::{debug, trace};
use std::fmt;

/// HTML produced for one unit, with its directives repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
}

/// The exact source handed to the engine for one unit:
/// `{{ define "<name>" }}\n<html>{{ end }}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    name: String,
    source: String,
}

impl Envelope {
    /// # Errors
    /// * `Error::InvalidNameError` if `name` would not survive as a quoted
    ///   string literal in the `define` action
    pub fn wrap(name: &str, fragment: &Fragment) -> Result<Self> {
        if name.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
            return Err(Error::InvalidNameError { name: name.to_string() });
        }
        let source = format!("{{{{ define \"{name}\" }}}}\n{}{{{{ end }}}}", fragment.html);
        Ok(Self { name: name.to_string(), source })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Where a unit lands in the namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<'a> {
    /// The unit shares the namespace's own name and replaces its content.
    Root,
    /// The unit becomes (or replaces) the named child.
    Child(&'a str),
}

impl<'a> Identity<'a> {
    pub fn resolve(namespace_name: &str, unit_name: &'a str) -> Self {
        if unit_name == namespace_name {
            Identity::Root
        } else {
            Identity::Child(unit_name)
        }
    }
}

/// Parses `envelope` into `namespace` and returns the same handle.
///
/// # Errors
/// * `Error::TemplateSyntaxError` carrying the engine diagnostic and the
///   envelope text; the namespace is left untouched
pub fn register<'n, N: Namespace>(namespace: &'n mut N, envelope: &Envelope) -> Result<&'n mut N> {
    let identity = Identity::resolve(namespace.name(), envelope.name());
    debug!("Registering '{}' as {:?} of '{}'", envelope.name(), identity, namespace.name());
    trace!("Generated template source:\n{envelope}");

    let parsed = match identity {
        Identity::Root => namespace.parse_root(envelope.as_str()),
        Identity::Child(name) => namespace.parse_child(name, envelope.as_str()),
    };
    parsed.map_err(|e| Error::TemplateSyntaxError {
        name: envelope.name().to_string(),
        message: e.to_string(),
        envelope: envelope.to_string(),
    })?;
    Ok(namespace)
}

/// Creates a namespace rooted at the envelope's name and registers it.
pub fn register_new<N: Namespace>(envelope: &Envelope) -> Result<N> {
    let mut namespace = N::create(envelope.name());
    register(&mut namespace, envelope)?;
    Ok(namespace)
}

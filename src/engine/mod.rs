//! Template namespace: a named, linked collection of parsed templates.
//!
//! [`Namespace`] is the seam the registrar talks to. [`TemplateSet`] implements
//! it on top of [`gtmpl::Template`], which parses the `{{ define }}` /
//! `{{ template }}` action language. The set only registers templates;
//! rendering is left to whoever holds the inner template.

use crate::error::Error;
use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Tree name for top-level text while a source is being parsed. It contains
/// a control character so no registered template can share it.
const TOP_LEVEL: &str = "\u{0}top-level";

static TEMPLATE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{-?\s*template\s+"(?P<name>[^"\\]*)""#).expect("reference pattern is valid")
});

/// Trait for mutable template namespaces.
///
/// A failed parse must leave the namespace exactly as it was.
pub trait Namespace: Sized {
    /// Engine diagnostic returned by a failed parse.
    type Error: fmt::Display;

    /// Creates an empty namespace whose root template is called `name`.
    fn create(name: &str) -> Self;

    /// Name of the root template.
    fn name(&self) -> &str;

    /// Parses `source` into the root template, replacing its content.
    fn parse_root(&mut self, source: &str) -> Result<(), Self::Error>;

    /// Parses `source` into the child template `name`, creating it if needed.
    fn parse_child(&mut self, name: &str, source: &str) -> Result<(), Self::Error>;

    /// Whether a template called `name` is defined.
    fn contains(&self, name: &str) -> bool;
}

/// A registered template and the source text it came from.
#[derive(Debug, Clone)]
pub struct Definition {
    name: String,
    source: Arc<str>,
    empty: bool,
}

impl Definition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full source text this template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the template holds nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Names passed to `{{ template }}` calls in the source, in order of
    /// appearance. The source already parsed, so a plain scan is exact.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for caps in TEMPLATE_REFERENCE.captures_iter(&self.source) {
            if let Some(name) = caps.name("name") {
                out.push(name.as_str());
            }
        }
        out
    }
}

/// Template namespace backed by [`gtmpl::Template`].
pub struct TemplateSet {
    name: String,
    template: gtmpl::Template,
    definitions: IndexMap<String, Definition>,
}

impl TemplateSet {
    /// Creates an empty set whose root template is called `name`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        Self {
            template: gtmpl::Template::with_name(name.as_str()),
            name,
            definitions: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed templates, ready to render from the root.
    pub fn template(&self) -> &gtmpl::Template {
        &self.template
    }

    pub fn lookup(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// Templates in the order they were first defined.
    pub fn templates(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Quoted, comma-separated list of defined template names.
    pub fn defined_templates(&self) -> String {
        self.definitions.keys().map(|name| format!("{name:?}")).collect::<Vec<_>>().join(", ")
    }

    /// `(caller, callee)` pairs for template calls naming undefined templates.
    pub fn unresolved_references(&self) -> Vec<(&str, &str)> {
        let mut missing = Vec::new();
        for definition in self.definitions.values() {
            for reference in definition.references() {
                let pair = (definition.name(), reference);
                if !self.definitions.contains_key(reference) && !missing.contains(&pair) {
                    missing.push(pair);
                }
            }
        }
        missing
    }

    /// Reports unresolved template calls and returns how many there are.
    ///
    /// Each one is logged as a warning. With `strict` the first one is an
    /// error instead.
    ///
    /// # Errors
    /// * `Error::UnresolvedReferenceError` in strict mode
    pub fn check_references(&self, strict: bool) -> crate::error::Result<usize> {
        let missing = self.unresolved_references();
        for &(template, reference) in &missing {
            if strict {
                return Err(Error::UnresolvedReferenceError {
                    template: template.to_string(),
                    reference: reference.to_string(),
                });
            }
            warn!("Template '{template}' references undefined template '{reference}'");
        }
        Ok(missing.len())
    }

    /// Parses `source` as the content of template `slot`.
    ///
    /// Top-level text becomes `slot`'s content and every `define`/`block`
    /// adds a named template. The source is parsed on its own first, so
    /// nothing is committed unless all of it parses. A whitespace-only tree
    /// never replaces a non-empty one.
    pub fn parse(&mut self, slot: &str, source: &str) -> Result<(), String> {
        let mut scratch = gtmpl::Template::default();
        scratch
            .add_template(TOP_LEVEL, source)
            .map_err(|e| e.to_string().replace(TOP_LEVEL, slot))?;

        let mut trees = std::mem::take(&mut scratch.tree_set);
        if let Some(top) = trees.remove(TOP_LEVEL) {
            let top_empty =
                top.root.as_ref().map_or(true, |root| root.is_empty_tree().unwrap_or(false));
            match trees.get(slot) {
                Some(_) if top_empty => {}
                Some(_) => {
                    return Err(format!("template: {slot}: multiple definitions of template {slot}"))
                }
                None => {
                    trees.insert(slot.to_string(), top);
                }
            }
        }

        let source: Arc<str> = Arc::from(source);
        let mut names: Vec<String> = trees.keys().cloned().collect();
        names.sort();
        for name in names {
            let Some(tree) = trees.remove(&name) else { continue };
            let empty =
                tree.root.as_ref().map_or(true, |root| root.is_empty_tree().unwrap_or(false));
            if empty && self.definitions.get(&name).is_some_and(|existing| !existing.empty) {
                debug!("Keeping earlier definition of '{name}'");
                continue;
            }
            self.template.tree_set.insert(name.clone(), tree);
            let definition = Definition { name: name.clone(), source: Arc::clone(&source), empty };
            self.definitions.insert(name, definition);
        }
        Ok(())
    }
}

impl fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateSet")
            .field("name", &self.name)
            .field("definitions", &self.definitions)
            .finish()
    }
}

impl Namespace for TemplateSet {
    type Error = String;

    fn create(name: &str) -> Self {
        TemplateSet::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parse_root(&mut self, source: &str) -> Result<(), String> {
        let name = self.name.clone();
        self.parse(&name, source)
    }

    fn parse_child(&mut self, name: &str, source: &str) -> Result<(), String> {
        self.parse(name, source)
    }

    fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }
}

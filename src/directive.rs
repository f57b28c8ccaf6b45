//! Repairs template directives mangled by the Markdown converter.
//!
//! Typographic quote substitution turns `{{ template "child" .Param }}` into
//! `{{ template &ldquo;child&rdquo; .Param }}` (or literal `“`/`”`, or
//! `&quot;` when substitution is off), which the template engine cannot parse.
//!
//! Input contract: HTML as emitted by a [`crate::markup::MarkupConverter`].
//! Output contract: the same HTML where every `template` call written on one
//! line uses straight quotes, and no curly quote remains anywhere.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

const OPEN_QUOTES: [&str; 2] = ["&ldquo;", "\u{201c}"];
const CLOSE_QUOTES: [&str; 2] = ["&rdquo;", "\u{201d}"];

static TEMPLATE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{\{[ \t]*template[ \t]*(?:&ldquo;|\x{201c}|&quot;)(?P<name>.*?)(?:&rdquo;|\x{201d}|&quot;)[ \t]*(?P<param>.*?)[ \t]*\}\}",
    )
    .expect("template call pattern is valid")
});

/// Rewrites mangled `template` calls to the engine's straight-quote syntax.
///
/// The name is kept verbatim. Escaped straight quotes in the parameter are
/// restored, curly ones are left to [`unescape_quotes`]. Matching never
/// spans lines.
pub fn rewrite_directives(html: &str) -> Cow<'_, str> {
    TEMPLATE_CALL.replace_all(html, |caps: &Captures| {
        let name = &caps["name"];
        match caps["param"].replace("&quot;", "\"") {
            param if param.is_empty() => format!("{{{{ template \"{name}\" }}}}"),
            param => format!("{{{{ template \"{name}\" {param} }}}}"),
        }
    })
}

/// Replaces every curly double quote, entity or literal, with `"`.
pub fn unescape_quotes(html: &str) -> String {
    let mut out = html.to_string();
    for quote in OPEN_QUOTES.iter().chain(CLOSE_QUOTES.iter()) {
        if out.contains(quote) {
            out = out.replace(quote, "\"");
        }
    }
    out
}

/// Runs [`rewrite_directives`] followed by [`unescape_quotes`].
pub fn repair(html: &str) -> String {
    unescape_quotes(&rewrite_directives(html))
}

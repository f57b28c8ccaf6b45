//! Markdown to HTML conversion.
//! The converter sits behind [`MarkupConverter`] so it can be swapped without
//! touching the directive rewrite that follows it.

use crate::config::MarkdownOptions;
use crate::error::ConversionFailure;
use comrak::{markdown_to_html, Options};

/// Trait for markup-to-HTML converters.
pub trait MarkupConverter {
    /// Converts markup bytes to HTML.
    ///
    /// # Arguments
    /// * `source` - Raw markup
    ///
    /// # Returns
    /// * `Result<String, ConversionFailure>` - The HTML, or the converter's own error
    fn convert(&self, source: &[u8]) -> Result<String, ConversionFailure>;
}

impl<F> MarkupConverter for F
where
    F: Fn(&[u8]) -> Result<String, ConversionFailure>,
{
    fn convert(&self, source: &[u8]) -> Result<String, ConversionFailure> {
        self(source)
    }
}

/// CommonMark converter backed by comrak.
pub struct ComrakConverter {
    options: Options<'static>,
}

impl ComrakConverter {
    /// Creates a converter from the configured Markdown options.
    pub fn new(markdown: &MarkdownOptions) -> Self {
        let mut options = Options::default();
        options.parse.smart = markdown.smart;
        options.render.r#unsafe = markdown.unsafe_html;
        options.render.hardbreaks = markdown.hardbreaks;
        options.extension.table = markdown.tables;
        options.extension.strikethrough = markdown.strikethrough;
        options.extension.autolink = markdown.autolink;
        options.extension.tasklist = markdown.tasklist;
        options.extension.footnotes = markdown.footnotes;
        Self { options }
    }
}

impl Default for ComrakConverter {
    fn default() -> Self {
        ComrakConverter::new(&MarkdownOptions::default())
    }
}

impl MarkupConverter for ComrakConverter {
    /// Converts UTF-8 Markdown to HTML.
    ///
    /// # Errors
    /// * The UTF-8 decoding error if `source` is not valid UTF-8
    fn convert(&self, source: &[u8]) -> Result<String, ConversionFailure> {
        let text = std::str::from_utf8(source)?;
        Ok(markdown_to_html(text, &self.options))
    }
}

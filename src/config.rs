//! Run configuration.

use std::path::PathBuf;

use crate::dom::Syntax;

pub const DEFAULT_OUTPUT_TEMPLATE_PATH: &str = "template/gtk-3.0";
pub const DEFAULT_SNIPPETS_PATH: &str = "snippets";
pub const DEFAULT_WIDGET_PATTERN: &str = "Gtk*.html";
pub const DEFAULT_STYLE_CONTEXT_DOCUMENT: &str = "GtkStyleContext.html";

/// What to do with a widget page whose sections exist but cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the widget, leave it out of the corpus and keep going.
    #[default]
    SkipMalformed,
    /// Abort the run on the first malformed widget page.
    FailFast,
}

/// Where to read documentation and snippets from and where to write templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the gtk-doc HTML reference pages.
    pub source_docs_path: PathBuf,
    /// Theme directory receiving the generated CSS (`.../gtk-3.0`).
    pub output_template_path: PathBuf,
    /// Directory of `<name>_header.css` / `<name>_footer.css` snippets and `index.theme`.
    pub snippets_path: PathBuf,
    /// File-name glob selecting widget pages.
    pub widget_pattern: String,
    /// File name of the page documenting style classes.
    pub style_context_document: String,
    pub syntax: Syntax,
    pub failure_policy: FailurePolicy,
}

impl Config {
    /// Configuration with default output and snippet locations.
    pub fn new(source_docs_path: impl Into<PathBuf>) -> Self {
        Self {
            source_docs_path: source_docs_path.into(),
            output_template_path: PathBuf::from(DEFAULT_OUTPUT_TEMPLATE_PATH),
            snippets_path: PathBuf::from(DEFAULT_SNIPPETS_PATH),
            widget_pattern: DEFAULT_WIDGET_PATTERN.to_string(),
            style_context_document: DEFAULT_STYLE_CONTEXT_DOCUMENT.to_string(),
            syntax: Syntax::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_output_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_template_path = path.into();
        self
    }

    pub fn with_snippets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snippets_path = path.into();
        self
    }

    pub fn with_widget_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.widget_pattern = pattern.into();
        self
    }

    pub fn with_style_context_document(mut self, file_name: impl Into<String>) -> Self {
        self.style_context_document = file_name.into();
        self
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Full path of the style-context page.
    pub fn style_context_path(&self) -> PathBuf {
        self.source_docs_path.join(&self.style_context_document)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("/usr/share/gtk-doc/html/gtk3");

        assert_eq!(config.output_template_path, Path::new("template/gtk-3.0"));
        assert_eq!(config.snippets_path, Path::new("snippets"));
        assert_eq!(config.widget_pattern, "Gtk*.html");
        assert_eq!(config.syntax, Syntax::Xml);
        assert_eq!(config.failure_policy, FailurePolicy::SkipMalformed);
        assert_eq!(
            config.style_context_path(),
            Path::new("/usr/share/gtk-doc/html/gtk3/GtkStyleContext.html")
        );
    }

    #[test]
    fn test_builder() {
        let config = Config::new("docs")
            .with_output_template_path("out/gtk-3.0")
            .with_snippets_path("snips")
            .with_widget_pattern("Gtk*Button.html")
            .with_style_context_document("gtk3-GtkStyleContext.html")
            .with_syntax(Syntax::Html)
            .with_failure_policy(FailurePolicy::FailFast);

        assert_eq!(config.output_template_path, Path::new("out/gtk-3.0"));
        assert_eq!(config.snippets_path, Path::new("snips"));
        assert_eq!(config.widget_pattern, "Gtk*Button.html");
        assert_eq!(
            config.style_context_path(),
            Path::new("docs/gtk3-GtkStyleContext.html")
        );
        assert_eq!(config.syntax, Syntax::Html);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
    }
}

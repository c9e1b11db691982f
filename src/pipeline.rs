//! End-to-end runs: documentation directory in, theme template out.

use std::path::PathBuf;

use crate::config::Config;
use crate::dom::load_document;
use crate::error::Result;
use crate::extract::{SkippedWidget, extract_corpus, extract_style_classes};
use crate::model::{Corpus, StyleClasses};
use crate::output::{AGGREGATE_FILE, COLORS_FILE, GTK_FILE, TemplateWriter};
use crate::render::{
    STYLE_CLASSES_TEMPLATE, render_passthrough, render_style_classes, render_widget,
};
use crate::snippets::SnippetStore;

/// Everything read from a documentation directory.
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    pub corpus: Corpus,
    pub classes: StyleClasses,
    pub skipped: Vec<SkippedWidget>,
}

/// Counts reported after a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Widget templates written.
    pub widgets: usize,
    pub classes: usize,
    /// Malformed widget pages left out.
    pub skipped: usize,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}

/// Extract the widget corpus and the style-class table.
pub fn extract(config: &Config) -> Result<Extracted> {
    let report = extract_corpus(config)?;

    let style_context = config.style_context_path();
    tracing::info!(path = %style_context.display(), "processing");
    let doc = load_document(&style_context, config.syntax)?;
    let classes = extract_style_classes(&doc)?;

    tracing::info!(
        widgets = report.corpus.len(),
        classes = classes.len(),
        skipped = report.skipped.len(),
        "extraction finished"
    );

    Ok(Extracted {
        corpus: report.corpus,
        classes,
        skipped: report.skipped,
    })
}

/// Extract everything and write the full template tree.
pub fn generate(config: &Config) -> Result<Summary> {
    let extracted = extract(config)?;
    write_templates(config, &extracted)
}

/// Render and write templates for already-extracted data.
///
/// `index.theme` is read before anything is written, so a missing one leaves
/// the output directory untouched.
pub fn write_templates(config: &Config, extracted: &Extracted) -> Result<Summary> {
    let store = SnippetStore::new(&config.snippets_path);
    let index_theme = store.index_theme()?;
    let writer = TemplateWriter::new(&config.output_template_path);
    let mut files = Vec::new();

    for record in extracted.corpus.values() {
        let snippets = store.load(&record.name)?;
        files.push(writer.write_widget(record, &render_widget(record, &snippets))?);
    }

    let snippets = store.load(STYLE_CLASSES_TEMPLATE)?;
    let aggregate = render_style_classes(&extracted.classes, &extracted.corpus, &snippets);
    files.push(writer.write(AGGREGATE_FILE, &aggregate)?);

    for (name, file) in [("gtk", GTK_FILE), ("colors", COLORS_FILE)] {
        let snippets = store.load(name)?;
        files.push(writer.write(file, &render_passthrough(&snippets))?);
    }

    files.push(writer.write_index_theme(&index_theme)?);

    Ok(Summary {
        widgets: extracted.corpus.len(),
        classes: extracted.classes.len(),
        skipped: extracted.skipped.len(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::Error;
    use crate::model::WidgetRecord;
    use tempfile::TempDir;

    fn extracted() -> Extracted {
        let mut corpus = Corpus::new();
        corpus.add(WidgetRecord {
            name: "GtkButton".to_string(),
            properties: Vec::new(),
            hierarchy: vec!["GtkButton".to_string()],
        });
        Extracted {
            corpus,
            ..Extracted::default()
        }
    }

    #[test]
    fn test_missing_index_theme_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path())
            .with_snippets_path(dir.path().join("snippets"))
            .with_output_template_path(dir.path().join("out/gtk-3.0"));

        let err = write_templates(&config, &extracted()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_write_order() {
        let dir = TempDir::new().unwrap();
        let snippets = dir.path().join("snippets");
        fs::create_dir(&snippets).unwrap();
        fs::write(snippets.join("index.theme"), "[X-GNOME-Metatheme]\n").unwrap();
        let out = dir.path().join("out/gtk-3.0");
        let config = Config::new(dir.path())
            .with_snippets_path(&snippets)
            .with_output_template_path(&out);

        let summary = write_templates(&config, &extracted()).unwrap();

        assert_eq!(summary.widgets, 1);
        assert_eq!(
            summary.files,
            vec![
                out.join("widgets/gtkbutton.css"),
                out.join("gtk-widgets.css"),
                out.join("gtk.css"),
                out.join("colors.css"),
                out.join("..").join("index.theme"),
            ]
        );
    }
}

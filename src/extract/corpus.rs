//! Corpus extraction over a documentation directory.

use std::fs;
use std::path::{Path, PathBuf};

use globset::Glob;

use crate::config::{Config, FailurePolicy};
use crate::dom::{Syntax, load_document};
use crate::error::{Error, Result};
use crate::model::Corpus;

use super::Extraction;
use super::widget::extract_widget;

/// A widget page left out of the corpus because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct SkippedWidget {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a corpus run.
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    pub corpus: Corpus,
    /// Malformed pages skipped under [`FailurePolicy::SkipMalformed`].
    pub skipped: Vec<SkippedWidget>,
    /// Pages read, whether or not they produced a widget.
    pub documents: usize,
}

/// List the widget pages of `dir`, sorted by file name.
///
/// Sorting makes the corpus order, and with it the import list of the
/// generated stylesheet, identical from run to run on every platform.
pub fn discover_widget_documents(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(pattern)?.compile_matcher();
    let entries = fs::read_dir(dir).map_err(|source| Error::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.file_name().is_some_and(|name| matcher.is_match(name)) {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths)
}

/// Discover and extract every widget page named by `config`.
pub fn extract_corpus(config: &Config) -> Result<CorpusReport> {
    let paths = discover_widget_documents(&config.source_docs_path, &config.widget_pattern)?;
    extract_documents(&paths, config.syntax, config.failure_policy)
}

/// Extract the given widget pages, in order.
///
/// Pages without style properties are left out silently. A page that fails
/// to parse aborts the run regardless of `policy`.
pub fn extract_documents(
    paths: &[PathBuf],
    syntax: Syntax,
    policy: FailurePolicy,
) -> Result<CorpusReport> {
    let mut report = CorpusReport::default();

    for path in paths {
        tracing::info!(path = %path.display(), "processing");
        let doc = load_document(path, syntax)?;
        report.documents += 1;

        match extract_widget(&doc) {
            Extraction::Found(record) => {
                tracing::debug!(
                    widget = %record.name,
                    properties = record.properties.len(),
                    "extracted widget"
                );
                let name = record.name.clone();
                if report.corpus.add(record).is_some() {
                    tracing::warn!(widget = %name, path = %path.display(), "widget documented twice, keeping the later page");
                }
            }
            Extraction::NotApplicable => {
                tracing::debug!(path = %path.display(), "no style properties");
            }
            Extraction::Malformed(reason) => match policy {
                FailurePolicy::FailFast => {
                    return Err(Error::MalformedWidget {
                        path: path.clone(),
                        reason,
                    });
                }
                FailurePolicy::SkipMalformed => {
                    tracing::warn!(path = %path.display(), %reason, "skipping malformed widget page");
                    report.skipped.push(SkippedWidget {
                        path: path.clone(),
                        reason,
                    });
                }
            },
        }
    }

    Ok(report)
}

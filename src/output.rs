//! Writing rendered templates into a theme directory.
//!
//! Layout of a generated theme, rooted at the template path:
//!
//! ```text
//! <theme>/index.theme
//! <theme>/gtk-3.0/gtk.css
//! <theme>/gtk-3.0/colors.css
//! <theme>/gtk-3.0/gtk-widgets.css
//! <theme>/gtk-3.0/widgets/<widget>.css
//! ```
//!
//! Files are overwritten in place, not atomically.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::WidgetRecord;

pub const WIDGETS_DIR: &str = "widgets";
pub const AGGREGATE_FILE: &str = "gtk-widgets.css";
pub const GTK_FILE: &str = "gtk.css";
pub const COLORS_FILE: &str = "colors.css";
pub const INDEX_THEME_FILE: &str = "index.theme";

/// Writes template files below a template root directory.
#[derive(Debug, Clone)]
pub struct TemplateWriter {
    root: PathBuf,
}

impl TemplateWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `text` to `relative` under the root, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, text: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        write_file(&path, text)?;
        Ok(path)
    }

    /// `widgets/<lowercase name>.css`
    pub fn write_widget(&self, record: &WidgetRecord, text: &str) -> Result<PathBuf> {
        self.write(widget_path(record), text)
    }

    /// Write `index.theme` into the parent of the template root.
    pub fn write_index_theme(&self, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(|source| Error::Write {
            path: self.root.clone(),
            source,
        })?;
        let path = self.root.join("..").join(INDEX_THEME_FILE);
        write_file(&path, text)?;
        Ok(path)
    }
}

/// Template path of a widget relative to the template root.
pub fn widget_path(record: &WidgetRecord) -> PathBuf {
    Path::new(WIDGETS_DIR).join(format!("{}.css", record.file_stem()))
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    tracing::info!(path = %path.display(), "writing");
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str) -> WidgetRecord {
        WidgetRecord {
            name: name.to_string(),
            properties: Vec::new(),
            hierarchy: vec![name.to_string()],
        }
    }

    #[test]
    fn test_write_widget_creates_directories() {
        let dir = TempDir::new().unwrap();
        let writer = TemplateWriter::new(dir.path().join("theme/gtk-3.0"));

        let path = writer.write_widget(&record("GtkToggleButton"), "GtkToggleButton {}").unwrap();

        assert_eq!(path, dir.path().join("theme/gtk-3.0/widgets/gtktogglebutton.css"));
        assert_eq!(fs::read_to_string(path).unwrap(), "GtkToggleButton {}");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = TemplateWriter::new(dir.path());

        writer.write(GTK_FILE, "old").unwrap();
        let path = writer.write(GTK_FILE, "new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_index_theme_goes_beside_template_root() {
        let dir = TempDir::new().unwrap();
        let writer = TemplateWriter::new(dir.path().join("theme/gtk-3.0"));

        writer.write_index_theme("[Desktop Entry]\n").unwrap();

        let index = dir.path().join("theme/index.theme");
        assert_eq!(fs::read_to_string(index).unwrap(), "[Desktop Entry]\n");
    }

    #[test]
    fn test_write_failure_names_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blocker"), "").unwrap();
        let writer = TemplateWriter::new(dir.path().join("blocker"));

        let err = writer.write(COLORS_FILE, "").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}

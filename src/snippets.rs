//! Header/footer snippets wrapped around generated templates.
//!
//! A snippet directory holds hand-written CSS that is pasted verbatim
//! before or after a generated file:
//!
//! ```text
//! snippets/
//!   gtkbutton_header.css     before widgets/gtkbutton.css
//!   gtk-widgets_footer.css   after gtk-widgets.css
//!   colors_header.css        colors.css is header + footer only
//!   index.theme              copied next to the theme directory
//! ```
//!
//! Snippet names are lowercased before lookup. Missing snippets are simply
//! absent.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const INDEX_THEME: &str = "index.theme";

/// Optional raw text placed before and after a generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippets {
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl Snippets {
    /// No header and no footer.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or_default()
    }

    pub fn footer(&self) -> &str {
        self.footer.as_deref().unwrap_or_default()
    }
}

/// Snippet files on disk.
#[derive(Debug, Clone)]
pub struct SnippetStore {
    dir: PathBuf,
}

impl SnippetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Header and footer for a logical template name such as `GtkButton` or `colors`.
    pub fn load(&self, name: &str) -> Result<Snippets> {
        Ok(Snippets {
            header: self.header(name)?,
            footer: self.footer(name)?,
        })
    }

    /// `<lowercase name>_header.css`, if present.
    pub fn header(&self, name: &str) -> Result<Option<String>> {
        self.read_optional(&format!("{}_header.css", name.to_lowercase()))
    }

    /// `<lowercase name>_footer.css`, if present.
    pub fn footer(&self, name: &str) -> Result<Option<String>> {
        self.read_optional(&format!("{}_footer.css", name.to_lowercase()))
    }

    /// The theme's `index.theme`, which every generated theme needs.
    pub fn index_theme(&self) -> Result<String> {
        let path = self.dir.join(INDEX_THEME);
        fs::read_to_string(&path).map_err(|source| Error::Read { path, source })
    }

    fn read_optional(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.dir.join(file_name);
        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "using snippet");
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Read { path, source }),
        }
    }
}

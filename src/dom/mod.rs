//! Document loading.
//!
//! A documentation page is read from disk, decoded to UTF-8 and parsed into
//! an arena [`Document`]. Two parsers feed the same arena:
//!
//! - [`Syntax::Xml`] (default) requires well-formed markup and reports a
//!   parse error otherwise.
//! - [`Syntax::Html`] runs html5ever and accepts anything a browser would.
//!
//! # Example
//!
//! ```
//! use gtk_theme_template::dom::{Syntax, parse_str};
//!
//! let doc = parse_str("<div><h2>Object Hierarchy</h2></div>", Syntax::Xml).unwrap();
//! assert!(doc.find_heading(doc.root(), "h2", "Object Hierarchy").is_some());
//! ```

mod arena;
mod tree_sink;
mod xml;

pub use arena::{Attribute, Document, Node, NodeData, NodeId};
pub use xml::MarkupError;

use std::fs;
use std::path::Path;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use crate::error::{Error, Result};
use crate::util::{decode_text, sniff_declared_encoding};
use tree_sink::DocumentSink;

/// Which parser to load documentation pages with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Syntax {
    /// Strict, well-formed XML/XHTML.
    #[default]
    Xml,
    /// Lenient HTML5 parsing.
    Html,
}

/// Load and parse one documentation page.
pub fn load_document(path: &Path, syntax: Syntax) -> Result<Document> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, encoding) = decode_text(&bytes, sniff_declared_encoding(&bytes));
    if encoding != encoding_rs::UTF_8 {
        tracing::debug!(path = %path.display(), encoding = encoding.name(), "decoded non-UTF-8 page");
    }

    parse_str(&text, syntax).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse already-decoded page content.
pub fn parse_str(content: &str, syntax: Syntax) -> std::result::Result<Document, MarkupError> {
    match syntax {
        Syntax::Xml => xml::parse_xml(content),
        Syntax::Html => Ok(parse_html(content)),
    }
}

/// Parse HTML leniently. Never fails; malformed input is repaired.
pub fn parse_html(content: &str) -> Document {
    let sink = parse_document(DocumentSink::new(), ParseOpts::default())
        .from_utf8()
        .one(content.as_bytes());
    if sink.error_count() > 0 {
        tracing::trace!(errors = sink.error_count(), "html5ever repaired markup");
    }
    sink.into_document()
}

//! # gtk-theme-template
//!
//! Generates a commented GTK 3 theme template from the gtk-doc HTML reference.
//!
//! Each widget page that documents style properties becomes one CSS file
//! listing every property, its type, default and allowed values, along with
//! the widget's inheritance chain. The style-context page contributes an
//! aggregate stylesheet of style classes and their member widgets.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gtk_theme_template::{Config, generate};
//!
//! let config = Config::new("/usr/share/gtk-doc/html/gtk3")
//!     .with_output_template_path("MyTheme/gtk-3.0");
//! let summary = generate(&config)?;
//! println!("{} widget templates", summary.widgets);
//! # Ok::<(), gtk_theme_template::Error>(())
//! ```
//!
//! ## Stages
//!
//! - [`dom`] loads a page into an arena document
//! - [`extract`] pulls [`WidgetRecord`]s and style classes out of documents
//! - [`render`] turns records into CSS text, wrapped in [`snippets`]
//! - [`output`] writes the template tree
//!
//! [`pipeline`] strings them together.

pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod snippets;
pub(crate) mod util;

pub use config::{Config, FailurePolicy};
pub use dom::{Document, Syntax, load_document};
pub use error::{Error, Result};
pub use extract::{Extraction, SkippedWidget};
pub use model::{Corpus, StyleClasses, StyleProperty, WidgetRecord};
pub use pipeline::{Extracted, Summary, extract, generate};

//! Extraction of widget-styling metadata from documentation trees.
//!
//! - [`widget`] reads one widget page: style properties and object hierarchy
//! - [`style_class`] reads the style-class table of the style-context page
//! - [`corpus`] walks a documentation directory and collects every widget

pub mod corpus;
pub mod style_class;
pub mod widget;

pub use corpus::{CorpusReport, SkippedWidget, discover_widget_documents, extract_corpus};
pub use style_class::extract_style_classes;
pub use widget::{
    PropertySection, extract_hierarchy, extract_style_properties, extract_style_property,
    extract_widget, locate_style_properties_section,
};

/// Outcome of a lookup whose absence can be either normal or a defect.
///
/// A widget page without a "Style Property Details" section is simply a
/// widget with nothing to theme ([`Extraction::NotApplicable`]); a page whose
/// sections exist but do not have the expected shape is
/// [`Extraction::Malformed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Found(T),
    NotApplicable,
    Malformed(String),
}

impl<T> Extraction<T> {
    /// The found value, discarding the reason for anything else.
    pub fn found(self) -> Option<T> {
        match self {
            Extraction::Found(value) => Some(value),
            _ => None,
        }
    }

    /// `Found(v)` → `Ok(Some(v))`, `NotApplicable` → `Ok(None)`, `Malformed(r)` → `Err(r)`.
    ///
    /// Lets extraction steps be chained with `?`.
    pub fn into_outcome(self) -> Result<Option<T>, String> {
        match self {
            Extraction::Found(value) => Ok(Some(value)),
            Extraction::NotApplicable => Ok(None),
            Extraction::Malformed(reason) => Err(reason),
        }
    }

    /// Inverse of [`Extraction::into_outcome`].
    pub fn from_outcome(outcome: Result<Option<T>, String>) -> Self {
        match outcome {
            Ok(Some(value)) => Extraction::Found(value),
            Ok(None) => Extraction::NotApplicable,
            Err(reason) => Extraction::Malformed(reason),
        }
    }
}

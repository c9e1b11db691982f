//! Extracted widget-styling metadata.

use std::collections::BTreeSet;

/// One documented style property of a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct StyleProperty {
    pub name: String,
    /// Declared value type, e.g. `gint` or `GtkBorder`.
    #[cfg_attr(feature = "cli", serde(rename = "type"))]
    pub ty: String,
    /// First sentence of the property's documentation.
    pub description: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub default: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub allowed: Option<String>,
}

impl StyleProperty {
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: description.into(),
            default: None,
            allowed: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_allowed(mut self, allowed: impl Into<String>) -> Self {
        self.allowed = Some(allowed.into());
        self
    }
}

/// Style properties and inheritance chain of one widget type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct WidgetRecord {
    pub name: String,
    /// Properties in document order.
    pub properties: Vec<StyleProperty>,
    /// Ancestor chain, most-derived (the widget itself) first.
    pub hierarchy: Vec<String>,
}

impl WidgetRecord {
    /// Lowercase file stem used for the widget's template file.
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Insertion-ordered mapping from key to value with unique keys.
///
/// Inserting an existing key replaces its value in place, so the position of
/// a key is decided by its first insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace. Returns the previous value for the key, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "cli")]
impl<V: serde::Serialize> serde::Serialize for OrderedMap<V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Widget name to record, in extraction order.
pub type Corpus = OrderedMap<WidgetRecord>;

/// Style class name to the widget types documented as using it.
///
/// Members are a sorted set, so rendering is deterministic.
pub type StyleClasses = OrderedMap<BTreeSet<String>>;

impl Corpus {
    /// Add a widget under its own name.
    pub fn add(&mut self, record: WidgetRecord) -> Option<WidgetRecord> {
        let name = record.name.clone();
        self.insert(name, record)
    }
}

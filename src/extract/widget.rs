//! Widget page extraction.
//!
//! A gtk-doc widget page carries, among other sections:
//!
//! ```html
//! <div class="refsect1">
//! <a name="GtkButton.object-hierarchy"></a>
//! <h2>Object Hierarchy</h2>
//! <pre class="synopsis">
//!   GObject
//!    +----GInitiallyUnowned
//!          +----<a href="GtkWidget.html">GtkWidget</a>
//!                +----GtkButton
//! </pre>
//! </div>
//! <div class="refsect1">
//! <a name="GtkButton.style-property-details"></a>
//! <h2>Style Property Details</h2>
//! <div class="refsect2">
//! <pre class="programlisting">  "focus-line-width"  <span class="type">gint</span>  : Read</pre>
//! <p>Width in pixels of the focus indicator line.</p>
//! <p>Allowed values: &gt;= 0</p>
//! <p>Default value: 1</p>
//! </div>
//! </div>
//! ```

use crate::dom::{Document, NodeData, NodeId};
use crate::error::{Error, Result};
use crate::model::{StyleProperty, WidgetRecord};

use super::Extraction;

pub const STYLE_PROPERTY_HEADING: &str = "Style Property Details";
pub const HIERARCHY_HEADING: &str = "Object Hierarchy";

/// GObject base types that sit above every widget and carry no style properties.
pub const ROOT_BASE_TYPES: [&str; 2] = ["GObject", "GInitiallyUnowned"];

/// The "Style Property Details" section of a widget page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySection {
    pub widget_name: String,
    /// Parent of the heading; its `div` children are the property blocks.
    pub node: NodeId,
}

/// Find the style-property section and the widget it documents.
///
/// Pages without the section are [`Extraction::NotApplicable`]. The widget
/// name comes from the named anchor gtk-doc places before the heading
/// (`GtkButton.style-property-details` → `GtkButton`).
pub fn locate_style_properties_section(doc: &Document) -> Extraction<PropertySection> {
    let Some(heading) = doc.find_heading(doc.root(), "h2", STYLE_PROPERTY_HEADING) else {
        return Extraction::NotApplicable;
    };

    let anchor = doc
        .preceding_sibling(heading, |id| doc.get_attr(id, "name").is_some())
        .and_then(|id| doc.get_attr(id, "name"));
    let Some(anchor) = anchor else {
        return Extraction::Malformed(format!(
            "no named anchor before \"{STYLE_PROPERTY_HEADING}\""
        ));
    };

    let widget_name = anchor.split('.').next().unwrap_or_default().trim();
    if widget_name.is_empty() {
        return Extraction::Malformed(format!("anchor \"{anchor}\" names no widget"));
    }

    match doc.parent(heading) {
        Some(node) => Extraction::Found(PropertySection {
            widget_name: widget_name.to_string(),
            node,
        }),
        None => Extraction::Malformed(format!("\"{STYLE_PROPERTY_HEADING}\" has no parent")),
    }
}

/// Read one property block.
pub fn extract_style_property(doc: &Document, block: NodeId) -> Result<StyleProperty> {
    let pre = doc
        .first_element_by_tag(block, "pre")
        .ok_or_else(|| missing("<pre> in property block"))?;
    let name = doc
        .first_text(pre)
        .and_then(|text| text.split('"').nth(1))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| missing("quoted property name in <pre>"))?;

    let span = doc
        .first_element_by_tag(block, "span")
        .ok_or_else(|| missing(&format!("type <span> for \"{name}\"")))?;
    let ty = doc.text_content(span).trim().to_string();
    if ty.is_empty() {
        return Err(missing(&format!("type text for \"{name}\"")));
    }

    let mut paragraphs = doc.elements_by_tag(block, "p");
    let first = paragraphs
        .next()
        .ok_or_else(|| missing(&format!("description <p> for \"{name}\"")))?;

    let mut property = StyleProperty::new(name, ty, first_sentence(&doc.text_content(first)));

    for p in std::iter::once(first).chain(paragraphs) {
        let text = doc.text_content(p);
        let text = text.trim_start();
        if text.starts_with("Default") {
            property.default = Some(labelled_value(text, name)?);
        }
        if text.starts_with("Allowed") {
            property.allowed = Some(labelled_value(text, name)?);
        }
    }

    Ok(property)
}

/// Read every property block (`div` child) of a style-property section.
pub fn extract_style_properties(doc: &Document, section: NodeId) -> Result<Vec<StyleProperty>> {
    let mut properties: Vec<StyleProperty> = Vec::new();

    for block in doc.children(section) {
        if !doc.is_element_named(block, "div") {
            continue;
        }
        let property = extract_style_property(doc, block)?;
        if properties.iter().any(|p| p.name == property.name) {
            tracing::warn!(property = %property.name, "style property documented twice, keeping the first");
            continue;
        }
        properties.push(property);
    }

    Ok(properties)
}

/// Read the ancestor chain of `widget_name`, the widget itself first.
///
/// The chain excludes [`ROOT_BASE_TYPES`] and ends at the widget's most
/// distant documented ancestor. Subclasses listed after the widget are cut.
pub fn extract_hierarchy(widget_name: &str, doc: &Document) -> Extraction<Vec<String>> {
    let Some(heading) = doc.find_heading(doc.root(), "h2", HIERARCHY_HEADING) else {
        return Extraction::Malformed(format!("no \"{HIERARCHY_HEADING}\" heading"));
    };
    let Some(block) = doc
        .parent(heading)
        .and_then(|section| doc.first_element_by_tag(section, "pre"))
    else {
        return Extraction::Malformed(format!("no <pre> under \"{HIERARCHY_HEADING}\""));
    };

    let names = match flatten_hierarchy(doc, block) {
        Ok(names) => names,
        Err(reason) => return Extraction::Malformed(reason),
    };

    let mut chain: Vec<String> = names
        .into_iter()
        .filter(|name| !name.is_empty() && !ROOT_BASE_TYPES.contains(&name.as_str()))
        .collect();

    let Some(position) = chain.iter().position(|name| name == widget_name) else {
        return Extraction::Malformed(format!("{widget_name} is missing from its own hierarchy"));
    };
    chain.truncate(position + 1);
    chain.reverse();

    Extraction::Found(chain)
}

/// Extract a complete widget record from a widget page.
pub fn extract_widget(doc: &Document) -> Extraction<WidgetRecord> {
    Extraction::from_outcome(widget_outcome(doc))
}

fn widget_outcome(doc: &Document) -> std::result::Result<Option<WidgetRecord>, String> {
    let Some(section) = locate_style_properties_section(doc).into_outcome()? else {
        return Ok(None);
    };

    let properties = extract_style_properties(doc, section.node).map_err(|e| e.to_string())?;
    let hierarchy = extract_hierarchy(&section.widget_name, doc)
        .into_outcome()?
        .ok_or_else(|| format!("no hierarchy for {}", section.widget_name))?;

    Ok(Some(WidgetRecord {
        name: section.widget_name,
        properties,
        hierarchy,
    }))
}

/// Flatten the mixed text/markup content of the hierarchy block into names.
///
/// Text is split into lines with the tree-drawing prefix removed; each inline
/// element contributes its text as one name. Comments are ignored.
fn flatten_hierarchy(
    doc: &Document,
    block: NodeId,
) -> std::result::Result<Vec<String>, String> {
    let mut names = Vec::new();

    for child in doc.children(block) {
        let Some(node) = doc.get(child) else {
            continue;
        };
        match &node.data {
            NodeData::Text(text) => {
                names.extend(text.lines().map(|line| strip_tree_prefix(line).to_string()));
            }
            NodeData::Element { name, .. } => {
                let text = doc.text_content(child);
                let text = text.trim();
                if text.is_empty() {
                    return Err(format!("empty <{}> in object hierarchy", name.local));
                }
                names.push(text.to_string());
            }
            NodeData::Comment(_) | NodeData::ProcessingInstruction(_) => {}
            NodeData::Document | NodeData::Doctype(_) => {
                return Err("unexpected node in object hierarchy".to_string());
            }
        }
    }

    Ok(names)
}

/// `"   +----GtkWidget"` → `"GtkWidget"`
fn strip_tree_prefix(line: &str) -> &str {
    line.trim().trim_start_matches(['+', '-']).trim()
}

/// Text up to the first `.`, newlines collapsed to single spaces, `.` restored.
fn first_sentence(text: &str) -> String {
    let sentence = text.split('.').next().unwrap_or_default();
    let words: Vec<&str> = sentence
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    format!("{}.", words.join(" "))
}

/// `"Default value: 1"` → `"1"`
fn labelled_value(text: &str, property: &str) -> Result<String> {
    text.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .ok_or_else(|| missing(&format!("':' in \"{}\" of \"{property}\"", text.trim())))
}

fn missing(what: &str) -> Error {
    Error::FieldExtraction(what.to_string())
}

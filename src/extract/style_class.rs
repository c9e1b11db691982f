//! Style-class table extraction.
//!
//! The style-context reference page documents which widget types use each
//! style class in a three-column table (class, macro, users) under the
//! "Style classes and regions" heading.

use std::collections::BTreeSet;

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::model::StyleClasses;

pub const STYLE_CLASSES_HEADING: &str = "Style classes and regions";

/// Class applied to every widget; it has no membership worth documenting.
pub const DEFAULT_CLASS: &str = "default";

/// Read the style-class table into a class → member types mapping.
///
/// Rows named [`DEFAULT_CLASS`] and rows without members are dropped. A
/// missing heading or table is an error: every documentation set has one.
pub fn extract_style_classes(doc: &Document) -> Result<StyleClasses> {
    let heading = doc
        .find_heading(doc.root(), "h3", STYLE_CLASSES_HEADING)
        .ok_or_else(|| Error::SectionNotFound(format!("\"{STYLE_CLASSES_HEADING}\" heading")))?;
    let table = doc
        .parent(heading)
        .and_then(|section| doc.first_element_by_tag(section, "table"))
        .ok_or_else(|| Error::SectionNotFound(format!("table under \"{STYLE_CLASSES_HEADING}\"")))?;
    let body = doc.first_element_by_tag(table, "tbody").unwrap_or(table);

    let mut classes = StyleClasses::new();
    for row in doc.elements_by_tag(body, "tr") {
        let Some((name, members)) = read_row(doc, row) else {
            continue;
        };
        if name == DEFAULT_CLASS || members.is_empty() {
            tracing::debug!(class = %name, "skipping style class");
            continue;
        }
        classes.insert(name, members);
    }

    Ok(classes)
}

fn read_row(doc: &Document, row: NodeId) -> Option<(String, BTreeSet<String>)> {
    let cells: Vec<NodeId> = doc.elements_by_tag(row, "td").collect();

    let name = doc.text_content(*cells.first()?).trim().to_string();
    if name.is_empty() {
        return None;
    }

    let members = cells
        .get(2)
        .map(|&users| {
            doc.elements_by_tag(users, "span")
                .map(|span| doc.text_content(span).trim().to_string())
                .filter(|member| !member.is_empty())
                .collect::<BTreeSet<String>>()
        })
        .unwrap_or_default();

    Some((name, members))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Syntax, parse_str};

    fn style_context(rows: &str) -> Document {
        let html = format!(
            r#"<html><body><div class="refsect2">
<a name="gtkstylecontext-classes"></a><h3>Style classes and regions</h3>
<p>Widgets can add style classes to their context.</p>
<div class="table"><table>
<thead><tr><th>Style class</th><th>Macro</th><th>Used by</th></tr></thead>
<tbody>{rows}</tbody>
</table></div>
</div></body></html>"#
        );
        parse_str(&html, Syntax::Xml).expect("fixture")
    }

    #[test]
    fn test_extract_members() {
        let doc = style_context(
            r#"<tr><td>suggested-action</td><td>GTK_STYLE_CLASS_SUGGESTED_ACTION</td>
<td><span class="type">GtkButton</span>, <span class="type">GtkEntry</span>, <span class="type">GtkButton</span></td></tr>"#,
        );
        let classes = extract_style_classes(&doc).unwrap();

        let members: Vec<_> = classes
            .get("suggested-action")
            .expect("class")
            .iter()
            .cloned()
            .collect();
        assert_eq!(members, vec!["GtkButton", "GtkEntry"]);
    }

    #[test]
    fn test_default_and_empty_rows_are_dropped() {
        let doc = style_context(
            r#"<tr><td>default</td><td>GTK_STYLE_CLASS_DEFAULT</td><td><span>GtkButton</span></td></tr>
<tr><td>background</td><td>GTK_STYLE_CLASS_BACKGROUND</td><td>toplevel windows</td></tr>
<tr><td>entry</td><td>GTK_STYLE_CLASS_ENTRY</td><td><span>GtkEntry</span></td></tr>
<tr><td>short</td></tr>"#,
        );
        let classes = extract_style_classes(&doc).unwrap();

        assert_eq!(classes.keys().collect::<Vec<_>>(), vec!["entry"]);
    }

    #[test]
    fn test_rows_keep_table_order() {
        let doc = style_context(
            r#"<tr><td>trough</td><td/><td><span>GtkScale</span></td></tr>
<tr><td>button</td><td/><td><span>GtkButton</span></td></tr>
<tr><td>check</td><td/><td><span>GtkCheckButton</span></td></tr>"#,
        );
        let classes = extract_style_classes(&doc).unwrap();

        assert_eq!(
            classes.keys().collect::<Vec<_>>(),
            vec!["trough", "button", "check"]
        );
    }

    #[test]
    fn test_missing_heading() {
        let doc = parse_str("<html><body><h3>Other</h3></body></html>", Syntax::Xml).unwrap();
        assert!(matches!(
            extract_style_classes(&doc),
            Err(Error::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_missing_table() {
        let doc = parse_str(
            "<html><body><div><h3>Style classes and regions</h3><p>none</p></div></body></html>",
            Syntax::Xml,
        )
        .unwrap();
        assert!(matches!(
            extract_style_classes(&doc),
            Err(Error::SectionNotFound(_))
        ));
    }
}

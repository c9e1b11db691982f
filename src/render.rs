//! CSS template rendering.
//!
//! Every generated file is commented-out documentation: a theme author
//! uncomments the declarations they want to change. Rendering is pure; the
//! caller supplies the [`Snippets`] to wrap each file in.
//!
//! # Example
//!
//! ```
//! use gtk_theme_template::model::{StyleProperty, WidgetRecord};
//! use gtk_theme_template::render::render_widget;
//! use gtk_theme_template::snippets::Snippets;
//!
//! let record = WidgetRecord {
//!     name: "GtkButton".into(),
//!     properties: vec![StyleProperty::new("focus-line-width", "gint", "Width of the focus line.")
//!         .with_default("1")],
//!     hierarchy: vec!["GtkButton".into(), "GtkBin".into()],
//! };
//!
//! let css = render_widget(&record, &Snippets::none());
//! assert!(css.contains("\t/* focus-line-width: 1; */ /* gint */\n"));
//! ```

use crate::model::{Corpus, StyleClasses, StyleProperty, WidgetRecord};
use crate::snippets::Snippets;

/// Separator between hierarchy entries in the inheritance comment.
pub const HIERARCHY_SEPARATOR: &str = "->";

/// Logical snippet name of the aggregate class/import stylesheet.
pub const STYLE_CLASSES_TEMPLATE: &str = "gtk-widgets";

/// Render the template of one widget.
pub fn render_widget(record: &WidgetRecord, snippets: &Snippets) -> String {
    let mut text = String::from(snippets.header());

    text.push_str(&format!("{} {{\n", record.name));
    text.push_str("\t/**\n");
    text.push_str(&format!("\t * {}\n", inheritance_comment(&record.hierarchy)));
    text.push_str("\t */\n");

    for property in &record.properties {
        text.push('\n');
        text.push_str(&format!("\t/* {} */\n", property.description));
        text.push('\t');
        text.push_str(&declaration_line(property));
        text.push('\n');
    }

    text.push_str("\n}");

    if let Some(footer) = &snippets.footer {
        text.push_str("\n\n");
        text.push_str(footer);
    }

    text
}

/// `Style properties inheritance: GtkButton->GtkBin.`
pub fn inheritance_comment(hierarchy: &[String]) -> String {
    format!(
        "Style properties inheritance: {}.",
        hierarchy.join(HIERARCHY_SEPARATOR)
    )
}

/// The commented-out declaration of a property followed by its annotation:
///
/// ```text
/// /* focus-line-width: 1; */ /* gint, Greater than or equal to 0 */
/// ```
///
/// The annotation lists whichever of type and allowed values are known and
/// is left out when neither is. A missing default renders as empty.
pub fn declaration_line(property: &StyleProperty) -> String {
    let default = property.default.as_deref().unwrap_or_default();
    let mut line = format!("/* {}: {default}; */", property.name);

    let ty = Some(property.ty.as_str()).filter(|ty| !ty.is_empty());
    match (ty, property.allowed.as_deref()) {
        (Some(ty), Some(allowed)) => line.push_str(&format!(" /* {ty}, {allowed} */")),
        (Some(ty), None) => line.push_str(&format!(" /* {ty} */")),
        (None, Some(allowed)) => line.push_str(&format!(" /* {allowed} */")),
        (None, None) => {}
    }

    line
}

/// One class selector documenting its member widget types.
pub fn render_style_class<'a>(name: &str, members: impl IntoIterator<Item = &'a String>) -> String {
    let members: Vec<&str> = members.into_iter().map(String::as_str).collect();
    format!(".{name} {{\n\t/* Members: {}. */\n}}\n\n", members.join(", "))
}

/// The aggregate stylesheet: every style class, then an import per widget
/// template in corpus order.
pub fn render_style_classes(classes: &StyleClasses, corpus: &Corpus, snippets: &Snippets) -> String {
    let mut text = String::from(snippets.header());

    for (name, members) in classes.iter() {
        text.push_str(&render_style_class(name, members));
    }

    text.push('\n');
    text.push_str("/*\n * Imports for widget-specific theming.\n */\n\n");

    for record in corpus.values() {
        text.push_str(&format!(
            "@import url(\"widgets/{}.css\");\n",
            record.file_stem()
        ));
    }

    text.push_str(snippets.footer());
    text
}

/// A file with no generated content, made of its header and footer only.
pub fn render_passthrough(snippets: &Snippets) -> String {
    format!("{}{}", snippets.header(), snippets.footer())
}

//! Strict XML loader.
//!
//! gtk-doc writes its reference pages as well-formed XHTML, so the default
//! loader insists on well-formedness: mismatched or unclosed tags, duplicate
//! attributes and undefined entities are errors rather than being repaired.

use html5ever::{LocalName, QualName, ns};
use quick_xml::Reader;
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use super::arena::{Attribute, Document, NodeId};

/// A well-formedness violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at byte {position})")]
pub struct MarkupError {
    pub message: String,
    pub position: u64,
}

/// Parse a well-formed XML/XHTML document.
///
/// The document must have exactly one root element. Only whitespace,
/// comments, processing instructions and the doctype may appear outside it.
pub fn parse_xml(content: &str) -> Result<Document, MarkupError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().check_end_names = true;

    let mut doc = Document::new();
    let mut open: Vec<NodeId> = vec![doc.root()];
    let mut has_root = false;

    loop {
        let fail = |reader: &Reader<&[u8]>, message: String| MarkupError {
            message,
            position: reader.buffer_position(),
        };
        let parent = open.last().copied().unwrap_or(doc.root());
        let at_top_level = open.len() == 1;

        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if at_top_level && has_root {
                    return Err(fail(&reader, "more than one root element".to_string()));
                }
                has_root = true;
                let element = create_element(&mut doc, &e).map_err(|m| fail(&reader, m))?;
                doc.append(parent, element);
                open.push(element);
            }
            Ok(Event::Empty(e)) => {
                if at_top_level && has_root {
                    return Err(fail(&reader, "more than one root element".to_string()));
                }
                has_root = true;
                let element = create_element(&mut doc, &e).map_err(|m| fail(&reader, m))?;
                doc.append(parent, element);
            }
            Ok(Event::End(_)) => {
                if at_top_level {
                    return Err(fail(&reader, "unexpected end tag".to_string()));
                }
                open.pop();
            }
            Ok(Event::Text(e)) => {
                let text = String::from_utf8_lossy(e.as_ref());
                if at_top_level {
                    if !text.trim().is_empty() {
                        return Err(fail(&reader, "text outside the root element".to_string()));
                    }
                    continue;
                }
                doc.append_text(parent, &text);
            }
            Ok(Event::CData(e)) => {
                if at_top_level {
                    return Err(fail(&reader, "CDATA outside the root element".to_string()));
                }
                doc.append_text(parent, &String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) => {
                if at_top_level {
                    return Err(fail(&reader, "text outside the root element".to_string()));
                }
                let resolved = match e.resolve_char_ref() {
                    Ok(Some(ch)) => ch.to_string(),
                    Ok(None) => {
                        let entity = String::from_utf8_lossy(e.as_ref());
                        named_entity(&entity)
                            .ok_or_else(|| fail(&reader, format!("undefined entity &{entity};")))?
                            .to_string()
                    }
                    Err(err) => return Err(fail(&reader, err.to_string())),
                };
                doc.append_text(parent, &resolved);
            }
            Ok(Event::Comment(e)) => {
                let comment = doc.create_comment(String::from_utf8_lossy(e.as_ref()).into_owned());
                doc.append(parent, comment);
            }
            Ok(Event::PI(e)) => {
                let pi = doc
                    .create_processing_instruction(String::from_utf8_lossy(e.as_ref()).into_owned());
                doc.append(parent, pi);
            }
            Ok(Event::DocType(e)) => {
                let doctype = doc.create_doctype(String::from_utf8_lossy(e.as_ref()).trim().to_string());
                doc.append(parent, doctype);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(fail(&reader, e.to_string())),
            // The XML declaration has already been used to pick the encoding
            Ok(_) => {}
        }
    }

    if let Some(&unclosed) = open.get(1) {
        let name = doc
            .local_name(unclosed)
            .map(|n| n.to_string())
            .unwrap_or_default();
        return Err(MarkupError {
            message: format!("unclosed element <{name}>"),
            position: reader.buffer_position(),
        });
    }

    if !has_root {
        return Err(MarkupError {
            message: "no root element".to_string(),
            position: reader.buffer_position(),
        });
    }

    Ok(doc)
}

fn create_element(doc: &mut Document, e: &BytesStart<'_>) -> Result<NodeId, String> {
    let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_ascii_lowercase();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape_with(&raw, named_entity).map_err(|err| err.to_string())?;
        attrs.push(Attribute {
            name: QualName::new(None, ns!(), LocalName::from(key)),
            value: value.into_owned(),
        });
    }

    Ok(doc.create_element(QualName::new(None, ns!(html), LocalName::from(tag)), attrs))
}

/// The XML predefined entities plus the XHTML ones documentation generators emit.
fn named_entity(name: &str) -> Option<&'static str> {
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "times" => "\u{d7}",
        _ => return None,
    };
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let doc = parse_xml(
            r#"<?xml version="1.0"?><html><body><p class="x">a &lt; b&#160;c</p></body></html>"#,
        )
        .expect("well-formed");

        let p = doc.first_element_by_tag(doc.root(), "p").expect("p");
        assert_eq!(doc.first_text(p), Some("a < b\u{a0}c"));
        assert_eq!(doc.get_attr(p, "class"), Some("x"));
    }

    #[test]
    fn test_xhtml_entities() {
        let doc = parse_xml("<p>Default&nbsp;value: &ldquo;x&rdquo;</p>").expect("well-formed");
        let p = doc.first_element_by_tag(doc.root(), "p").expect("p");
        assert_eq!(doc.text_content(p), "Default\u{a0}value: \u{201c}x\u{201d}");
    }

    #[test]
    fn test_whitespace_preserved() {
        let doc = parse_xml("<pre>\n  GObject\n   +----GtkWidget\n</pre>").expect("well-formed");
        let pre = doc.first_element_by_tag(doc.root(), "pre").expect("pre");
        assert_eq!(doc.first_text(pre), Some("\n  GObject\n   +----GtkWidget\n"));
    }

    #[test]
    fn test_comments_and_doctype_are_nodes() {
        let doc = parse_xml("<!DOCTYPE html><div><!-- note --><b>x</b></div>").expect("ok");
        let div = doc.first_element_by_tag(doc.root(), "div").expect("div");
        let children: Vec<_> = doc.children(div).collect();
        assert_eq!(children.len(), 2);
        assert!(doc.local_name(children[0]).is_none());
        assert!(doc.is_element_named(children[1], "b"));
    }

    #[test]
    fn test_mismatched_end_tag_fails() {
        assert!(parse_xml("<div><p>text</div></p>").is_err());
    }

    #[test]
    fn test_unclosed_element_fails() {
        assert!(parse_xml("<html><body><p>text</p>").is_err());
    }

    #[test]
    fn test_stray_end_tag_fails() {
        assert!(parse_xml("<p>text</p></div>").is_err());
    }

    #[test]
    fn test_empty_document_fails() {
        for content in ["", "  \n", "<?xml version=\"1.0\"?>\n<!-- nothing -->\n"] {
            let err = parse_xml(content).expect_err("no root");
            assert!(err.message.contains("no root element"), "{content:?}: {err}");
        }
    }

    #[test]
    fn test_text_only_document_fails() {
        assert!(parse_xml("just some text").is_err());
        assert!(parse_xml("&amp;").is_err());
    }

    #[test]
    fn test_text_outside_root_fails() {
        assert!(parse_xml("text<p>x</p>").is_err());
        assert!(parse_xml("<p>x</p>trailing").is_err());
    }

    #[test]
    fn test_several_top_level_elements_fail() {
        assert!(parse_xml("<a/><b/>").is_err());
        assert!(parse_xml("<a></a>\n<b>x</b>").is_err());
    }

    #[test]
    fn test_whitespace_and_comments_around_root_are_allowed() {
        let doc = parse_xml("<?xml version=\"1.0\"?>\n<!-- page -->\n<html><body/></html>\n")
            .expect("well-formed");
        assert!(doc.first_element_by_tag(doc.root(), "body").is_some());
    }

    #[test]
    fn test_character_references() {
        let doc = parse_xml("<p>&#8212;&#x2014;</p>").expect("well-formed");
        let p = doc.first_element_by_tag(doc.root(), "p").expect("p");
        assert_eq!(doc.text_content(p), "\u{2014}\u{2014}");
        assert!(parse_xml("<p>&#xZZ;</p>").is_err());
    }

    #[test]
    fn test_undefined_entity_fails() {
        let err = parse_xml("<p>&bogus;</p>").expect_err("undefined entity");
        assert!(err.message.contains("&bogus;"));
    }
}

//! Parsing and lookup of error catalog documents.
//!
//! A catalog is one XML document per module describing the errors that module can
//! raise. The document has the shape:
//!
//! ```xml
//! <catalog>
//!     <group type="my_app::parser::Parser">
//!         <entry key="unexpected_token" type="my_app::ParseError">
//!             Expected '{0}' but found '{1}'.
//!         </entry>
//!     </group>
//! </catalog>
//! ```
//!
//! Groups are keyed by the full name of the invoking context type, entries by a
//! string key, and each entry carries the fully-qualified target error type name
//! in its `type` attribute plus a message template with `{0}`-style positional
//! placeholders as its text. Documents are parsed once and never mutated.

use std::collections::HashMap;

use quick_xml::{events::Event, Reader};

use crate::{Error, Result};

/// One catalog entry: the target error type and its message template.
#[derive(Debug, Clone)]
pub struct Descriptor {
    type_name: Option<String>,
    template: String,
}

impl Descriptor {
    /// The fully-qualified name of the error type this entry resolves to, if the
    /// entry declares one.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// The message template, trimmed of surrounding whitespace. May contain
    /// `{0}`-style positional placeholders.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// A parsed, immutable catalog for one module.
///
/// Descriptors are addressed by the composite key (group type, entry key) with
/// exact string matching.
#[derive(Debug, Default)]
pub struct CatalogDocument {
    groups: HashMap<String, HashMap<String, Descriptor>>,
}

impl CatalogDocument {
    /// Parses catalog XML. The `module` identity only appears in failure messages.
    ///
    /// Groups without a `type` attribute and entries without a `key` attribute are
    /// unaddressable, so they are skipped rather than rejected. A `group` nested
    /// inside another group is rejected: silently recovering would lose the rest
    /// of the outer group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogMalformed`] when the document is not well-formed XML,
    /// its root element is not `<catalog>`, or a group is nested inside another.
    pub fn parse(module: &str, xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let malformed = |message: String| Error::CatalogMalformed {
            module: module.to_string(),
            message,
        };

        let mut groups: HashMap<String, HashMap<String, Descriptor>> = HashMap::new();
        let mut saw_root = false;
        let mut in_group = false;
        let mut current_group: Option<String> = None;
        let mut current_entry: Option<(String, Option<String>, String)> = None;

        loop {
            match reader.read_event().map_err(|e| malformed(e.to_string()))? {
                Event::Start(start) => {
                    let name = start.name();

                    if !saw_root {
                        if name.as_ref() != b"catalog" {
                            return Err(malformed(format!(
                                "root element must be 'catalog', found '{}'",
                                String::from_utf8_lossy(name.as_ref())
                            )));
                        }

                        saw_root = true;
                        continue;
                    }

                    match name.as_ref() {
                        b"group" => {
                            if in_group {
                                return Err(malformed(
                                    "'group' elements must not be nested".to_string(),
                                ));
                            }

                            in_group = true;
                            current_group =
                                attribute(&start, "type").map_err(|e| malformed(e))?;
                        }
                        b"entry" if current_group.is_some() && current_entry.is_none() => {
                            let key = attribute(&start, "key").map_err(|e| malformed(e))?;
                            let type_name =
                                attribute(&start, "type").map_err(|e| malformed(e))?;

                            if let Some(key) = key {
                                current_entry = Some((key, type_name, String::new()));
                            }
                        }
                        _ => {}
                    }
                }
                Event::Empty(start) => {
                    if !saw_root {
                        if start.name().as_ref() != b"catalog" {
                            return Err(malformed(format!(
                                "root element must be 'catalog', found '{}'",
                                String::from_utf8_lossy(start.name().as_ref())
                            )));
                        }

                        saw_root = true;
                        continue;
                    }

                    match start.name().as_ref() {
                        b"group" if in_group => {
                            return Err(malformed(
                                "'group' elements must not be nested".to_string(),
                            ));
                        }
                        b"entry" => {
                            if let Some(group) = &current_group {
                                let key = attribute(&start, "key").map_err(|e| malformed(e))?;
                                let type_name =
                                    attribute(&start, "type").map_err(|e| malformed(e))?;

                                if let Some(key) = key {
                                    groups.entry(group.clone()).or_default().insert(
                                        key,
                                        Descriptor {
                                            type_name,
                                            template: String::new(),
                                        },
                                    );
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(text) => {
                    if let Some((_, _, buffer)) = &mut current_entry {
                        buffer.push_str(&text.unescape().map_err(|e| malformed(e.to_string()))?);
                    }
                }
                Event::CData(data) => {
                    if let Some((_, _, buffer)) = &mut current_entry {
                        buffer.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::End(end) => match end.name().as_ref() {
                    b"entry" => {
                        if let (Some(group), Some((key, type_name, buffer))) =
                            (&current_group, current_entry.take())
                        {
                            groups.entry(group.clone()).or_default().insert(
                                key,
                                Descriptor {
                                    type_name,
                                    template: buffer.trim().to_string(),
                                },
                            );
                        }
                    }
                    b"group" => {
                        in_group = false;
                        current_group = None;
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(malformed("document contains no 'catalog' element".to_string()));
        }

        Ok(CatalogDocument { groups })
    }

    /// Looks up the descriptor for (`group`, `key`) by exact match.
    #[must_use]
    pub fn descriptor(&self, group: &str, key: &str) -> Option<&Descriptor> {
        self.groups.get(group)?.get(key)
    }

    /// Number of entries across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }

    /// Returns `true` when the catalog declares no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn attribute(
    start: &quick_xml::events::BytesStart<'_>,
    name: &str,
) -> std::result::Result<Option<String>, String> {
    match start.try_get_attribute(name) {
        Ok(Some(attr)) => match attr.unescape_value() {
            Ok(value) => Ok(Some(value.into_owned())),
            Err(e) => Err(e.to_string()),
        },
        Ok(None) => Ok(None),
        Err(e) => Err(e.to_string()),
    }
}

/// Applies positional `{0}`-style substitution to a message template.
///
/// A template with no supplied arguments is passed through untouched, braces
/// included. `{{` and `}}` escape literal braces.
pub(crate) fn format_template(key: &str, template: &str, args: &[String]) -> Result<String> {
    if args.is_empty() {
        return Ok(template.to_string());
    }

    let format_error = |message: String| Error::TemplateFormat {
        key: key.to_string(),
        message,
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut digits = String::new();
                while let Some(d) = chars.peek().copied() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if digits.is_empty() {
                    return Err(format_error(
                        "expected a placeholder index after '{'".to_string(),
                    ));
                }

                if chars.next() != Some('}') {
                    return Err(format_error(format!("unterminated placeholder '{{{digits}'")));
                }

                let index: usize = digits
                    .parse()
                    .map_err(|_| format_error(format!("placeholder index '{digits}' is out of range")))?;
                let arg = args.get(index).ok_or_else(|| {
                    format_error(format!("placeholder {{{index}}} has no matching argument"))
                })?;
                out.push_str(arg);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(format_error("unmatched '}' in template".to_string()));
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
        <catalog>
            <group type="tests::Widget">
                <entry key="valid" type="tests::WidgetError">Here is the message.</entry>
                <entry key="noTypeAttribute">Message without a type.</entry>
                <entry key="withArgs" type="tests::WidgetError">Value '{0}' and '{1}'.</entry>
                <entry key="empty" type="tests::WidgetError"/>
            </group>
            <group type="tests::Other">
                <entry key="valid" type="tests::OtherError">Other message.</entry>
            </group>
        </catalog>
    "#;

    #[test]
    fn parse_indexes_entries_by_group_and_key() {
        let doc = CatalogDocument::parse("tests", CATALOG).unwrap();
        assert_eq!(doc.len(), 5);

        let descriptor = doc.descriptor("tests::Widget", "valid").unwrap();
        assert_eq!(descriptor.type_name(), Some("tests::WidgetError"));
        assert_eq!(descriptor.template(), "Here is the message.");

        let other = doc.descriptor("tests::Other", "valid").unwrap();
        assert_eq!(other.type_name(), Some("tests::OtherError"));
    }

    #[test]
    fn parse_trims_template_whitespace() {
        let doc = CatalogDocument::parse(
            "tests",
            "<catalog><group type=\"g\"><entry key=\"k\" type=\"t\">\n    padded   \n</entry></group></catalog>",
        )
        .unwrap();

        assert_eq!(doc.descriptor("g", "k").unwrap().template(), "padded");
    }

    #[test]
    fn parse_keeps_entry_without_type_attribute() {
        let doc = CatalogDocument::parse("tests", CATALOG).unwrap();
        let descriptor = doc.descriptor("tests::Widget", "noTypeAttribute").unwrap();
        assert_eq!(descriptor.type_name(), None);
    }

    #[test]
    fn parse_handles_self_closing_entry() {
        let doc = CatalogDocument::parse("tests", CATALOG).unwrap();
        let descriptor = doc.descriptor("tests::Widget", "empty").unwrap();
        assert_eq!(descriptor.template(), "");
    }

    #[test]
    fn lookup_is_exact_match() {
        let doc = CatalogDocument::parse("tests", CATALOG).unwrap();
        assert!(doc.descriptor("tests::Widget", "Valid").is_none());
        assert!(doc.descriptor("tests::widget", "valid").is_none());
    }

    #[test]
    fn parse_rejects_nested_groups() {
        let xml = r#"
            <catalog>
                <group type="outer">
                    <group type="inner">
                        <entry key="i" type="t">m</entry>
                    </group>
                    <entry key="k" type="t">m</entry>
                </group>
            </catalog>
        "#;
        assert!(matches!(
            CatalogDocument::parse("tests", xml).unwrap_err(),
            Error::CatalogMalformed { module, .. } if module == "tests"
        ));
    }

    #[test]
    fn parse_rejects_self_closing_nested_group() {
        let xml = r#"<catalog><group type="outer"><group type="inner"/><entry key="k" type="t">m</entry></group></catalog>"#;
        assert!(CatalogDocument::parse("tests", xml).is_err());
    }

    #[test]
    fn parse_rejects_unexpected_root() {
        let err = CatalogDocument::parse("tests", "<wrong/>").unwrap_err();
        assert!(matches!(err, Error::CatalogMalformed { module, .. } if module == "tests"));
    }

    #[test]
    fn parse_rejects_invalid_xml() {
        assert!(CatalogDocument::parse("tests", "<catalog><group").is_err());
    }

    #[test]
    fn template_passthrough_without_args() {
        let out = format_template("k", "Keep {0} as-is.", &[]).unwrap();
        assert_eq!(out, "Keep {0} as-is.");
    }

    #[test]
    fn template_substitutes_positional_args() {
        let out = format_template(
            "k",
            "Here is the message with argument ({0}) or two ({1}).",
            &["hello".to_string(), "12".to_string()],
        )
        .unwrap();
        assert_eq!(out, "Here is the message with argument (hello) or two (12).");
    }

    #[test]
    fn template_supports_escaped_braces() {
        let out = format_template("k", "{{literal}} {0}", &["x".to_string()]).unwrap();
        assert_eq!(out, "{literal} x");
    }

    #[test]
    fn template_rejects_out_of_range_placeholder() {
        let err = format_template("k", "{2}", &["only".to_string()]).unwrap_err();
        assert!(matches!(err, Error::TemplateFormat { key, .. } if key == "k"));
    }

    #[test]
    fn template_rejects_malformed_placeholder() {
        assert!(format_template("k", "{x}", &["a".to_string()]).is_err());
        assert!(format_template("k", "{0", &["a".to_string()]).is_err());
        assert!(format_template("k", "}", &["a".to_string()]).is_err());
    }
}
